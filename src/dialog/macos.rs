//! AppleScript dialogs through `osascript`
//!
//! Each call builds one inline script. `display dialog` answers with
//! `button returned:<label>`, the pickers with an HFS alias such as
//! `alias Macintosh HD:Users:me:notes.txt`.

use super::{run_output, run_status, Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::path::Path;
use tracing::debug;

const LICENSE_NOTICE: &str = "Right now, the license agreement will be shown in TextEdit. \
                              Close TextEdit using Command-Q to continue.";
const LICENSE_QUESTION: &str = "Do you accept the terms of the license agreement?";
/// `display dialog` takes at most three buttons
const MAX_BUTTONS: usize = 3;

pub struct MacosAdapter;

/// Drop characters that would end the AppleScript string or the shell quote
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '!' | '\'' | '"' | '$' | '\\'))
        .collect()
}

/// The entry osascript reported back as `shown`, in its unsanitized form
fn original_entry(entries: &[&str], shown: String) -> String {
    entries
        .iter()
        .find(|entry| sanitize(entry) == shown)
        .map(|entry| entry.to_string())
        .unwrap_or(shown)
}

/// `{"Yes", "No"}`
fn list_literal(items: &[&str]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("\"{}\"", sanitize(item)))
        .collect();
    format!("{{{}}}", quoted.join(", "))
}

fn osascript(script: &str) -> Invocation {
    let line = format!("osascript -e '{}'", script);
    debug!("osascript command: {}", line);
    Invocation::Shell(line)
}

/// Script for `display dialog`, or for `display notification` when `notification` is set
fn display_script(text: &str, buttons: &[&str], notification: bool, caution: bool) -> String {
    let kind = if notification { "notification" } else { "dialog" };
    let mut script = format!(
        "tell app \"System Events\" to display {} \"{}\"",
        kind,
        sanitize(text)
    );
    if notification {
        script.push_str(&format!(" with title \"{}\"", sanitize(&program_name())));
    } else {
        script.push_str(" buttons ");
        script.push_str(&list_literal(buttons));
    }
    if caution {
        script.push_str(" with icon caution");
    }
    script
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "DialogBind".to_string())
}

/// Second colon-separated field of `output`
///
/// `button returned:Yes` gives `Yes`. The first colon always wins, so a
/// label that itself contains a colon comes back truncated.
fn colon_field(output: &str) -> Option<String> {
    if !output.contains(':') {
        return None;
    }
    output.split(':').nth(1).map(str::to_string)
}

/// Convert `alias Volume:Users:me:file` into `/Users/me/file`
fn hfs_to_posix(output: &str) -> String {
    let hfs = output
        .strip_prefix("alias ")
        .or_else(|| output.strip_prefix("file "))
        .or_else(|| output.strip_prefix("folder "))
        .unwrap_or(output);

    match hfs.split_once(':') {
        Some((_volume, rest)) => format!("/{}", rest.replace(':', "/")),
        None => String::new(),
    }
}

/// `{"txt", "md"}` from `["*.txt", "*.md"]`; patterns without an extension are skipped
fn type_list(filters: &[&str]) -> Option<String> {
    let extensions: Vec<&str> = filters
        .iter()
        .flat_map(|filter| filter.split_whitespace())
        .filter_map(|pattern| pattern.strip_prefix("*."))
        .filter(|ext| !ext.is_empty() && !ext.contains('*'))
        .collect();
    (!extensions.is_empty()).then(|| list_literal(&extensions))
}

fn read_output(host: &dyn Host, script: &str) -> Option<String> {
    run_output(host, &osascript(script))
        .filter(|c| c.success)
        .map(|c| c.line())
}

impl Adapter for MacosAdapter {
    fn backend(&self) -> Backend {
        Backend::Macos
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    fn message(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        let script = display_script(text, &["OK"], false, false);
        Ok(run_status(host, &osascript(&script)))
    }

    fn yes_no(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        let script = display_script(text, &["Yes", "No"], false, false);
        let answer = run_output(host, &osascript(&script))
            .and_then(|c| colon_field(&c.line()))
            .is_some_and(|button| button.eq_ignore_ascii_case("yes"));
        Ok(answer)
    }

    fn error(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        let script = display_script(text, &["OK"], false, true);
        Ok(run_status(host, &osascript(&script)))
    }

    fn progress(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        let script = display_script(text, &[], true, false);
        Ok(run_status(host, &osascript(&script)))
    }

    fn license(&self, host: &dyn Host, file: &Path, title: &str) -> Result<bool, DialogError> {
        self.message(host, LICENSE_NOTICE, title)?;
        let opened = run_status(
            host,
            &Invocation::exec("open", ["-e".to_string(), file.to_string_lossy().to_string()]),
        );
        if !opened {
            return Ok(false);
        }
        self.yes_no(host, LICENSE_QUESTION, title)
    }

    fn choose(
        &self,
        host: &dyn Host,
        entries: &[&str],
        text: &str,
        _title: &str,
    ) -> Result<Option<String>, DialogError> {
        if entries.is_empty() {
            return Err(DialogError::InvalidInput(
                "nothing to choose from".to_string(),
            ));
        }

        if entries.len() <= MAX_BUTTONS {
            let script = display_script(text, entries, false, false);
            return Ok(run_output(host, &osascript(&script))
                .and_then(|c| colon_field(&c.line()))
                .map(|shown| original_entry(entries, shown)));
        }

        let script = format!(
            "tell app \"System Events\" to choose from list {} with prompt \"{}\"",
            list_literal(entries),
            sanitize(text)
        );
        Ok(read_output(host, &script)
            .filter(|item| item != "false")
            .map(|shown| original_entry(entries, shown)))
    }

    fn pick_file(&self, host: &dyn Host, filters: &[&str], title: &str) -> Result<String, DialogError> {
        let mut script = format!("choose file with prompt \"{}\"", sanitize(title));
        if let Some(types) = type_list(filters) {
            script.push_str(" of type ");
            script.push_str(&types);
        }
        Ok(read_output(host, &script)
            .map(|alias| hfs_to_posix(&alias))
            .unwrap_or_default())
    }

    fn pick_directory(&self, host: &dyn Host, title: &str) -> Result<String, DialogError> {
        let script = format!("choose folder with prompt \"{}\"", sanitize(title));
        Ok(read_output(host, &script)
            .map(|alias| hfs_to_posix(&alias))
            .unwrap_or_default())
    }

    fn text_entry(&self, host: &dyn Host, prompt: &str, _title: &str) -> Result<String, DialogError> {
        let script = format!(
            "tell app \"System Events\" to display dialog \"{}\" default answer \"\"",
            sanitize(prompt)
        );
        // button returned:OK, text returned:<answer>
        Ok(read_output(host, &script)
            .and_then(|out| {
                out.split_once("text returned:")
                    .map(|(_, typed)| typed.to_string())
            })
            .unwrap_or_default())
    }
}
