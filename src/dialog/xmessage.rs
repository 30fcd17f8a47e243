//! xmessage dialogs
//!
//! xmessage only knows labelled buttons, each mapped to the exit code it
//! produces. Everything here is expressed as a button set plus text:
//! the first button exits 0, so "first button" reads as `true`.

use super::{run_output, run_status, Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::path::Path;
use tracing::debug;

pub struct XmessageAdapter;

/// Push `c`, backslash-escaped if a double-quoted shell word would expand it
fn push_escaped(out: &mut String, c: char) {
    if matches!(c, '\\' | '$' | '`') {
        out.push('\\');
    }
    out.push(c);
}

/// Render `label:code` pairs as xmessage's `-buttons` value
///
/// `,` and `:` separate entries in that list, so labels lose them along
/// with `"`.
fn encode_buttons(buttons: &[(&str, i32)]) -> String {
    buttons
        .iter()
        .map(|(label, code)| {
            let mut out = String::with_capacity(label.len());
            for c in label.chars().filter(|c| !matches!(c, '"' | ',' | ':')) {
                push_escaped(&mut out, c);
            }
            format!("{}:{}", out, code)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Make `text` safe inside a double-quoted shell word
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push('\''),
            '!' => {}
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

fn command_line(text: &str, buttons: &[(&str, i32)], from_file: bool) -> String {
    let mut line = format!("xmessage -center -buttons \"{}\" ", encode_buttons(buttons));
    if from_file {
        line.push_str("-file ");
    }
    line.push('"');
    line.push_str(&sanitize(text));
    line.push('"');
    debug!("xmessage command: {}", line);
    line
}

fn show(host: &dyn Host, text: &str, buttons: &[(&str, i32)], from_file: bool) -> bool {
    run_status(host, &Invocation::Shell(command_line(text, buttons, from_file)))
}

impl Adapter for XmessageAdapter {
    fn backend(&self) -> Backend {
        Backend::Xmessage
    }

    fn supports(&self, operation: Operation) -> bool {
        matches!(
            operation,
            Operation::Message
                | Operation::YesNo
                | Operation::Error
                | Operation::Progress
                | Operation::License
                | Operation::Choose
        )
    }

    fn message(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        Ok(show(host, text, &[("OK", 0)], false))
    }

    fn yes_no(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        Ok(show(host, text, &[("Yes", 0), ("No", 1)], false))
    }

    fn error(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        Ok(show(host, &format!("ERROR. {}", text), &[("OK", 0)], false))
    }

    fn progress(&self, host: &dyn Host, text: &str, _title: &str) -> Result<bool, DialogError> {
        Ok(show(host, text, &[], false))
    }

    fn license(&self, host: &dyn Host, file: &Path, _title: &str) -> Result<bool, DialogError> {
        let path = file.to_string_lossy();
        Ok(show(host, &path, &[("Accept", 0), ("Decline", 1)], true))
    }

    fn choose(
        &self,
        host: &dyn Host,
        entries: &[&str],
        text: &str,
        _title: &str,
    ) -> Result<Option<String>, DialogError> {
        if entries.is_empty() || entries.len() > 2 {
            return Err(DialogError::InvalidInput(format!(
                "xmessage can only choose between 1 and 2 entries, got {}",
                entries.len()
            )));
        }

        let buttons: Vec<(&str, i32)> = entries.iter().copied().zip(0..).collect();
        let invocation = Invocation::Shell(command_line(text, &buttons, false));

        // The pressed button's index comes back as the exit code
        let selected = run_output(host, &invocation)
            .and_then(|c| c.code)
            .and_then(|code| usize::try_from(code).ok())
            .and_then(|index| entries.get(index))
            .map(|entry| entry.to_string());
        Ok(selected)
    }
}
