//! kdialog dialogs
//!
//! Same idea as the zenity adapter, but kdialog takes its values as
//! separate words (`--inputbox 'text'`) and several modes take more than
//! one value, so every entry may carry a list.

use super::{run_output, run_status, Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::path::Path;
use tracing::debug;

const LICENSE_QUESTION: &str = "Do you accept the terms of the license agreement?";
const POPUP_SECONDS: &str = "5";

/// `--name` followed by each value as its own quoted word
#[derive(Debug, Clone, Default)]
struct KdialogArgs {
    args: Vec<(String, Vec<String>)>,
}

/// POSIX single quoting
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

impl KdialogArgs {
    fn new(title: &str) -> Self {
        Self::default().value("title", title)
    }

    fn value(self, name: &str, value: &str) -> Self {
        self.values(name, [value])
    }

    fn values<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args.push((
            name.to_string(),
            values.into_iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    fn command_line(&self) -> String {
        let mut line = String::from("kdialog");
        for (name, values) in &self.args {
            line.push_str(" --");
            line.push_str(name);
            for value in values {
                line.push(' ');
                line.push_str(&quote(value));
            }
        }
        debug!("kdialog command: {}", line);
        line
    }

    fn status(&self, host: &dyn Host) -> bool {
        run_status(host, &Invocation::Shell(self.command_line()))
    }

    /// Printed line, or `None` when the dialog was cancelled
    fn output(&self, host: &dyn Host) -> Option<String> {
        run_output(host, &Invocation::Shell(self.command_line()))
            .filter(|c| c.success)
            .map(|c| c.line())
    }
}

pub struct KdialogAdapter;

impl Adapter for KdialogAdapter {
    fn backend(&self) -> Backend {
        Backend::Kdialog
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    fn message(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(KdialogArgs::new(title).value("msgbox", text).status(host))
    }

    fn yes_no(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(KdialogArgs::new(title).value("yesno", text).status(host))
    }

    fn error(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(KdialogArgs::new(title).value("error", text).status(host))
    }

    fn progress(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        let args = KdialogArgs::new(title).values("passivepopup", [text, POPUP_SECONDS]);
        Ok(args.status(host))
    }

    fn license(&self, host: &dyn Host, file: &Path, title: &str) -> Result<bool, DialogError> {
        let path = file.to_string_lossy();
        if !KdialogArgs::new(title).value("textbox", &path).status(host) {
            return Ok(false);
        }
        self.yes_no(host, LICENSE_QUESTION, title)
    }

    fn choose(
        &self,
        host: &dyn Host,
        entries: &[&str],
        text: &str,
        title: &str,
    ) -> Result<Option<String>, DialogError> {
        if entries.is_empty() {
            return Err(DialogError::InvalidInput(
                "nothing to choose from".to_string(),
            ));
        }

        let mut values = vec![text.to_string()];
        for (index, entry) in entries.iter().enumerate() {
            values.extend([index.to_string(), entry.to_string(), "off".to_string()]);
        }
        let args = KdialogArgs::new(title).values("radiolist", values);

        // kdialog prints the tag; anything that isn't a valid index reads as empty
        Ok(args.output(host).map(|tag| {
            tag.trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| entries.get(index))
                .map(|entry| entry.to_string())
                .unwrap_or_default()
        }))
    }

    fn pick_file(&self, host: &dyn Host, filters: &[&str], title: &str) -> Result<String, DialogError> {
        let mut values = vec![".".to_string()];
        if !filters.is_empty() {
            values.push(filters.join(" "));
        }
        let args = KdialogArgs::new(title).values("getopenfilename", values);
        Ok(args.output(host).unwrap_or_default())
    }

    fn pick_directory(&self, host: &dyn Host, title: &str) -> Result<String, DialogError> {
        let args = KdialogArgs::new(title).value("getexistingdirectory", ".");
        Ok(args.output(host).unwrap_or_default())
    }

    fn text_entry(&self, host: &dyn Host, prompt: &str, title: &str) -> Result<String, DialogError> {
        let args = KdialogArgs::new(title).value("inputbox", prompt);
        Ok(args.output(host).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::FakeHost;

    #[test]
    fn test_quote_escapes_single_quotes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_values_render_as_separate_words() {
        let args = KdialogArgs::new("T").values("passivepopup", ["hi", "5"]);
        assert_eq!(
            args.command_line(),
            "kdialog --title 'T' --passivepopup 'hi' '5'"
        );
    }

    #[test]
    fn test_message_command_line() {
        let host = FakeHost::new();
        assert!(KdialogAdapter.message(&host, "Saved", "App").unwrap());
        assert_eq!(host.only_shell_line(), "kdialog --title 'App' --msgbox 'Saved'");
    }

    #[test]
    fn test_license_shows_textbox_then_asks() {
        let host = FakeHost::new();
        host.push(true, 0, "");
        host.push(true, 0, "");
        assert!(KdialogAdapter
            .license(&host, Path::new("/opt/LICENSE"), "App")
            .unwrap());

        let runs = host.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0],
            Invocation::Shell("kdialog --title 'App' --textbox '/opt/LICENSE'".to_string())
        );
        assert!(matches!(&runs[1], Invocation::Shell(l) if l.contains("--yesno")));
    }

    #[test]
    fn test_license_textbox_failure_skips_question() {
        let host = FakeHost::new();
        host.push(false, 1, "");
        assert!(!KdialogAdapter
            .license(&host, Path::new("/opt/LICENSE"), "App")
            .unwrap());
        assert_eq!(host.runs().len(), 1);
    }

    #[test]
    fn test_choose_triples_and_index_lookup() {
        let host = FakeHost::new();
        host.push(true, 0, "1\n");
        let picked = KdialogAdapter
            .choose(&host, &["Red", "Green"], "Colour?", "App")
            .unwrap();

        assert_eq!(picked.as_deref(), Some("Green"));
        assert_eq!(
            host.only_shell_line(),
            "kdialog --title 'App' --radiolist 'Colour?' '0' 'Red' 'off' '1' 'Green' 'off'"
        );
    }

    #[test]
    fn test_choose_out_of_range_is_empty() {
        let host = FakeHost::new();
        host.push(true, 0, "7\n");
        let picked = KdialogAdapter.choose(&host, &["Red"], "?", "App").unwrap();
        assert_eq!(picked.as_deref(), Some(""));
    }

    #[test]
    fn test_choose_cancelled() {
        let host = FakeHost::new();
        host.push(false, 1, "");
        assert_eq!(KdialogAdapter.choose(&host, &["Red"], "?", "App").unwrap(), None);
    }

    #[test]
    fn test_pick_file_filters() {
        let host = FakeHost::new();
        host.push(true, 0, "/home/me/a.png\n");
        let path = KdialogAdapter
            .pick_file(&host, &["*.png", "*.jpg"], "Open")
            .unwrap();
        assert_eq!(path, "/home/me/a.png");
        assert!(host
            .only_shell_line()
            .ends_with("--getopenfilename '.' '*.png *.jpg'"));
    }

    #[test]
    fn test_text_entry_cancel_is_empty() {
        let host = FakeHost::new();
        host.push(false, 1, "");
        assert_eq!(KdialogAdapter.text_entry(&host, "Name?", "App").unwrap(), "");
    }
}
