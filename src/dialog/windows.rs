//! Native Windows dialogs
//!
//! Message boxes go straight to `MessageBoxW`. Input boxes and pickers have
//! no equally small API, so those write a throwaway PowerShell script with a
//! random name into the temp directory, run it, read the one line it prints
//! and delete it again.

use super::{run_output, Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

const MB_OK_INFORMATION: u32 = 0x00;
const MB_OK_ERROR: u32 = 0x10;
const MB_YESNO_QUESTION: u32 = 0x24;
const IDYES: i32 = 6;

const LICENSE_PREAMBLE: &str = "Do you accept the terms of the license agreement below?\n\n";

pub struct Win32Adapter;

/// PowerShell single-quoted string literal
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `*.txt|*.txt|*.png;*.jpg|*.png;*.jpg` from `["*.txt", "*.png *.jpg"]`
fn encode_filters(filters: &[&str]) -> String {
    filters
        .iter()
        .map(|filter| {
            let patterns = filter.split_whitespace().collect::<Vec<_>>().join(";");
            format!("{}|{}", filter, patterns)
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn input_box_script(prompt: &str, title: &str) -> String {
    format!(
        "Add-Type -AssemblyName Microsoft.VisualBasic\n\
         [Microsoft.VisualBasic.Interaction]::InputBox({}, {}, '')\n",
        ps_quote(prompt),
        ps_quote(title)
    )
}

fn folder_script(title: &str) -> String {
    format!(
        "Add-Type -AssemblyName System.Windows.Forms\n\
         $dialog = New-Object System.Windows.Forms.FolderBrowserDialog\n\
         $dialog.Description = {}\n\
         if ($dialog.ShowDialog() -eq 'OK') {{ $dialog.SelectedPath }}\n",
        ps_quote(title)
    )
}

fn file_script(filters: &[&str], title: &str) -> String {
    let mut script = format!(
        "Add-Type -AssemblyName System.Windows.Forms\n\
         $dialog = New-Object System.Windows.Forms.OpenFileDialog\n\
         $dialog.Title = {}\n",
        ps_quote(title)
    );
    if !filters.is_empty() {
        script.push_str(&format!("$dialog.Filter = {}\n", ps_quote(&encode_filters(filters))));
    }
    script.push_str("if ($dialog.ShowDialog() -eq 'OK') { $dialog.FileName }\n");
    script
}

/// Write `script` to a fresh temp file, run it, and return its first output line
///
/// The file is removed before returning, whatever the outcome.
fn run_script(host: &dyn Host, script: &str) -> Result<String, DialogError> {
    let mut file = tempfile::Builder::new()
        .prefix("dialogbind-")
        .suffix(".ps1")
        .tempfile()?;
    file.write_all(script.as_bytes())?;
    let path = file.into_temp_path();
    debug!("Running generated script {}", path.display());

    let invocation = Invocation::exec(
        "powershell",
        [
            "-NoProfile".to_string(),
            "-ExecutionPolicy".to_string(),
            "Bypass".to_string(),
            "-File".to_string(),
            path.to_string_lossy().to_string(),
        ],
    );
    let line = run_output(host, &invocation)
        .filter(|c| c.success)
        .and_then(|c| c.stdout.lines().next().map(|l| l.trim_end_matches('\r').to_string()))
        .unwrap_or_default();

    if let Err(e) = path.close() {
        warn!("Failed to remove generated script: {}", e);
    }
    Ok(line)
}

fn message_box(host: &dyn Host, text: &str, title: &str, style: u32) -> Option<i32> {
    match host.message_box(text, title, style) {
        Ok(code) => Some(code),
        Err(e) => {
            warn!("MessageBoxW failed: {}", e);
            None
        }
    }
}

impl Adapter for Win32Adapter {
    fn backend(&self) -> Backend {
        Backend::Win32
    }

    fn supports(&self, operation: Operation) -> bool {
        !matches!(operation, Operation::Progress | Operation::Choose)
    }

    fn message(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(message_box(host, text, title, MB_OK_INFORMATION).is_some_and(|code| code != 0))
    }

    fn yes_no(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(message_box(host, text, title, MB_YESNO_QUESTION) == Some(IDYES))
    }

    fn error(&self, host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        Ok(message_box(host, text, title, MB_OK_ERROR).is_some_and(|code| code != 0))
    }

    fn license(&self, host: &dyn Host, file: &Path, title: &str) -> Result<bool, DialogError> {
        // ANSI-encoded license files are common here
        let terms = std::fs::read(file)?;
        let text = format!("{}{}", LICENSE_PREAMBLE, String::from_utf8_lossy(&terms));
        Ok(message_box(host, &text, title, MB_YESNO_QUESTION) == Some(IDYES))
    }

    fn pick_file(&self, host: &dyn Host, filters: &[&str], title: &str) -> Result<String, DialogError> {
        run_script(host, &file_script(filters, title))
    }

    fn pick_directory(&self, host: &dyn Host, title: &str) -> Result<String, DialogError> {
        run_script(host, &folder_script(title))
    }

    fn text_entry(&self, host: &dyn Host, prompt: &str, title: &str) -> Result<String, DialogError> {
        run_script(host, &input_box_script(prompt, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::{Call, FakeHost};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn script_path(host: &FakeHost) -> PathBuf {
        match host.runs().as_slice() {
            [Invocation::Exec { program, args }] => {
                assert_eq!(program, "powershell");
                PathBuf::from(args.last().unwrap())
            }
            other => panic!("expected one powershell run, got {:?}", other),
        }
    }

    #[test]
    fn test_message_box_styles() {
        let host = FakeHost::new();
        Win32Adapter.message(&host, "hi", "App").unwrap();
        Win32Adapter.error(&host, "bad", "App").unwrap();
        Win32Adapter.yes_no(&host, "ok?", "App").unwrap();

        let styles: Vec<u32> = host
            .calls()
            .into_iter()
            .map(|c| match c {
                Call::MessageBox { style, .. } => style,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(styles, vec![0, 16, 36]);
    }

    #[test]
    fn test_yes_no_only_true_on_idyes() {
        let host = FakeHost::new();
        host.push_box_result(IDYES);
        assert!(Win32Adapter.yes_no(&host, "ok?", "App").unwrap());

        let host = FakeHost::new();
        host.push_box_result(7);
        assert!(!Win32Adapter.yes_no(&host, "ok?", "App").unwrap());
    }

    #[test]
    fn test_license_embeds_file_text() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("LICENSE");
        std::fs::write(&file, "Be nice.").unwrap();

        let host = FakeHost::new();
        host.push_box_result(IDYES);
        assert!(Win32Adapter.license(&host, &file, "App").unwrap());
        assert_eq!(
            host.calls(),
            vec![Call::MessageBox {
                text: format!("{}Be nice.", LICENSE_PREAMBLE),
                title: "App".to_string(),
                style: 36,
            }]
        );
    }

    #[test]
    fn test_license_accepts_non_utf8_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("LICENSE.txt");
        std::fs::write(&file, b"Copyright \xa9 ACME").unwrap();

        let host = FakeHost::new();
        host.push_box_result(7);
        assert!(!Win32Adapter.license(&host, &file, "App").unwrap());
        match host.calls().as_slice() {
            [Call::MessageBox { text, .. }] => {
                assert!(text.starts_with(LICENSE_PREAMBLE));
                assert!(text.ends_with("Copyright \u{FFFD} ACME"));
            }
            other => panic!("expected one message box, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_filters() {
        assert_eq!(encode_filters(&["*.txt"]), "*.txt|*.txt");
        assert_eq!(
            encode_filters(&["*.txt", "*.png *.jpg"]),
            "*.txt|*.txt|*.png *.jpg|*.png;*.jpg"
        );
    }

    #[test]
    fn test_ps_quote() {
        assert_eq!(ps_quote("it's"), "'it''s'");
    }

    #[test]
    fn test_file_script_contents() {
        let script = file_script(&["*.txt"], "Open");
        assert!(script.contains("OpenFileDialog"));
        assert!(script.contains("$dialog.Title = 'Open'"));
        assert!(script.contains("$dialog.Filter = '*.txt|*.txt'"));

        let script = file_script(&[], "Open");
        assert!(!script.contains("Filter"));
    }

    #[test]
    fn test_text_entry_runs_and_removes_script() {
        let host = FakeHost::new();
        host.push(true, 0, "hello world\r\n");
        let text = Win32Adapter.text_entry(&host, "Say:", "App").unwrap();

        assert_eq!(text, "hello world");
        let path = script_path(&host);
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("dialogbind-"));
        assert_eq!(path.extension().unwrap(), "ps1");
        assert!(!path.exists());
    }

    #[test]
    fn test_text_entry_keeps_surrounding_spaces() {
        let host = FakeHost::new();
        host.push(true, 0, "  indented text \r\n");
        let text = Win32Adapter.text_entry(&host, "Say:", "App").unwrap();
        assert_eq!(text, "  indented text ");
    }

    #[test]
    fn test_script_names_are_unique() {
        let host = FakeHost::new();
        Win32Adapter.pick_directory(&host, "A").unwrap();
        Win32Adapter.pick_directory(&host, "B").unwrap();

        let runs = host.runs();
        assert_eq!(runs.len(), 2);
        assert_ne!(runs[0], runs[1]);
    }

    #[test]
    fn test_cancelled_picker_is_empty() {
        let host = FakeHost::new();
        host.push(true, 0, "");
        assert_eq!(Win32Adapter.pick_file(&host, &["*.txt"], "Open").unwrap(), "");
    }

    #[test]
    fn test_progress_and_choose_unsupported() {
        let host = FakeHost::new();
        assert!(matches!(
            Win32Adapter.progress(&host, "wait", "App"),
            Err(DialogError::Unsupported { .. })
        ));
        assert!(matches!(
            Win32Adapter.choose(&host, &["A"], "?", "App"),
            Err(DialogError::Unsupported { .. })
        ));
        assert!(host.calls().is_empty());
    }
}
