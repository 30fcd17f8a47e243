//! Host seam: process execution, the native message box, and PATH lookup
//!
//! Every dialog adapter talks to the outside world through [`Host`], so the
//! adapters themselves stay pure string builders and tests can observe
//! exactly which processes would have been spawned.

#[cfg(target_os = "windows")]
mod windows;

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A full command line handed to `sh -c`
    Shell(String),
    /// An executable with literal arguments, no shell involved
    Exec { program: String, args: Vec<String> },
}

impl Invocation {
    pub fn exec<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::Exec {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// What came back from a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
}

impl Completion {
    /// Stdout with the trailing newline removed
    pub fn line(&self) -> String {
        self.stdout.trim_end_matches(['\r', '\n']).to_string()
    }
}

/// Platform-agnostic access to external tools
pub trait Host {
    /// Run a command to completion, capturing stdout in memory
    fn run(&self, invocation: &Invocation) -> io::Result<Completion>;

    /// Show the OS message box and return its raw result code
    fn message_box(&self, text: &str, title: &str, style: u32) -> io::Result<i32>;

    /// Locate an executable on PATH
    fn find_program(&self, name: &str) -> Option<PathBuf>;
}

/// The real host: spawns processes and calls into the OS
pub struct NativeHost;

impl NativeHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for NativeHost {
    fn run(&self, invocation: &Invocation) -> io::Result<Completion> {
        let mut command = match invocation {
            Invocation::Shell(line) => {
                let mut c = Command::new("sh");
                c.arg("-c").arg(line);
                c
            }
            Invocation::Exec { program, args } => {
                let mut c = Command::new(program);
                c.args(args);
                c
            }
        };
        debug!("Running {:?}", invocation);

        // stdin stays attached: zenity --progress reads percentages from it
        let output = command
            .stdin(Stdio::inherit())
            .stderr(Stdio::null())
            .output()?;

        Ok(Completion {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }

    fn message_box(&self, text: &str, title: &str, style: u32) -> io::Result<i32> {
        #[cfg(target_os = "windows")]
        {
            Ok(windows::message_box(text, title, style))
        }

        #[cfg(not(target_os = "windows"))]
        {
            let _ = (text, title, style);
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "native message box is only available on Windows",
            ))
        }
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_line_trims_newline() {
        let c = Completion {
            success: true,
            code: Some(0),
            stdout: "hello\n".to_string(),
        };
        assert_eq!(c.line(), "hello");

        let c = Completion {
            stdout: "a b\r\n".to_string(),
            ..Completion::default()
        };
        assert_eq!(c.line(), "a b");
    }

    #[test]
    fn test_invocation_exec_builder() {
        let inv = Invocation::exec("uname", ["-s"]);
        assert_eq!(
            inv,
            Invocation::Exec {
                program: "uname".to_string(),
                args: vec!["-s".to_string()],
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_native_host_captures_stdout() {
        let host = NativeHost::new();
        let c = host
            .run(&Invocation::Shell("printf 'x:y\\n'".to_string()))
            .unwrap();
        assert!(c.success);
        assert_eq!(c.line(), "x:y");
    }

    #[cfg(unix)]
    #[test]
    fn test_native_host_reports_failure_status() {
        let host = NativeHost::new();
        let c = host.run(&Invocation::Shell("exit 1".to_string())).unwrap();
        assert!(!c.success);
        assert_eq!(c.code, Some(1));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_message_box_unsupported_off_windows() {
        let err = NativeHost::new().message_box("t", "t", 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
