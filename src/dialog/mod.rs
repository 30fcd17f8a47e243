//! Cross-platform native dialogs
//!
//! [`Dialogs`] is the entry point. It holds the backend resolved at startup
//! and forwards every call to that backend's [`Adapter`], which turns the
//! request into a command line (or a native API call) and decodes the
//! answer.
//!
//! All calls block until the user dismisses the dialog. Run them on a
//! separate thread if the caller must keep working meanwhile.

mod kdialog;
mod macos;
mod text;
mod windows;
mod xmessage;
mod zenity;

pub use zenity::{ZenityArg, ZenityArgs};

use crate::backend::Backend;
use crate::config::{Config, ConfigError};
use crate::platform::{Completion, Host, Invocation, NativeHost};
use crate::probe::Probe;
use crate::sound::{self, Sound};
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_TITLE: &str = "DialogBind";
pub const DEFAULT_PROGRESS_TEXT: &str = "Please wait...";
pub const DEFAULT_ENTRY_PROMPT: &str = "Type something:";
pub const DEFAULT_CHOICE_TEXT: &str = "Choose one of the items below:";

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("The {backend} backend does not support {operation} dialogs")]
    Unsupported {
        backend: Backend,
        operation: Operation,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Dialog backend \"{value}\" is not available. Available backends: {supported}")]
    InvalidConfiguration { value: String, supported: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Dialog kinds an adapter may or may not implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Message,
    YesNo,
    Error,
    Progress,
    License,
    Choose,
    PickFile,
    PickDirectory,
    TextEntry,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Message,
        Operation::YesNo,
        Operation::Error,
        Operation::Progress,
        Operation::License,
        Operation::Choose,
        Operation::PickFile,
        Operation::PickDirectory,
        Operation::TextEntry,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Message => "message",
            Operation::YesNo => "question",
            Operation::Error => "error",
            Operation::Progress => "progress",
            Operation::License => "license",
            Operation::Choose => "choice",
            Operation::PickFile => "file picker",
            Operation::PickDirectory => "directory picker",
            Operation::TextEntry => "text entry",
        };
        f.write_str(name)
    }
}

/// One backend's encoding of every dialog kind
///
/// Every operation defaults to [`DialogError::Unsupported`]; an adapter
/// overrides the ones its tool can express and lists them in `supports`.
/// Unsupported calls never reach the host.
pub trait Adapter {
    fn backend(&self) -> Backend;

    fn supports(&self, operation: Operation) -> bool;

    fn message(&self, _host: &dyn Host, _text: &str, _title: &str) -> Result<bool, DialogError> {
        Err(self.unsupported(Operation::Message))
    }

    fn yes_no(&self, _host: &dyn Host, _text: &str, _title: &str) -> Result<bool, DialogError> {
        Err(self.unsupported(Operation::YesNo))
    }

    fn error(&self, _host: &dyn Host, _text: &str, _title: &str) -> Result<bool, DialogError> {
        Err(self.unsupported(Operation::Error))
    }

    fn progress(&self, _host: &dyn Host, _text: &str, _title: &str) -> Result<bool, DialogError> {
        Err(self.unsupported(Operation::Progress))
    }

    /// Show the text in `file` and ask for acceptance; `file` is known to exist
    fn license(&self, _host: &dyn Host, _file: &Path, _title: &str) -> Result<bool, DialogError> {
        Err(self.unsupported(Operation::License))
    }

    fn choose(
        &self,
        _host: &dyn Host,
        _entries: &[&str],
        _text: &str,
        _title: &str,
    ) -> Result<Option<String>, DialogError> {
        Err(self.unsupported(Operation::Choose))
    }

    fn pick_file(
        &self,
        _host: &dyn Host,
        _filters: &[&str],
        _title: &str,
    ) -> Result<String, DialogError> {
        Err(self.unsupported(Operation::PickFile))
    }

    fn pick_directory(&self, _host: &dyn Host, _title: &str) -> Result<String, DialogError> {
        Err(self.unsupported(Operation::PickDirectory))
    }

    fn text_entry(&self, _host: &dyn Host, _prompt: &str, _title: &str) -> Result<String, DialogError> {
        Err(self.unsupported(Operation::TextEntry))
    }

    fn unsupported(&self, operation: Operation) -> DialogError {
        DialogError::Unsupported {
            backend: self.backend(),
            operation,
        }
    }
}

/// Get the adapter for a backend
pub fn adapter_for(backend: Backend) -> Box<dyn Adapter> {
    match backend {
        Backend::Xmessage => Box::new(xmessage::XmessageAdapter),
        Backend::Zenity => Box::new(zenity::ZenityAdapter),
        Backend::Kdialog => Box::new(kdialog::KdialogAdapter),
        Backend::Macos => Box::new(macos::MacosAdapter),
        Backend::Win32 => Box::new(windows::Win32Adapter),
        Backend::Text => Box::new(text::TextAdapter),
    }
}

/// Run a command for its exit status; spawn failures count as `false`
pub(crate) fn run_status(host: &dyn Host, invocation: &Invocation) -> bool {
    run_output(host, invocation).is_some_and(|c| c.success)
}

/// Run a command for its output; `None` when it could not be started
pub(crate) fn run_output(host: &dyn Host, invocation: &Invocation) -> Option<Completion> {
    match host.run(invocation) {
        Ok(completion) => Some(completion),
        Err(e) => {
            warn!("Failed to launch dialog tool: {}", e);
            None
        }
    }
}

/// The dialog facade
pub struct Dialogs {
    backend: Backend,
    title: String,
    sounds: bool,
    adapter: Box<dyn Adapter>,
    host: Box<dyn Host>,
}

impl Dialogs {
    /// Detect the backend on this machine, honouring the config file and
    /// the `DIALOGBIND_BACKEND` override
    pub fn from_env() -> Result<Self, DialogError> {
        let config = Config::discover()?;
        Self::from_config(&config, Box::new(NativeHost::new()))
    }

    pub fn from_config(config: &Config, host: Box<dyn Host>) -> Result<Self, DialogError> {
        let backend = Probe::from_host(host.as_ref()).resolve(config.backend.as_deref())?;
        Ok(Self::new(backend, host)
            .with_title(&config.title)
            .with_sounds(config.sounds))
    }

    /// Use a known backend without probing
    pub fn new(backend: Backend, host: Box<dyn Host>) -> Self {
        Self {
            backend,
            title: DEFAULT_TITLE.to_string(),
            sounds: true,
            adapter: adapter_for(backend),
            host,
        }
    }

    /// Title used when a call passes `None`
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_sounds(mut self, enabled: bool) -> Self {
        self.sounds = enabled;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Whether the active backend implements `operation`
    pub fn supports(&self, operation: Operation) -> bool {
        self.adapter.supports(operation)
    }

    fn title<'a>(&'a self, title: Option<&'a str>) -> &'a str {
        title.unwrap_or(&self.title)
    }

    /// Show an informational message
    pub fn message(&self, text: &str, title: Option<&str>) -> Result<bool, DialogError> {
        self.adapter.message(self.host.as_ref(), text, self.title(title))
    }

    /// Ask a question; `true` only when the user answered yes
    pub fn yes_no(&self, text: &str, title: Option<&str>) -> Result<bool, DialogError> {
        self.adapter.yes_no(self.host.as_ref(), text, self.title(title))
    }

    pub fn error(&self, text: &str, title: Option<&str>) -> Result<bool, DialogError> {
        self.adapter.error(self.host.as_ref(), text, self.title(title))
    }

    /// Show a buttonless progress box or a notification, depending on the backend
    pub fn progress(&self, text: Option<&str>, title: Option<&str>) -> Result<bool, DialogError> {
        self.adapter.progress(
            self.host.as_ref(),
            text.unwrap_or(DEFAULT_PROGRESS_TEXT),
            self.title(title),
        )
    }

    /// Show the license in `file` and return whether it was accepted
    ///
    /// A missing file is reported to the user with an error dialog and
    /// then answered with `false`.
    pub fn license(&self, file: impl AsRef<Path>, title: Option<&str>) -> Result<bool, DialogError> {
        let file = file.as_ref();
        let title = self.title(title);

        if !self.supports(Operation::License) {
            return Err(self.adapter.unsupported(Operation::License));
        }

        if !file.exists() {
            let text = format!("File \"{}\" does not exist.", file.display());
            self.adapter.error(self.host.as_ref(), &text, title)?;
            return Ok(false);
        }

        self.adapter.license(self.host.as_ref(), file, title)
    }

    /// Let the user pick one of `entries`; `None` when nothing was selected
    pub fn choose(
        &self,
        entries: &[&str],
        text: Option<&str>,
        title: Option<&str>,
    ) -> Result<Option<String>, DialogError> {
        self.adapter.choose(
            self.host.as_ref(),
            entries,
            text.unwrap_or(DEFAULT_CHOICE_TEXT),
            self.title(title),
        )
    }

    /// Pick an existing file; an empty string means the user cancelled
    ///
    /// Each filter is a space-separated pattern list such as `"*.png *.jpg"`.
    pub fn pick_file(&self, filters: &[&str], title: Option<&str>) -> Result<String, DialogError> {
        self.adapter
            .pick_file(self.host.as_ref(), filters, self.title(title))
    }

    pub fn pick_directory(&self, title: Option<&str>) -> Result<String, DialogError> {
        self.adapter
            .pick_directory(self.host.as_ref(), self.title(title))
    }

    /// Read a line of free text
    pub fn text_entry(&self, prompt: Option<&str>, title: Option<&str>) -> Result<String, DialogError> {
        self.adapter.text_entry(
            self.host.as_ref(),
            prompt.unwrap_or(DEFAULT_ENTRY_PROMPT),
            self.title(title),
        )
    }

    /// Best-effort notification sound; never fails
    pub fn play_sound(&self, sound: Sound) {
        if !self.sounds {
            return;
        }
        sound::play(self.host.as_ref(), self.backend, sound);
    }
}
