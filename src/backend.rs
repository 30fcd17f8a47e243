//! Backend identifiers

use crate::dialog::DialogError;
use std::fmt;
use std::str::FromStr;

/// The native dialog mechanism every call is routed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// `xmessage`: a bare X11 window with labelled buttons
    Xmessage,
    /// `zenity`: GTK dialogs driven by keyword flags
    Zenity,
    /// `kdialog`: KDE dialogs
    Kdialog,
    /// AppleScript via `osascript`
    Macos,
    /// Win32 `MessageBoxW` plus generated PowerShell scripts
    Win32,
    /// Plain text on stdout, used when nothing else was found
    Text,
}

impl Backend {
    /// Identifiers accepted by the `DIALOGBIND_BACKEND` override and the config file
    pub const SELECTABLE: [Backend; 5] = [
        Backend::Xmessage,
        Backend::Zenity,
        Backend::Kdialog,
        Backend::Macos,
        Backend::Win32,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Xmessage => "xmessage",
            Backend::Zenity => "zenity",
            Backend::Kdialog => "kdialog",
            Backend::Macos => "macos",
            Backend::Win32 => "win32",
            Backend::Text => "text",
        }
    }

    /// Comma-separated list of the selectable identifiers
    pub fn supported_list() -> String {
        Self::SELECTABLE
            .iter()
            .map(Backend::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| DialogError::InvalidConfiguration {
                value: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("xmessage".parse::<Backend>().unwrap(), Backend::Xmessage);
        assert_eq!("zenity".parse::<Backend>().unwrap(), Backend::Zenity);
        assert_eq!("kdialog".parse::<Backend>().unwrap(), Backend::Kdialog);
        assert_eq!("macos".parse::<Backend>().unwrap(), Backend::Macos);
        assert_eq!("win32".parse::<Backend>().unwrap(), Backend::Win32);
    }

    #[test]
    fn test_text_is_not_selectable() {
        assert!("text".parse::<Backend>().is_err());
        assert!("Zenity".parse::<Backend>().is_err());
    }

    #[test]
    fn test_invalid_backend_lists_supported() {
        let err = "gtk".parse::<Backend>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"gtk\""));
        for backend in Backend::SELECTABLE {
            assert!(msg.contains(backend.as_str()), "missing {} in {}", backend, msg);
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for backend in Backend::SELECTABLE {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
        assert_eq!(Backend::Text.to_string(), "text");
    }
}
