//! Backend selection from the host environment
//!
//! Detection runs once at startup and walks a fixed priority list,
//! stopping at the first match:
//!
//! | Order | Condition | Backend |
//! |-------|-----------|---------|
//! | 1 | `kdialog` on PATH and `KDE_FULL_SESSION` set | `kdialog` |
//! | 2 | `zenity` on PATH | `zenity` |
//! | 3 | `OS=Windows_NT` | `win32` |
//! | 4 | `uname` prints `Darwin` | `macos` |
//! | 5 | anything else | `text` |
//!
//! `DIALOGBIND_BACKEND` then replaces whatever was detected.

use crate::backend::Backend;
use crate::dialog::DialogError;
use crate::platform::{Host, Invocation};
use std::env;
use tracing::{debug, info};

/// Explicit backend override
pub const OVERRIDE_VAR: &str = "DIALOGBIND_BACKEND";
/// Set by Plasma sessions
pub const KDE_SESSION_VAR: &str = "KDE_FULL_SESSION";
/// `Windows_NT` on every NT-family Windows
pub const OS_VAR: &str = "OS";

/// Snapshot of everything backend detection looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probe {
    pub has_kdialog: bool,
    pub has_zenity: bool,
    pub kde_session: bool,
    pub os: Option<String>,
    pub kernel_name: Option<String>,
    pub override_backend: Option<String>,
}

impl Probe {
    /// Inspect the real system through `host`
    pub fn from_host(host: &dyn Host) -> Self {
        Self::from_env_fn(
            |key| env::var(key),
            |name| host.find_program(name).is_some(),
            || {
                host.run(&Invocation::exec("uname", ["-s"]))
                    .ok()
                    .filter(|c| c.success)
                    .map(|c| c.line())
            },
        )
    }

    /// Build a probe from injected lookups (for testing)
    pub fn from_env_fn<V, P, K>(get_var: V, has_program: P, kernel_name: K) -> Self
    where
        V: Fn(&str) -> Result<String, env::VarError>,
        P: Fn(&str) -> bool,
        K: FnOnce() -> Option<String>,
    {
        let has_kdialog = has_program("kdialog");
        let has_zenity = has_program("zenity");
        let kde_session = get_var(KDE_SESSION_VAR).is_ok();
        let os = get_var(OS_VAR).ok();

        // uname is only worth spawning when nothing earlier matched
        let needs_kernel =
            !(has_kdialog && kde_session) && !has_zenity && os.as_deref() != Some("Windows_NT");
        let kernel_name = if needs_kernel { kernel_name() } else { None };

        Self {
            has_kdialog,
            has_zenity,
            kde_session,
            os,
            kernel_name,
            override_backend: get_var(OVERRIDE_VAR).ok(),
        }
    }

    /// Auto-detected backend, ignoring any override
    pub fn detect(&self) -> Backend {
        if self.has_kdialog && self.kde_session {
            Backend::Kdialog
        } else if self.has_zenity {
            Backend::Zenity
        } else if self.os.as_deref() == Some("Windows_NT") {
            Backend::Win32
        } else if self.kernel_name.as_deref() == Some("Darwin") {
            Backend::Macos
        } else {
            Backend::Text
        }
    }

    /// Final backend: env override, then the configured one, then detection
    ///
    /// Fails with [`DialogError::InvalidConfiguration`] when an override
    /// names something outside [`Backend::SELECTABLE`].
    pub fn resolve(&self, configured: Option<&str>) -> Result<Backend, DialogError> {
        let detected = self.detect();
        debug!("Detected dialog backend: {}", detected);

        let backend = match self.override_backend.as_deref().or(configured) {
            Some(name) => name.parse()?,
            None => detected,
        };

        info!("Using dialog backend: {}", backend);
        Ok(backend)
    }
}
