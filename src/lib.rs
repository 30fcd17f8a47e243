//! DialogBind - native dialogs without caring which toolkit is installed
//!
//! The backend (xmessage, zenity, kdialog, AppleScript, Win32 or plain
//! text) is picked once from the host environment, and every dialog call
//! is routed through it.
//!
//! # Architecture
//!
//! - `backend`: backend identifiers
//! - `probe`: backend detection and the `DIALOGBIND_BACKEND` override
//! - `config`: optional TOML configuration
//! - `dialog`: the [`Dialogs`] facade and one adapter per backend
//! - `sound`: best-effort notification sounds
//! - `platform`: process execution and the Win32 message box
//!
//! # Usage
//!
//! ```no_run
//! use dialogbind::Dialogs;
//!
//! let dialogs = Dialogs::from_env()?;
//! if dialogs.yes_no("Delete the old backups?", None)? {
//!     dialogs.message("Done.", Some("Cleanup"))?;
//! }
//! # Ok::<(), dialogbind::DialogError>(())
//! ```

pub mod backend;
pub mod config;
pub mod dialog;
pub mod platform;
pub mod probe;
pub mod sound;

pub use backend::Backend;
pub use config::Config;
pub use dialog::{DialogError, Dialogs, Operation};
pub use sound::Sound;
