//! Notification sounds
//!
//! A [`Sound`] maps to a stock sound file of the desktop behind the active
//! backend, falling back to a second file when the first is missing. The
//! file is handed to the first audio player found on PATH, or to the
//! platform's default opener when there is none. Playback is best effort:
//! nothing here ever reports an error to the caller.

use crate::backend::Backend;
use crate::platform::{Host, Invocation};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const FREEDESKTOP_DIR: &str = "/usr/share/sounds/freedesktop/stereo";
const KDE_DIR: &str = "/usr/share/sounds";
const MACOS_DIR: &str = "/System/Library/Sounds";
const WINDOWS_DIR: &str = r"C:\Windows\Media";

/// Players tried in order; each with the flags it needs to play and exit quietly
const PLAYERS: &[(&str, &[&str])] = &[
    ("paplay", &[]),
    ("pw-play", &[]),
    ("aplay", &["-q"]),
    ("ogg123", &["-q"]),
    ("mpv", &["--no-video", "--really-quiet"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("afplay", &[]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    None,
    Success,
    Error,
    Attention,
}

impl FromStr for Sound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Sound::None),
            "success" => Ok(Sound::Success),
            "error" => Ok(Sound::Error),
            "attention" => Ok(Sound::Attention),
            _ => Err(format!("unknown sound: {}", s)),
        }
    }
}

/// Directory holding the sound theme used with `backend`
fn sound_dir(backend: Backend) -> &'static str {
    match backend {
        Backend::Kdialog => KDE_DIR,
        Backend::Macos => MACOS_DIR,
        Backend::Win32 => WINDOWS_DIR,
        Backend::Text if cfg!(target_os = "macos") => MACOS_DIR,
        Backend::Text if cfg!(windows) => WINDOWS_DIR,
        Backend::Xmessage | Backend::Zenity | Backend::Text => FREEDESKTOP_DIR,
    }
}

/// File names in preference order
fn file_names(dir: &str, sound: Sound) -> &'static [&'static str] {
    match (dir, sound) {
        (_, Sound::None) => &[],
        (KDE_DIR, Sound::Success) => &["Oxygen-Sys-App-Positive.ogg", "freedesktop/stereo/complete.oga"],
        (KDE_DIR, Sound::Error) => &["Oxygen-Sys-App-Error.ogg", "freedesktop/stereo/dialog-error.oga"],
        (KDE_DIR, Sound::Attention) => &["Oxygen-Sys-Warning.ogg", "freedesktop/stereo/bell.oga"],
        (MACOS_DIR, Sound::Success) => &["Glass.aiff", "Hero.aiff"],
        (MACOS_DIR, Sound::Error) => &["Basso.aiff", "Sosumi.aiff"],
        (MACOS_DIR, Sound::Attention) => &["Ping.aiff", "Funk.aiff"],
        (WINDOWS_DIR, Sound::Success) => &["tada.wav", "Windows Notify.wav"],
        (WINDOWS_DIR, Sound::Error) => &["Windows Critical Stop.wav", "chord.wav"],
        (WINDOWS_DIR, Sound::Attention) => &["Windows Exclamation.wav", "ding.wav"],
        (_, Sound::Success) => &["complete.oga", "message.oga"],
        (_, Sound::Error) => &["dialog-error.oga", "bell.oga"],
        (_, Sound::Attention) => &["dialog-warning.oga", "bell.oga"],
    }
}

/// Candidate asset paths for `sound`, preferred first
pub fn asset_candidates(backend: Backend, sound: Sound) -> Vec<PathBuf> {
    let dir = sound_dir(backend);
    file_names(dir, sound)
        .iter()
        .map(|name| Path::new(dir).join(name))
        .collect()
}

/// First candidate that exists according to `exists`
pub fn resolve_asset<F>(backend: Backend, sound: Sound, exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if !exists(Path::new(sound_dir(backend))) {
        return None;
    }
    asset_candidates(backend, sound)
        .into_iter()
        .find(|path| exists(path))
}

fn player_invocation(host: &dyn Host, backend: Backend, asset: &Path) -> Invocation {
    let asset = asset.to_string_lossy().to_string();

    for (player, flags) in PLAYERS {
        if host.find_program(player).is_some() {
            let args = flags
                .iter()
                .map(|f| f.to_string())
                .chain(std::iter::once(asset));
            return Invocation::exec(player, args);
        }
    }

    match backend {
        Backend::Win32 => Invocation::exec("cmd", ["/C".to_string(), "start".to_string(), String::new(), asset]),
        Backend::Macos => Invocation::exec("open", [asset]),
        _ => Invocation::exec("xdg-open", [asset]),
    }
}

/// Play `sound` for `backend`, looking assets up on the real filesystem
pub fn play(host: &dyn Host, backend: Backend, sound: Sound) {
    play_with(host, backend, sound, Path::exists);
}

fn play_with<F>(host: &dyn Host, backend: Backend, sound: Sound, exists: F)
where
    F: Fn(&Path) -> bool,
{
    if sound == Sound::None {
        return;
    }

    let Some(asset) = resolve_asset(backend, sound, exists) else {
        debug!("No sound asset for {:?} on {}", sound, backend);
        return;
    };

    let invocation = player_invocation(host, backend, &asset);
    match host.run(&invocation) {
        Ok(c) if !c.success => debug!("Sound player exited with {:?}", c.code),
        Ok(_) => {}
        Err(e) => debug!("Failed to play {}: {}", asset.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::FakeHost;

    fn all_exist(_: &Path) -> bool {
        true
    }

    #[test]
    fn test_sound_parse() {
        assert_eq!("none".parse::<Sound>().unwrap(), Sound::None);
        assert_eq!("attention".parse::<Sound>().unwrap(), Sound::Attention);
        assert!("loud".parse::<Sound>().is_err());
    }

    #[test]
    fn test_candidates_per_backend() {
        let zenity = asset_candidates(Backend::Zenity, Sound::Error);
        assert_eq!(
            zenity,
            vec![
                PathBuf::from("/usr/share/sounds/freedesktop/stereo/dialog-error.oga"),
                PathBuf::from("/usr/share/sounds/freedesktop/stereo/bell.oga"),
            ]
        );

        let kde = asset_candidates(Backend::Kdialog, Sound::Success);
        assert_eq!(kde[0], PathBuf::from("/usr/share/sounds/Oxygen-Sys-App-Positive.ogg"));

        let mac = asset_candidates(Backend::Macos, Sound::Attention);
        assert_eq!(mac[0], PathBuf::from("/System/Library/Sounds/Ping.aiff"));

        assert!(asset_candidates(Backend::Zenity, Sound::None).is_empty());
    }

    #[test]
    fn test_resolve_falls_back() {
        let preferred = PathBuf::from("/System/Library/Sounds/Basso.aiff");
        let resolved = resolve_asset(Backend::Macos, Sound::Error, |p| p != preferred);
        assert_eq!(resolved, Some(PathBuf::from("/System/Library/Sounds/Sosumi.aiff")));
    }

    #[test]
    fn test_resolve_needs_sound_dir() {
        let resolved = resolve_asset(Backend::Zenity, Sound::Success, |p| {
            p != Path::new(FREEDESKTOP_DIR)
        });
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_none_is_silent() {
        let host = FakeHost::with_programs(&["paplay"]);
        play_with(&host, Backend::Zenity, Sound::None, all_exist);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_missing_asset_is_silent() {
        let host = FakeHost::with_programs(&["paplay"]);
        play_with(&host, Backend::Zenity, Sound::Success, |_| false);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_first_available_player_wins() {
        let host = FakeHost::with_programs(&["mpv", "aplay"]);
        play_with(&host, Backend::Zenity, Sound::Success, all_exist);
        assert_eq!(
            host.runs(),
            vec![Invocation::exec(
                "aplay",
                ["-q", "/usr/share/sounds/freedesktop/stereo/complete.oga"]
            )]
        );
    }

    #[test]
    fn test_falls_back_to_opener() {
        let host = FakeHost::new();
        play_with(&host, Backend::Macos, Sound::Success, all_exist);
        assert_eq!(
            host.runs(),
            vec![Invocation::exec("open", ["/System/Library/Sounds/Glass.aiff"])]
        );

        let host = FakeHost::new();
        play_with(&host, Backend::Xmessage, Sound::Attention, all_exist);
        assert!(matches!(
            host.runs().as_slice(),
            [Invocation::Exec { program, .. }] if program == "xdg-open"
        ));
    }

    #[test]
    fn test_player_failure_is_swallowed() {
        let host = FakeHost::with_programs(&["paplay"]);
        host.push(false, 1, "");
        play_with(&host, Backend::Zenity, Sound::Error, all_exist);
        assert_eq!(host.runs().len(), 1);
    }
}
