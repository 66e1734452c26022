//! Best-effort notifications on playback transitions 🔔
//!
//! Every notification is shown as an in-app toast; terminals that understand
//! desktop-notification escapes also get a system notification. Nothing in
//! here may fail the caller: errors are logged and dropped.

use crate::player::TransportEvent;
use anyhow::Result;
use std::io::Write;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub const APP_TITLE: &str = "Aurora Music Player";
pub const ICON: &str = "audio-x-generic";
/// How long a notification stays up unless clicked.
pub const DISPLAY_TIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Unique per notification so distinct ones never collapse.
    pub tag: String,
}

impl Notification {
    pub fn new(body: String) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self {
            title: APP_TITLE.to_string(),
            body,
            icon: ICON.to_string(),
            tag: format!("aurora-music-{}", millis),
        }
    }
}

/// Message text for a transport transition.
pub fn message_for(event: &TransportEvent) -> String {
    match event {
        TransportEvent::Loading(track) => format!(
            "🎵 New Track\n{}\nby {}",
            track.display_title(),
            track.display_artist()
        ),
        TransportEvent::Started(track) => format!(
            "▶️ Now Playing\n{}\nby {}",
            track.display_title(),
            track.display_artist()
        ),
        TransportEvent::Paused(track) => format!("⏸️ Paused\n{}", track.display_title()),
    }
}

/// A platform notification facility.
pub trait NotificationBackend: Send {
    fn request_permission(&mut self) -> Permission;
    fn show(&mut self, notification: &Notification) -> Result<()>;
}

/// Desktop notifications through terminal escape sequences (OSC 9 / OSC 777).
pub struct TerminalBackend<W: Write + Send> {
    out: W,
    flavor: Option<OscFlavor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscFlavor {
    /// iTerm2 style, body only
    Osc9,
    /// rxvt/foot/WezTerm style, title and body
    Osc777,
}

impl OscFlavor {
    /// Guess from the terminal's environment.
    pub fn detect() -> Option<Self> {
        let program = std::env::var("TERM_PROGRAM").unwrap_or_default();
        let term = std::env::var("TERM").unwrap_or_default();
        match program.as_str() {
            "iTerm.app" => Some(Self::Osc9),
            "WezTerm" | "ghostty" => Some(Self::Osc777),
            _ if term.starts_with("foot") || term.starts_with("rxvt") => Some(Self::Osc777),
            _ => None,
        }
    }
}

impl<W: Write + Send> TerminalBackend<W> {
    pub fn new(out: W, flavor: Option<OscFlavor>) -> Self {
        Self { out, flavor }
    }
}

/// Escape payloads may not carry control characters or field separators.
fn osc_field(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
        .replace(';', ",")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

impl<W: Write + Send> NotificationBackend for TerminalBackend<W> {
    fn request_permission(&mut self) -> Permission {
        if self.flavor.is_some() {
            Permission::Granted
        } else {
            Permission::Unsupported
        }
    }

    fn show(&mut self, notification: &Notification) -> Result<()> {
        let Some(flavor) = self.flavor else {
            anyhow::bail!("terminal has no notification support");
        };
        let seq = match flavor {
            OscFlavor::Osc9 => format!("\x1b]9;{}\x07", osc_field(&notification.body)),
            OscFlavor::Osc777 => format!(
                "\x1b]777;notify;{};{}\x07",
                osc_field(&notification.title),
                osc_field(&notification.body)
            ),
        };
        self.out.write_all(seq.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// The notification currently on screen.
#[derive(Debug, Clone)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub shown_at: Instant,
    pub deadline: Instant,
}

pub struct Notifier {
    enabled: bool,
    permission: Permission,
    desktop: Option<Box<dyn NotificationBackend>>,
    active: Option<ActiveNotification>,
}

impl Notifier {
    pub fn new(enabled: bool, desktop: Option<Box<dyn NotificationBackend>>) -> Self {
        Self {
            enabled,
            permission: Permission::Unsupported,
            desktop,
            active: None,
        }
    }

    /// Asked once at startup.
    pub fn request_permission(&mut self) -> Permission {
        self.permission = if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        };

        if self.permission == Permission::Granted {
            if let Some(backend) = self.desktop.as_mut() {
                let desktop = backend.request_permission();
                if desktop != Permission::Granted {
                    debug!(?desktop, "Desktop notifications unavailable, using in-app toasts");
                    self.desktop = None;
                }
            }
        }

        info!(permission = ?self.permission, desktop = self.desktop.is_some(), "Notification permission");
        self.permission
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn active(&self) -> Option<&ActiveNotification> {
        self.active.as_ref()
    }

    pub fn notify(&mut self, event: &TransportEvent) {
        self.notify_message(message_for(event));
    }

    pub fn notify_message(&mut self, body: String) {
        if self.permission != Permission::Granted {
            return;
        }
        let notification = Notification::new(body);

        if let Some(backend) = self.desktop.as_mut() {
            if let Err(e) = backend.show(&notification) {
                warn!(error = %e, "Notification error");
            }
        }

        let now = Instant::now();
        self.active = Some(ActiveNotification {
            notification,
            shown_at: now,
            deadline: now + DISPLAY_TIME,
        });
    }

    /// Closes the notification once its display time is over.
    pub fn on_tick(&mut self, now: Instant) {
        if self.active.as_ref().is_some_and(|a| now >= a.deadline) {
            self.active = None;
        }
    }

    /// Click on the notification.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.active.take().map(|a| a.notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Track;

    fn track() -> Track {
        let mut t = Track::new("song.mp3");
        t.metadata.artist = Some("Artist".to_string());
        t
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            message_for(&TransportEvent::Loading(track())),
            "🎵 New Track\nsong\nby Artist"
        );
        assert_eq!(
            message_for(&TransportEvent::Started(track())),
            "▶️ Now Playing\nsong\nby Artist"
        );
        assert_eq!(
            message_for(&TransportEvent::Paused(track())),
            "⏸️ Paused\nsong"
        );
    }

    #[test]
    fn test_denied_does_nothing() {
        let mut notifier = Notifier::new(false, None);
        assert_eq!(notifier.request_permission(), Permission::Denied);
        notifier.notify(&TransportEvent::Started(track()));
        assert!(notifier.active().is_none());
    }

    #[test]
    fn test_toast_expires_after_display_time() {
        let mut notifier = Notifier::new(true, None);
        notifier.request_permission();
        notifier.notify(&TransportEvent::Started(track()));
        let shown = notifier.active().unwrap().shown_at;

        notifier.on_tick(shown + Duration::from_secs(4));
        assert!(notifier.active().is_some());
        notifier.on_tick(shown + DISPLAY_TIME);
        assert!(notifier.active().is_none());
    }

    #[test]
    fn test_dismiss_on_click() {
        let mut notifier = Notifier::new(true, None);
        notifier.request_permission();
        notifier.notify(&TransportEvent::Paused(track()));
        let dismissed = notifier.dismiss().unwrap();
        assert!(dismissed.tag.starts_with("aurora-music-"));
        assert!(notifier.active().is_none());
    }

    #[test]
    fn test_osc777_sequence() {
        let mut backend = TerminalBackend::new(Vec::new(), Some(OscFlavor::Osc777));
        assert_eq!(backend.request_permission(), Permission::Granted);
        let n = Notification::new("⏸️ Paused\na;b".to_string());
        backend.show(&n).unwrap();
        let out = String::from_utf8(backend.out).unwrap();
        assert_eq!(
            out,
            "\x1b]777;notify;Aurora Music Player;⏸️ Paused · a,b\x07"
        );
    }

    #[test]
    fn test_unsupported_terminal_falls_back_to_toast() {
        let backend = TerminalBackend::new(Vec::new(), None);
        let mut notifier = Notifier::new(true, Some(Box::new(backend)));
        assert_eq!(notifier.request_permission(), Permission::Granted);
        notifier.notify(&TransportEvent::Started(track()));
        assert!(notifier.active().is_some());
    }

    struct FailingBackend;

    impl NotificationBackend for FailingBackend {
        fn request_permission(&mut self) -> Permission {
            Permission::Granted
        }
        fn show(&mut self, _: &Notification) -> Result<()> {
            anyhow::bail!("broken pipe")
        }
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let mut notifier = Notifier::new(true, Some(Box::new(FailingBackend)));
        notifier.request_permission();
        notifier.notify(&TransportEvent::Started(track()));
        assert!(notifier.active().is_some());
    }
}
