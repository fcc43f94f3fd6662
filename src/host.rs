//! Capabilities the surrounding environment provides to the views.
//!
//! The views never open browsers or touch the clipboard themselves; they ask
//! a [`Host`]. The terminal build uses [`TerminalHost`], tests use a
//! recording fake.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{execute, Command};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

/// A transient notification shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: None,
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: Some(message.into()),
        }
    }
}

pub trait Host {
    /// Open `url` with the system's default browser.
    fn open_in_browser(&mut self, url: &str) -> Result<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;

    fn show_toast(&mut self, toast: Toast);
}

/// OSC 52 "set clipboard" sequence: `ESC ] 52 ; c ; <base64> BEL`.
struct SetClipboard<'a>(&'a str);

impl Command for SetClipboard<'_> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "OSC 52 needs an ANSI terminal",
        ))
    }

    #[cfg(windows)]
    fn is_ansi_code_supported(&self) -> bool {
        true
    }
}

/// How long a toast stays in the status bar.
const TOAST_TTL: Duration = Duration::from_secs(5);

/// [`Host`] backed by the real terminal.
///
/// The clipboard is reached through the OSC 52 escape sequence, which works
/// over SSH and in most modern terminal emulators. The latest toast is kept
/// for the status bar until it expires.
#[derive(Debug, Default)]
pub struct TerminalHost {
    toast: Option<(Toast, Instant)>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest toast, unless it has expired.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < TOAST_TTL)
            .map(|(toast, _)| toast)
    }
}

impl Host for TerminalHost {
    fn open_in_browser(&mut self, url: &str) -> Result<()> {
        info!(url, "opening in browser");
        open::that(url).with_context(|| format!("could not open {url}"))
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, SetClipboard(text))
            .context("could not write to the clipboard")?;
        stdout.flush()?;
        Ok(())
    }

    fn show_toast(&mut self, toast: Toast) {
        match toast.style {
            ToastStyle::Success => info!(title = %toast.title, "toast"),
            ToastStyle::Failure => {
                warn!(title = %toast.title, message = ?toast.message, "failure toast")
            }
        }
        self.toast = Some((toast, Instant::now()));
    }
}
