//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    ///
    /// Color is disabled by `NO_COLOR`, `--no-color`, `TERM=dumb` or a
    /// non-TTY stdout. Unicode is disabled by `--ascii`.
    pub fn from_env(
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            color: is_tty && !no_color_flag && !no_color_env && !term_is_dumb,
            unicode: !ascii_flag,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, format_flag, is_tty, term_is_dumb),
        }
    }

    /// Fixed plain context, independent of the environment.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }
}

/// Get terminal width from `COLUMNS` or the TTY, if either is available.
fn terminal_width() -> Option<usize> {
    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 {
                return Some(width);
            }
        }
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize buffer.
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            // SAFETY: ioctl returned success, so winsize was filled in.
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
