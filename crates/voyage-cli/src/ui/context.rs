//! What the terminal supports, and the display choices that follow from it.

use std::io::IsTerminal;

use super::mode::OutputMode;
use crate::helpers::OutputFormat;

const DEFAULT_WIDTH: usize = 80;
/// Day blocks and the overview table stop wrapping sensibly below this.
const MIN_WIDTH: usize = 40;

/// Terminal facts captured once per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub stderr_tty: bool,
    /// `TERM=dumb`
    pub dumb: bool,
    /// `NO_COLOR` is set
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    pub fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: columns(),
        }
    }
}

/// Display switches taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFlags {
    pub json: bool,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
    pub ascii: bool,
}

/// Resolved display settings handed to every renderer.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    /// Passphrase and source prompts may be shown
    pub interactive: bool,
    pub color: bool,
    pub unicode: bool,
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    pub fn new(terminal: Terminal, flags: DisplayFlags) -> Self {
        let mode = OutputMode::resolve(flags.json, flags.format, terminal.stdout_tty, terminal.dumb);
        Self {
            is_tty: terminal.stdout_tty,
            // Prompts go to stderr, so piping stdout into `jq` still allows them.
            interactive: terminal.stdin_tty && terminal.stderr_tty,
            color: mode.is_pretty() && !flags.no_color && !terminal.no_color,
            unicode: !flags.ascii && !terminal.dumb,
            width: terminal.columns.unwrap_or(DEFAULT_WIDTH).max(MIN_WIDTH),
            mode,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The unlock spinner only animates in pretty output.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

fn columns() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ fills the winsize on success.
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            // SAFETY: the ioctl succeeded.
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(usize::from(ws.ws_col));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal() -> Terminal {
        Terminal {
            stdout_tty: true,
            stdin_tty: true,
            stderr_tty: true,
            columns: Some(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_terminal_gets_pretty_color_output() {
        let ctx = UiContext::new(terminal(), DisplayFlags::default());
        assert_eq!(ctx.mode, OutputMode::Pretty);
        assert!(ctx.color);
        assert!(ctx.unicode);
        assert!(ctx.is_interactive());
        assert!(ctx.allows_animation());
        assert_eq!(ctx.width, 100);
    }

    #[test]
    fn test_piped_stdout_is_plain_but_can_prompt() {
        let piped = Terminal {
            stdout_tty: false,
            ..terminal()
        };
        let ctx = UiContext::new(piped, DisplayFlags::default());
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert!(!ctx.color);
        assert!(!ctx.allows_animation());
        assert!(ctx.is_interactive());
    }

    #[test]
    fn test_no_stdin_disables_prompts() {
        let ctx = UiContext::new(
            Terminal {
                stdin_tty: false,
                ..terminal()
            },
            DisplayFlags::default(),
        );
        assert!(!ctx.is_interactive());
    }

    #[test]
    fn test_json_flag_wins() {
        let flags = DisplayFlags {
            json: true,
            format: Some(OutputFormat::Pretty),
            ..Default::default()
        };
        let ctx = UiContext::new(terminal(), flags);
        assert_eq!(ctx.mode, OutputMode::Json);
        assert!(!ctx.color);
    }

    #[test]
    fn test_no_color_from_flag_or_env() {
        let flag = DisplayFlags {
            no_color: true,
            ..Default::default()
        };
        assert!(!UiContext::new(terminal(), flag).color);

        let env = Terminal {
            no_color: true,
            ..terminal()
        };
        assert!(!UiContext::new(env, DisplayFlags::default()).color);
    }

    #[test]
    fn test_dumb_terminal_is_plain_ascii() {
        let dumb = Terminal {
            dumb: true,
            ..terminal()
        };
        let ctx = UiContext::new(dumb, DisplayFlags::default());
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert!(!ctx.unicode);
    }

    #[test]
    fn test_width_default_and_floor() {
        let unknown = Terminal {
            columns: None,
            ..terminal()
        };
        assert_eq!(UiContext::new(unknown, DisplayFlags::default()).width, 80);

        let narrow = Terminal {
            columns: Some(20),
            ..terminal()
        };
        assert_eq!(UiContext::new(narrow, DisplayFlags::default()).width, 40);
    }
}
