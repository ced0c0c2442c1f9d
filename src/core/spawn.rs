//! Spawn-command resolution.
//!
//! Decides what a new session runs from the startup argument vector:
//! an interactive shell, an explicit command, or an explicit command
//! with a fallback shell once it exits.

/// Default shell when the settings file names none.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// The decided command for a new session. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    /// Interactive shell, no arguments.
    Shell,
    /// Explicit command; execution falls back to a shell on exit.
    Exec(Vec<String>),
    /// Explicit command followed by an interactive shell in the same
    /// session. `Exec` launches with these semantics already; the
    /// variant exists for callers that want the fallback spelled out.
    ExecThenShell(Vec<String>),
}

impl ResolvedCommand {
    /// Resolve the startup argument vector (`argv[1..]`).
    ///
    /// - empty → `Shell`
    /// - `-e` with nothing after it → `Shell`
    /// - `-e CMD ARGS...` → `Exec([CMD, ARGS...])`
    /// - anything else → the whole vector as `Exec`
    pub fn resolve(args: &[String]) -> Self {
        match args.first().map(String::as_str) {
            None => Self::Shell,
            Some("-e") => {
                if args.len() > 1 {
                    Self::Exec(args[1..].to_vec())
                } else {
                    Self::Shell
                }
            }
            Some(_) => Self::Exec(args.to_vec()),
        }
    }

    /// Build the argv actually handed to the display surface.
    ///
    /// Explicit commands are wrapped as
    /// `sh -c "exec <argv> ; exec <shell>"` so the tab drops into an
    /// interactive shell when the command exits or cannot be started,
    /// instead of closing.
    pub fn spawn_argv(&self, shell: &str) -> Vec<String> {
        match self {
            Self::Shell => vec![shell.to_string()],
            Self::Exec(argv) | Self::ExecThenShell(argv) => vec![
                "sh".to_string(),
                "-c".to_string(),
                format!("exec {} ; exec {}", argv.join(" "), shell),
            ],
        }
    }
}
