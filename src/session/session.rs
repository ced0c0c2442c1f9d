//! Session - one tab: a display surface bound to one spawned process

use std::fmt;

use tracing::{debug, warn};

use crate::core::spawn::ResolvedCommand;
use crate::core::surface::{DisplaySurface, SpawnHandle};

/// Unique identifier for a session (tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tab owning its display surface and the child behind it.
pub struct Session {
    /// Unique identifier
    pub id: SessionId,
    /// Command the session was created with
    pub command: ResolvedCommand,
    /// Exclusively owned display surface
    surface: Box<dyn DisplaySurface>,
    /// Handle of the spawned child, if the spawn succeeded
    child: Option<SpawnHandle>,
    /// Whether the session has been closed
    closed: bool,
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        surface: Box<dyn DisplaySurface>,
        command: ResolvedCommand,
    ) -> Self {
        Self {
            id,
            command,
            surface,
            child: None,
            closed: false,
        }
    }

    /// Spawn the session's process, fire-and-forget.
    ///
    /// A failed spawn of an explicit command retries with the plain
    /// shell so the tab stays usable; only a failed shell spawn leaves
    /// the session without a child.
    pub(crate) fn spawn(&mut self, shell: &str) {
        let argv = self.command.spawn_argv(shell);
        match self.surface.spawn(&argv, None, None) {
            Ok(handle) => {
                debug!("Session {} spawned {:?}", self.id, argv);
                self.child = Some(handle);
            }
            Err(e) if !matches!(self.command, ResolvedCommand::Shell) => {
                warn!(
                    "Session {}: spawn failed ({}), falling back to {}",
                    self.id, e, shell
                );
                let fallback = ResolvedCommand::Shell.spawn_argv(shell);
                match self.surface.spawn(&fallback, None, None) {
                    Ok(handle) => self.child = Some(handle),
                    Err(e) => warn!("Session {}: shell fallback failed: {}", self.id, e),
                }
            }
            Err(e) => warn!("Session {}: shell spawn failed: {}", self.id, e),
        }
    }

    pub fn surface(&self) -> &dyn DisplaySurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn DisplaySurface {
        self.surface.as_mut()
    }

    pub fn child(&self) -> Option<SpawnHandle> {
        self.child
    }

    /// Mark the session closed. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
