//! Session registry - ordered collection of live tabs.
//!
//! Insertion order is tab order. The registry owns session creation
//! (surface from the factory, process spawn, initial font), removal
//! with selection reparenting, and the one-shot "all sessions closed"
//! signal that drives application shutdown.

use tracing::{info, warn};

use crate::core::spawn::ResolvedCommand;
use crate::core::surface::SurfaceFactory;
use crate::font::FontState;

use super::session::{Session, SessionId};

/// Ordered collection of live sessions plus the current selection.
pub struct SessionRegistry {
    /// Live sessions in tab order
    sessions: Vec<Session>,
    /// Index of the current (focused) session; meaningless when empty
    current: usize,
    /// Next session ID
    next_id: u64,
    /// Creates one display surface per new tab
    factory: Box<dyn SurfaceFactory>,
    /// Shell for new tabs and the exec fallback
    shell: String,
    /// Whether the empty-registry shutdown signal has already fired
    shutdown_signaled: bool,
}

impl SessionRegistry {
    pub fn new(factory: Box<dyn SurfaceFactory>, shell: String) -> Self {
        Self {
            sessions: Vec::new(),
            current: 0,
            next_id: 1,
            factory,
            shell,
            shutdown_signaled: false,
        }
    }

    /// Create a session: new surface, spawned process, current font
    /// applied, appended to tab order and made current.
    pub fn add(&mut self, command: ResolvedCommand, font: &FontState) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;

        let surface = self.factory.create();
        let mut session = Session::new(id, surface, command);
        session.spawn(&self.shell);
        font.apply_or_fallback(session.surface_mut());

        self.sessions.push(session);
        self.current = self.sessions.len() - 1;

        info!("Session {} opened ({} tabs)", id, self.sessions.len());
        id
    }

    /// Remove a session, reparenting the selection to a neighboring
    /// tab when the removed one was current.
    ///
    /// Returns `true` exactly once in the registry's lifetime: on the
    /// transition from one session to none, the application's sole
    /// normal-exit trigger.
    pub fn remove(&mut self, id: SessionId) -> bool {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            warn!("Cannot remove unknown session {}", id);
            return false;
        };

        let mut session = self.sessions.remove(index);
        session.close();
        info!("Session {} closed ({} tabs left)", id, self.sessions.len());

        if self.sessions.is_empty() {
            self.current = 0;
            if !self.shutdown_signaled {
                self.shutdown_signaled = true;
                info!("All sessions closed");
                return true;
            }
            return false;
        }

        if index < self.current {
            // Selection keeps pointing at the same session
            self.current -= 1;
        } else if self.current >= self.sessions.len() {
            // Current was the removed last tab, select its left neighbor
            self.current = self.sessions.len() - 1;
        }
        false
    }

    /// The focused session, or none when the registry is empty.
    pub fn current(&self) -> Option<SessionId> {
        self.sessions.get(self.current).map(|s| s.id)
    }

    pub fn current_session_mut(&mut self) -> Option<&mut Session> {
        self.sessions.get_mut(self.current)
    }

    /// Make a session current. Unknown ids are ignored.
    pub fn select(&mut self, id: SessionId) {
        match self.sessions.iter().position(|s| s.id == id) {
            Some(index) => self.current = index,
            None => warn!("Cannot select unknown session {}", id),
        }
    }

    /// Cycle selection to the next tab in order.
    pub fn select_next(&mut self) {
        if !self.sessions.is_empty() {
            self.current = (self.current + 1) % self.sessions.len();
        }
    }

    /// Cycle selection to the previous tab in order.
    pub fn select_prev(&mut self) {
        if !self.sessions.is_empty() {
            self.current = if self.current == 0 {
                self.sessions.len() - 1
            } else {
                self.current - 1
            };
        }
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Session> {
        self.sessions.iter_mut()
    }

    /// Session ids in tab order.
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|s| s.id).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
