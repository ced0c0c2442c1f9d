//! External capability traits.
//!
//! The surrounding GUI toolkit and the terminal-emulation widget are not
//! part of this crate. The core talks to them through two narrow traits:
//!
//! - [`DisplaySurface`]: one terminal widget per tab (font, spawn,
//!   selection, resize)
//! - [`WindowHandle`]: the single top-level window (opacity, size)
//!
//! A frontend supplies concrete implementations plus a [`SurfaceFactory`]
//! the session registry uses to create one surface per new tab.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("Failed to spawn process: {0}")]
    Failed(String),

    #[error("Surface has no PTY available")]
    NoPty,
}

/// Opaque handle to a child process started through a surface.
///
/// The surface delivers the exit notification asynchronously through the
/// frontend's event dispatcher; this handle only identifies the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnHandle(pub u64);

/// One terminal-rendering widget, owned exclusively by a single session.
pub trait DisplaySurface {
    /// Set the display font.
    fn set_font(&mut self, family: &str, size_pt: f64);

    /// Start a child process behind the surface's PTY.
    ///
    /// Fire-and-forget: returns as soon as the spawn is issued, never
    /// waits on the child. Exit is reported later as an event.
    fn spawn(
        &mut self,
        argv: &[String],
        env: Option<&[(String, String)]>,
        working_dir: Option<&Path>,
    ) -> Result<SpawnHandle, SpawnError>;

    /// Whether the surface currently has a text selection.
    fn has_selection(&self) -> bool;

    /// Copy the current selection to the clipboard.
    fn copy_selection(&mut self);

    /// Feed text to the child as if typed.
    fn paste_text(&mut self, text: &str);

    /// Resize the terminal grid.
    fn resize(&mut self, cols: u16, rows: u16);
}

/// The application's top-level window.
pub trait WindowHandle {
    fn set_opacity(&mut self, opacity: f64);
    fn resize(&mut self, width: i32, height: i32);
}

/// Creates a fresh display surface for each new tab.
pub trait SurfaceFactory {
    fn create(&mut self) -> Box<dyn DisplaySurface>;
}

impl<F> SurfaceFactory for F
where
    F: FnMut() -> Box<dyn DisplaySurface>,
{
    fn create(&mut self) -> Box<dyn DisplaySurface> {
        self()
    }
}
