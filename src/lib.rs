//! tabterm - tab and session lifecycle core for a desktop terminal emulator.
//!
//! tabterm is the state-machine heart of a tabbed terminal window: it
//! decides what command a new tab runs, tracks the live sessions and
//! the focused one, shares font/zoom state across them, applies
//! preference changes atomically, and turns the last tab closing into
//! application shutdown.
//!
//! Rendering, escape-sequence handling, the PTY, and the clipboard all
//! live in an external terminal widget. The core drives that widget
//! through the [`DisplaySurface`] trait and the top-level window
//! through [`WindowHandle`]; a GUI frontend implements both and calls
//! [`TerminalApp`] methods from its event dispatcher.
//!
//! # Quick Start
//!
//! ```no_run
//! use tabterm::TerminalApp;
//! # fn frontend() -> (Box<dyn tabterm::WindowHandle>, Box<dyn tabterm::SurfaceFactory>) { unimplemented!() }
//!
//! let _ = tabterm::logging::init();
//! let (window, factory) = frontend();
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let mut app = TerminalApp::new(&args, window, factory);
//!
//! // Wire toolkit callbacks to app.new_tab(), app.close_tab(id),
//! // app.handle_key(intent), app.apply_preferences(tx), ...
//! // and exit 0 once the state machine terminates:
//! app.new_tab();
//! assert!(app.is_running());
//! ```
//!
//! # Behavior notes
//!
//! - `prog args...` or `-e prog args...` on the command line runs the
//!   program in the first tab as `sh -c "exec prog args... ; exec
//!   <shell>"`, so the tab falls back to an interactive shell when the
//!   program exits or cannot be started.
//! - Zoom (Ctrl +/-/0 in a typical frontend) affects the focused tab
//!   only and is never persisted; committing the preferences dialog
//!   persists the current font and applies it to every tab.

pub mod app;
pub mod config;
pub mod core;
pub mod font;
pub mod logging;
pub mod prefs;
pub mod session;

pub use app::{AppState, KeyIntent, TerminalApp};
pub use config::Settings;
pub use crate::core::spawn::ResolvedCommand;
pub use crate::core::surface::{
    DisplaySurface, SpawnError, SpawnHandle, SurfaceFactory, WindowHandle,
};
pub use font::{FontSpec, FontState};
pub use prefs::{AppliedChanges, PreferencesForm, PreferencesTransaction};
pub use session::{Session, SessionId, SessionRegistry};
