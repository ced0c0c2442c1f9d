//! Core capability seam and spawn policy.
//!
//! This module holds what the rest of the crate builds on:
//!
//! - **surface**: traits for the external terminal widget and window
//! - **spawn**: startup-argument resolution into a session command
//!
//! # Architecture
//!
//! ```text
//! TerminalApp
//! ├── WindowHandle (external window: opacity, size)
//! └── SessionRegistry
//!     └── Session
//!         └── DisplaySurface (external widget: font, spawn, selection)
//! ```

pub mod spawn;
pub mod surface;

pub use spawn::{ResolvedCommand, DEFAULT_SHELL};
pub use surface::{DisplaySurface, SpawnError, SpawnHandle, SurfaceFactory, WindowHandle};
