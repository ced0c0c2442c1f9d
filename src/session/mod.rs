//! Session lifecycle - tabs and the registry that owns them.
//!
//! - **session**: one tab (display surface + spawned process)
//! - **registry**: ordered live sessions, selection, shutdown signal
//!
//! # Module Hierarchy
//!
//! ```text
//! session/
//! ├── mod.rs      - Module exports
//! ├── session.rs  - Session (surface + child process)
//! └── registry.rs - SessionRegistry (tab order + selection)
//! ```

pub mod registry;
pub mod session;

pub use registry::SessionRegistry;
pub use session::{Session, SessionId};
