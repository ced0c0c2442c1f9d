//! Application orchestration.
//!
//! [`TerminalApp`] composes the registry, font state, settings, and the
//! window capability, and is driven by the frontend's event dispatcher:
//! every callback the toolkit wires up (new-tab button, tab close,
//! key combos, preference dialog buttons, child-exit notifications)
//! lands on one of the methods here. All mutation happens through this
//! type on the dispatcher's single thread, in event-arrival order.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Settings;
use crate::core::spawn::ResolvedCommand;
use crate::core::surface::{SurfaceFactory, WindowHandle};
use crate::font::FontState;
use crate::prefs::{AppliedChanges, PreferencesForm, PreferencesTransaction};
use crate::session::{SessionId, SessionRegistry};

/// Application lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// At least one session is open
    Running,
    /// The last session closed; the embedder should exit with code 0
    Terminating,
}

/// Keyboard intents the frontend routes to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyIntent {
    /// Copy the focused surface's selection
    Copy,
    /// Paste clipboard text into the focused surface
    Paste(String),
    /// Grow the font one point on the focused surface
    ZoomIn,
    /// Shrink the font one point on the focused surface
    ZoomOut,
    /// Reset the font to the default on the focused surface
    ResetZoom,
}

/// Top-level orchestrator owning all mutable core state.
pub struct TerminalApp {
    registry: SessionRegistry,
    font: FontState,
    settings: Settings,
    settings_path: Option<PathBuf>,
    window: Box<dyn WindowHandle>,
    state: AppState,
}

impl TerminalApp {
    /// Build the application from startup arguments (`argv[1..]`),
    /// loading persisted settings from the default location.
    ///
    /// Sizes the window from settings and opens the first tab with the
    /// command the arguments resolve to.
    pub fn new(
        args: &[String],
        window: Box<dyn WindowHandle>,
        factory: Box<dyn SurfaceFactory>,
    ) -> Self {
        Self::with_settings(args, Settings::load(), Settings::default_path(), window, factory)
    }

    /// Build the application with explicit settings and persistence
    /// location (`None` disables persistence).
    pub fn with_settings(
        args: &[String],
        settings: Settings,
        settings_path: Option<PathBuf>,
        mut window: Box<dyn WindowHandle>,
        factory: Box<dyn SurfaceFactory>,
    ) -> Self {
        window.resize(settings.window_width, settings.window_height);
        window.set_opacity(settings.opacity);

        let font = FontState::new(&settings.font_family);
        let registry = SessionRegistry::new(factory, settings.shell().to_string());

        let mut app = Self {
            registry,
            font,
            settings,
            settings_path,
            window,
            state: AppState::Running,
        };

        let command = ResolvedCommand::resolve(args);
        info!("Starting with {:?}", command);
        app.registry.add(command, &app.font);
        app
    }

    /// Open a new interactive-shell tab and select it.
    pub fn new_tab(&mut self) -> SessionId {
        self.registry.add(ResolvedCommand::Shell, &self.font)
    }

    /// Close a tab; closing the last one begins application shutdown.
    pub fn close_tab(&mut self, id: SessionId) {
        if self.registry.remove(id) {
            info!("Last session closed, terminating");
            self.state = AppState::Terminating;
        }
    }

    /// A surface reported its child exited; the tab closes with it.
    pub fn child_exited(&mut self, id: SessionId) {
        if let Some(session) = self.registry.get_mut(id) {
            session.close();
        }
        self.close_tab(id);
    }

    pub fn select_tab(&mut self, id: SessionId) {
        self.registry.select(id);
    }

    pub fn next_tab(&mut self) {
        self.registry.select_next();
    }

    pub fn prev_tab(&mut self) {
        self.registry.select_prev();
    }

    /// Route a keyboard intent to the focused session. Never alters
    /// registry membership.
    pub fn handle_key(&mut self, intent: KeyIntent) {
        let Some(session) = self.registry.current_session_mut() else {
            warn!("No focused session for {:?}", intent);
            return;
        };

        match intent {
            KeyIntent::Copy => {
                if session.surface().has_selection() {
                    session.surface_mut().copy_selection();
                }
            }
            KeyIntent::Paste(text) => session.surface_mut().paste_text(&text),
            KeyIntent::ZoomIn => {
                if self.font.zoom_in() {
                    self.font.apply_to(session.surface_mut());
                }
            }
            KeyIntent::ZoomOut => {
                if self.font.zoom_out() {
                    self.font.apply_to(session.surface_mut());
                }
            }
            KeyIntent::ResetZoom => {
                self.font.reset();
                self.font.apply_to(session.surface_mut());
            }
        }
    }

    /// Seed a preferences dialog from the current state.
    pub fn open_preferences(&self) -> PreferencesForm {
        PreferencesForm {
            font: self.font.as_str().to_string(),
            width: self.settings.window_width.to_string(),
            height: self.settings.window_height.to_string(),
            opacity: self.settings.opacity,
        }
    }

    /// Commit a staged preferences transaction. Cancelling a dialog is
    /// simply never calling this.
    pub fn apply_preferences(&mut self, tx: PreferencesTransaction) -> AppliedChanges {
        tx.commit(
            &mut self.font,
            &mut self.settings,
            self.settings_path.as_deref(),
            &mut self.registry,
            self.window.as_mut(),
        )
    }

    /// Live preview from the opacity control: a direct pass-through to
    /// the window, outside any transaction and without validation.
    pub fn preview_opacity(&mut self, opacity: f64) {
        self.window.set_opacity(opacity);
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AppState::Running
    }

    pub fn font(&self) -> &FontState {
        &self.font
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::testing::{FakeFactory, FakeWindow, SurfaceCall};

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn app_with(
        startup: &[&str],
    ) -> (
        TerminalApp,
        std::rc::Rc<std::cell::RefCell<crate::core::surface::testing::FactoryProbe>>,
        std::rc::Rc<std::cell::RefCell<crate::core::surface::testing::FakeWindowState>>,
    ) {
        let (factory, probe) = FakeFactory::new();
        let (window, window_state) = FakeWindow::new();
        let app = TerminalApp::with_settings(
            &args(startup),
            Settings::default(),
            None,
            Box::new(window),
            Box::new(factory),
        );
        (app, probe, window_state)
    }

    #[test]
    fn test_startup_sizes_window_and_opens_first_tab() {
        let (app, probe, window_state) = app_with(&[]);

        assert_eq!(app.state(), AppState::Running);
        assert_eq!(app.registry().len(), 1);

        let window_state = window_state.borrow();
        assert_eq!(window_state.sizes, vec![(800, 600)]);
        assert_eq!(window_state.opacity, vec![0.85]);

        let probe = probe.borrow();
        let surface = probe.created[0].borrow();
        assert_eq!(surface.calls[0], SurfaceCall::Spawn(args(&["/bin/bash"])));
        assert_eq!(
            surface.calls[1],
            SurfaceCall::SetFont("monospace".to_string(), 10.0)
        );
    }

    #[test]
    fn test_startup_with_exec_args_wraps_command() {
        let (_app, probe, _window) = app_with(&["-e", "ping", "localhost"]);

        let probe = probe.borrow();
        let surface = probe.created[0].borrow();
        assert_eq!(
            surface.calls[0],
            SurfaceCall::Spawn(args(&[
                "sh",
                "-c",
                "exec ping localhost ; exec /bin/bash"
            ]))
        );
    }

    #[test]
    fn test_close_last_tab_terminates() {
        let (mut app, _probe, _window) = app_with(&[]);
        let first = app.registry().current().unwrap();
        let second = app.new_tab();

        app.close_tab(second);
        assert!(app.is_running());
        app.close_tab(first);
        assert_eq!(app.state(), AppState::Terminating);
    }

    #[test]
    fn test_child_exit_closes_tab() {
        let (mut app, _probe, _window) = app_with(&[]);
        let first = app.registry().current().unwrap();
        let second = app.new_tab();

        app.child_exited(second);
        assert_eq!(app.registry().current(), Some(first));
        assert!(app.is_running());

        app.child_exited(first);
        assert_eq!(app.state(), AppState::Terminating);
    }

    #[test]
    fn test_zoom_applies_to_focused_surface_only() {
        let (mut app, probe, _window) = app_with(&[]);
        app.new_tab();

        app.handle_key(KeyIntent::ZoomIn);
        assert_eq!(app.font().as_str(), "monospace 11");

        let probe = probe.borrow();
        // First tab only saw its creation font
        let first = probe.created[0].borrow();
        assert_eq!(
            first.calls.last().unwrap(),
            &SurfaceCall::SetFont("monospace".to_string(), 10.0)
        );
        // Focused (second) tab got the zoomed font
        let second = probe.created[1].borrow();
        assert_eq!(
            second.calls.last().unwrap(),
            &SurfaceCall::SetFont("monospace".to_string(), 11.0)
        );
    }

    #[test]
    fn test_reset_zoom_restores_default() {
        let (mut app, probe, _window) = app_with(&[]);
        app.handle_key(KeyIntent::ZoomIn);
        app.handle_key(KeyIntent::ZoomIn);
        app.handle_key(KeyIntent::ResetZoom);

        assert_eq!(app.font().as_str(), "monospace 10");
        let probe = probe.borrow();
        let surface = probe.created[0].borrow();
        assert_eq!(
            surface.calls.last().unwrap(),
            &SurfaceCall::SetFont("monospace".to_string(), 10.0)
        );
    }

    #[test]
    fn test_copy_requires_selection() {
        let (mut app, probe, _window) = app_with(&[]);

        app.handle_key(KeyIntent::Copy);
        {
            let probe = probe.borrow();
            let surface = probe.created[0].borrow();
            assert!(!surface.calls.contains(&SurfaceCall::CopySelection));
        }

        probe.borrow().created[0].borrow_mut().has_selection = true;
        app.handle_key(KeyIntent::Copy);
        let probe = probe.borrow();
        let surface = probe.created[0].borrow();
        assert!(surface.calls.contains(&SurfaceCall::CopySelection));
    }

    #[test]
    fn test_paste_reaches_focused_surface() {
        let (mut app, probe, _window) = app_with(&[]);
        app.handle_key(KeyIntent::Paste("ls\n".to_string()));

        let probe = probe.borrow();
        let surface = probe.created[0].borrow();
        assert!(surface.calls.contains(&SurfaceCall::Paste("ls\n".to_string())));
    }

    #[test]
    fn test_preferences_round_trip() {
        let (mut app, probe, window_state) = app_with(&[]);
        app.new_tab();

        let form = app.open_preferences();
        assert_eq!(form.font, "monospace 10");
        assert_eq!(form.width, "800");
        assert_eq!(form.height, "600");
        assert_eq!(form.opacity, 0.85);

        let tx = PreferencesTransaction::stage("Hack 9", "1024", "768", 0.6);
        let applied = app.apply_preferences(tx);
        assert!(applied.font_changed);
        assert!(applied.window_resized);

        assert_eq!(app.font().as_str(), "Hack 9");
        assert_eq!(app.settings().window_width, 1024);

        // Every session, not just the focused one, got the new font
        let probe = probe.borrow();
        for state in &probe.created {
            assert_eq!(
                state.borrow().calls.last().unwrap(),
                &SurfaceCall::SetFont("Hack".to_string(), 9.0)
            );
        }

        let window_state = window_state.borrow();
        assert_eq!(*window_state.sizes.last().unwrap(), (1024, 768));
        assert_eq!(*window_state.opacity.last().unwrap(), 0.6);
    }

    #[test]
    fn test_opacity_live_preview_bypasses_transaction() {
        let (mut app, _probe, window_state) = app_with(&[]);

        app.preview_opacity(0.3);
        assert_eq!(*window_state.borrow().opacity.last().unwrap(), 0.3);
        // Settings untouched until a transaction commits
        assert_eq!(app.settings().opacity, 0.85);
    }

    #[test]
    fn test_tab_switching() {
        let (mut app, _probe, _window) = app_with(&[]);
        let first = app.registry().current().unwrap();
        let second = app.new_tab();

        app.select_tab(first);
        assert_eq!(app.registry().current(), Some(first));
        app.next_tab();
        assert_eq!(app.registry().current(), Some(second));
        app.prev_tab();
        assert_eq!(app.registry().current(), Some(first));
    }
}
