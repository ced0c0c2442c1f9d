//! Preference staging and commit.
//!
//! A preferences interaction produces raw, user-entered strings. They
//! are validated field by field into a [`PreferencesTransaction`];
//! invalid fields are dropped with a warning instead of aborting the
//! whole edit. Committing applies the surviving fields in one pass to
//! the font state, persisted settings, every live session, and the
//! window. Cancelling is simply dropping the transaction.

use std::path::Path;

use tracing::warn;

use crate::config::Settings;
use crate::core::surface::WindowHandle;
use crate::font::{FontSpec, FontState};
use crate::session::SessionRegistry;

/// Raw values a preferences dialog is seeded with.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesForm {
    /// Current font string, "<family> <size>"
    pub font: String,
    /// Window width as entered text
    pub width: String,
    /// Window height as entered text
    pub height: String,
    /// Opacity slider position
    pub opacity: f64,
}

/// Staged, per-field-validated set of settings changes.
#[derive(Debug)]
pub struct PreferencesTransaction {
    font: Option<FontSpec>,
    width: Option<i32>,
    height: Option<i32>,
    opacity: f64,
    warnings: Vec<String>,
}

/// What a commit actually changed.
#[derive(Debug, PartialEq)]
pub struct AppliedChanges {
    pub font_changed: bool,
    pub window_resized: bool,
    pub opacity: f64,
}

impl PreferencesTransaction {
    /// Validate raw field values independently; invalid fields are
    /// dropped and recorded as warnings so the prior values survive.
    ///
    /// Opacity is taken as given: its input control is already
    /// range-constrained, and no second validation layer exists here.
    pub fn stage(raw_font: &str, raw_width: &str, raw_height: &str, opacity: f64) -> Self {
        let mut warnings = Vec::new();

        let font = match raw_font.parse::<FontSpec>() {
            Ok(spec) => Some(spec),
            Err(e) => {
                let msg = format!("Keeping current font: {}", e);
                warn!("{}", msg);
                warnings.push(msg);
                None
            }
        };

        let width = stage_dimension("width", raw_width, &mut warnings);
        let height = stage_dimension("height", raw_height, &mut warnings);

        Self {
            font,
            width,
            height,
            opacity,
            warnings,
        }
    }

    /// Warnings recorded while staging, one per dropped field.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Apply the staged fields: update font state and settings, persist
    /// the settings file, push the current font to every live session,
    /// resize the window when both dimensions were staged, and apply
    /// the opacity.
    pub fn commit(
        self,
        font_state: &mut FontState,
        settings: &mut Settings,
        settings_path: Option<&Path>,
        registry: &mut SessionRegistry,
        window: &mut dyn WindowHandle,
    ) -> AppliedChanges {
        let font_changed = match &self.font {
            Some(spec) => {
                font_state.set_spec(spec);
                settings.font_family = font_state.as_str().to_string();
                true
            }
            None => false,
        };

        if let Some(width) = self.width {
            settings.window_width = width;
        }
        if let Some(height) = self.height {
            settings.window_height = height;
        }
        settings.opacity = self.opacity;

        if let Some(path) = settings_path {
            if let Err(e) = settings.save_to(path) {
                warn!("Could not persist settings: {}", e);
            }
        }

        // Unlike zoom, a committed font reaches every session
        for session in registry.iter_mut() {
            font_state.apply_to(session.surface_mut());
        }

        let window_resized = match (self.width, self.height) {
            (Some(width), Some(height)) => {
                window.resize(width, height);
                true
            }
            _ => false,
        };
        window.set_opacity(self.opacity);

        AppliedChanges {
            font_changed,
            window_resized,
            opacity: self.opacity,
        }
    }
}

fn stage_dimension(name: &str, raw: &str, warnings: &mut Vec<String>) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            let msg = format!("Keeping current {}: invalid value {:?}", name, raw);
            warn!("{}", msg);
            warnings.push(msg);
            None
        }
    }
}
