//! Font state shared across terminal sessions.
//!
//! The current font lives as a single `"<family> <size>"` string, the
//! same shape it is persisted in. Zoom and reset mutate it in place;
//! the owner re-applies the result to the focused surface only. A
//! preference commit is the only path that pushes it to every session
//! and back to persisted settings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::core::surface::DisplaySurface;

/// Hard fallback applied when a stored font string will not parse at
/// session-creation time.
pub const FALLBACK_FONT: &str = "monospace 10";

const FALLBACK_FAMILY: &str = "monospace";
const FALLBACK_SIZE: f64 = 10.0;

#[derive(Error, Debug, PartialEq)]
pub enum FontParseError {
    #[error("font string {0:?} has no size component")]
    MissingSize(String),

    #[error("font string {0:?} has an empty family")]
    EmptyFamily(String),

    #[error("font string {0:?} has an invalid size")]
    InvalidSize(String),
}

/// A parsed font: family plus point size. Invariant: `size_pt > 0`,
/// family non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size_pt: f64,
}

impl FromStr for FontSpec {
    type Err = FontParseError;

    /// Parse `"<family> <size>"`. The size is the last
    /// whitespace-separated token; the family is everything before it
    /// and may itself contain spaces ("DejaVu Sans Mono 12").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (family, size) = trimmed
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| FontParseError::MissingSize(s.to_string()))?;

        let family = family.trim();
        if family.is_empty() {
            return Err(FontParseError::EmptyFamily(s.to_string()));
        }

        let size_pt: f64 = size
            .parse()
            .map_err(|_| FontParseError::InvalidSize(s.to_string()))?;
        if !size_pt.is_finite() || size_pt <= 0.0 {
            return Err(FontParseError::InvalidSize(s.to_string()));
        }

        Ok(Self {
            family: family.to_string(),
            size_pt,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size_pt)
    }
}

/// The process-wide current font, owned by the application.
#[derive(Debug, Clone)]
pub struct FontState {
    font: String,
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            font: FALLBACK_FONT.to_string(),
        }
    }
}

impl FontState {
    /// Start from a stored font string. The string is kept as-is even
    /// when unparsable; `apply_or_fallback` covers that case.
    pub fn new(font: &str) -> Self {
        Self {
            font: font.to_string(),
        }
    }

    /// The current `"<family> <size>"` string.
    pub fn as_str(&self) -> &str {
        &self.font
    }

    pub fn spec(&self) -> Result<FontSpec, FontParseError> {
        self.font.parse()
    }

    /// Apply the current font to a surface. A parse failure logs and
    /// leaves the surface on its prior font.
    pub fn apply_to(&self, surface: &mut dyn DisplaySurface) {
        match self.spec() {
            Ok(spec) => surface.set_font(&spec.family, spec.size_pt),
            Err(e) => warn!("Not applying font: {}", e),
        }
    }

    /// Session-creation variant: a parse failure applies the hard
    /// fallback instead of leaving the surface unset.
    pub fn apply_or_fallback(&self, surface: &mut dyn DisplaySurface) {
        match self.spec() {
            Ok(spec) => surface.set_font(&spec.family, spec.size_pt),
            Err(e) => {
                warn!("Falling back to {:?}: {}", FALLBACK_FONT, e);
                surface.set_font(FALLBACK_FAMILY, FALLBACK_SIZE);
            }
        }
    }

    /// Grow the size by one point. Returns whether the state changed.
    pub fn zoom_in(&mut self) -> bool {
        match self.spec() {
            Ok(mut spec) => {
                spec.size_pt += 1.0;
                self.font = spec.to_string();
                true
            }
            Err(e) => {
                warn!("Cannot zoom in: {}", e);
                false
            }
        }
    }

    /// Shrink the size by one point; no-op at or below one point.
    pub fn zoom_out(&mut self) -> bool {
        match self.spec() {
            Ok(mut spec) => {
                if spec.size_pt <= 1.0 {
                    return false;
                }
                spec.size_pt -= 1.0;
                self.font = spec.to_string();
                true
            }
            Err(e) => {
                warn!("Cannot zoom out: {}", e);
                false
            }
        }
    }

    /// Reset to the default font.
    pub fn reset(&mut self) {
        self.font = FALLBACK_FONT.to_string();
    }

    /// Replace the state from a combined string; prior state is kept
    /// on parse failure.
    pub fn set_from_str(&mut self, s: &str) -> Result<(), FontParseError> {
        let spec: FontSpec = s.parse()?;
        self.font = spec.to_string();
        Ok(())
    }

    pub fn set_spec(&mut self, spec: &FontSpec) {
        self.font = spec.to_string();
    }
}
