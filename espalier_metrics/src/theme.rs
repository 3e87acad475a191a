// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied defaults for metric resolution.

use crate::color::Color;

/// Appearance defaults filled into metrics that do not define their own.
///
/// A theme is plain data owned by the host and passed explicitly to
/// [`SectionMetrics::resolve_theme_defaults`]; nothing in this crate reads
/// ambient or global state. Hosts targeting a particular display usually
/// build one theme per screen scale.
///
/// [`SectionMetrics::resolve_theme_defaults`]: crate::SectionMetrics::resolve_theme_defaults
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Background color for cells and supplementary views.
    pub background: Color,
    /// Background color for selected cells.
    pub selected_background: Color,
    /// Color of row and column separators.
    pub separator: Color,
    /// Color of the separators drawn at section boundaries.
    pub section_separator: Color,
    /// Width of hairline separators, in layout units.
    ///
    /// Hosts that know the display scale typically pass `1.0 / scale` so a
    /// separator maps to one physical pixel.
    pub hairline: f64,
}

impl Theme {
    /// The stock theme: white backgrounds, light gray separators, and a
    /// one-unit hairline.
    pub const DEFAULT: Self = Self {
        background: Color::WHITE,
        selected_background: Color::gray(235),
        separator: Color::gray(204),
        section_separator: Color::gray(204),
        hairline: 1.0,
    };

    /// The stock theme with separator widths scaled for a display.
    ///
    /// `scale` is the number of physical pixels per layout unit.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        debug_assert!(scale > 0.0, "display scale must be positive");
        Self {
            hairline: 1.0 / scale,
            ..Self::DEFAULT
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
