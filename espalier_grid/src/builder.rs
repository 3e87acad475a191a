// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection of a layout strategy for a described section.

use crate::section::{LayoutSection, SectionDescription};
use crate::types::{LayoutKind, SectionIndex};

/// Builds [`LayoutSection`]s for the section kinds this crate can lay out.
///
/// Construction is a capability check: a builder is only returned when the
/// description's [`LayoutKind`] is one the crate implements. Hosts that
/// register custom kinds are expected to check for `None` and route those
/// descriptions to their own layout code.
#[derive(Clone, Copy, Debug)]
pub enum SectionBuilder {
    /// The stock row-and-column strategy.
    Grid(GridSectionBuilder),
}

impl SectionBuilder {
    /// Returns a builder able to lay out `description`, if there is one.
    #[must_use]
    pub fn for_description(description: &SectionDescription) -> Option<Self> {
        match description.kind {
            LayoutKind::Grid => Some(Self::Grid(GridSectionBuilder)),
            LayoutKind::Custom(_) => None,
        }
    }

    /// Consumes the description into a section ready for layout.
    #[must_use]
    pub fn build(self, index: SectionIndex, description: SectionDescription) -> LayoutSection {
        match self {
            Self::Grid(builder) => builder.build(index, description),
        }
    }
}

/// Builder for plain grid sections.
#[derive(Clone, Copy, Debug)]
pub struct GridSectionBuilder;

impl GridSectionBuilder {
    /// Consumes the description into a grid section ready for layout.
    #[must_use]
    pub fn build(self, index: SectionIndex, description: SectionDescription) -> LayoutSection {
        LayoutSection::new(index, description)
    }
}
