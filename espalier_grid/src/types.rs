// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core identifiers and the sizing context handed to layout.

use core::fmt;

use kurbo::Size;

use espalier_metrics::SupplementaryKind;

/// Identifies a section of a layout.
///
/// The global section is a single special section spanning the whole
/// collection, independent of the data-source section list; ordinary
/// sections are numbered in layout order. The derived ordering puts the
/// global section first, matching the order sections stack vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionIndex {
    /// The collection-wide section holding global headers and footers.
    Global,
    /// A data-source section, numbered from zero.
    Ordinary(usize),
}

impl SectionIndex {
    /// Whether this is the global section.
    #[must_use]
    pub const fn is_global(self) -> bool {
        matches!(self, Self::Global)
    }

    /// The ordinary section number, or `None` for the global section.
    #[must_use]
    pub const fn ordinary(self) -> Option<usize> {
        match self {
            Self::Global => None,
            Self::Ordinary(index) => Some(index),
        }
    }
}

/// The layout family a section description asks for.
///
/// Builders perform a capability check against this tag; a section asking
/// for a family the builder set does not know is skipped rather than laid
/// out with undefined behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// The row-and-column grid family implemented by this crate.
    #[default]
    Grid,
    /// A host-defined family, identified by name.
    Custom(&'static str),
}

/// Host-provided measurement used to resolve estimated heights during
/// layout.
///
/// `fitting` carries the width the element must fit within; its height is
/// advisory. Implementations return the element's preferred size at that
/// width. Measurement is optional everywhere: without it, layout falls back
/// to estimated heights and hosts report real sizes afterwards through the
/// `set_item_size` family.
pub trait LayoutMeasure {
    /// The preferred size of the cell at `index` in `section`.
    fn measure_item(&mut self, section: SectionIndex, index: usize, fitting: Size) -> Size;

    /// The preferred size of the supplementary element `index` of `kind` in
    /// `section`.
    fn measure_supplementary(
        &mut self,
        section: SectionIndex,
        kind: SupplementaryKind,
        index: usize,
        fitting: Size,
    ) -> Size;
}

/// The sizing context for one layout pass: available width plus an optional
/// measurement callback.
pub struct LayoutSizing<'a> {
    /// Width of the area being laid out.
    pub width: f64,
    /// Measurement callback, or `None` to lay out with estimates only.
    pub measure: Option<&'a mut dyn LayoutMeasure>,
}

impl<'a> LayoutSizing<'a> {
    /// A sizing context without measurement.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            measure: None,
        }
    }

    /// A sizing context that measures through `measure`.
    #[must_use]
    pub fn with_measure(width: f64, measure: &'a mut dyn LayoutMeasure) -> Self {
        Self {
            width,
            measure: Some(measure),
        }
    }

    /// Measured height for a cell, if a measurement callback is present.
    pub(crate) fn measure_item(
        &mut self,
        section: SectionIndex,
        index: usize,
        fitting: Size,
    ) -> Option<f64> {
        match &mut self.measure {
            Some(measure) => Some(measure.measure_item(section, index, fitting).height),
            None => None,
        }
    }

    /// Measured height for a supplementary element, if a measurement
    /// callback is present.
    pub(crate) fn measure_supplementary(
        &mut self,
        section: SectionIndex,
        kind: SupplementaryKind,
        index: usize,
        fitting: Size,
    ) -> Option<f64> {
        match &mut self.measure {
            Some(measure) => {
                Some(measure.measure_supplementary(section, kind, index, fitting).height)
            }
            None => None,
        }
    }
}

impl fmt::Debug for LayoutSizing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSizing")
            .field("width", &self.width)
            .field("measure", &self.measure.as_ref().map(|_| ".."))
            .finish()
    }
}
