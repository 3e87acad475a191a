// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element layout attributes and the references that identify elements.

use kurbo::{Insets, Rect};

use espalier_metrics::{Color, SupplementaryKind};

use crate::types::SectionIndex;

/// Z index of background decorations, below everything else.
pub const BACKGROUND_Z_INDEX: i32 = 0;

/// Z index of cells, separators, and placeholders.
pub const DEFAULT_Z_INDEX: i32 = 1;

/// Z index of headers and footers, above cells.
pub const HEADER_Z_INDEX: i32 = 1000;

/// Z index of headers pinned to the viewport edge, above unpinned headers.
pub const PINNED_HEADER_Z_INDEX: i32 = 10000;

/// The kind of a decoration element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Background behind a section's content area.
    ContentBackground,
    /// Vertical rule between columns.
    ColumnSeparator,
    /// Horizontal rule between rows.
    RowSeparator,
    /// Horizontal rule at the bottom edge of a section.
    SectionSeparator,
    /// A host-defined decoration, identified by its registered kind.
    Custom(&'static str),
}

/// The role of an element within its section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// An ordinary cell.
    Cell,
    /// A supplementary element of the given kind.
    Supplementary(SupplementaryKind),
    /// A decoration of the given kind.
    Decoration(DecorationKind),
    /// The placeholder shown while a section has no content.
    Placeholder,
}

/// Identifies a single element of the layout: section, role, and the
/// element's index within that role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef {
    /// The section the element belongs to.
    pub section: SectionIndex,
    /// What the element is.
    pub role: ElementRole,
    /// Position among elements of the same role in the same section.
    pub index: usize,
}

impl ElementRef {
    /// A reference to the cell at `index` in `section`.
    #[must_use]
    pub const fn cell(section: SectionIndex, index: usize) -> Self {
        Self {
            section,
            role: ElementRole::Cell,
            index,
        }
    }

    /// A reference to supplementary element `index` of `kind` in `section`.
    #[must_use]
    pub const fn supplementary(
        section: SectionIndex,
        kind: SupplementaryKind,
        index: usize,
    ) -> Self {
        Self {
            section,
            role: ElementRole::Supplementary(kind),
            index,
        }
    }

    /// A reference to decoration `index` of `kind` in `section`.
    #[must_use]
    pub const fn decoration(section: SectionIndex, kind: DecorationKind, index: usize) -> Self {
        Self {
            section,
            role: ElementRole::Decoration(kind),
            index,
        }
    }

    /// A reference to the placeholder of `section`.
    #[must_use]
    pub const fn placeholder(section: SectionIndex) -> Self {
        Self {
            section,
            role: ElementRole::Placeholder,
            index: 0,
        }
    }
}

/// Snapshot of everything the host needs to place and style one element.
///
/// Attributes are produced on demand from the layout's internal state; they
/// are plain data and carry no references back into the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutAttributes {
    /// Which element these attributes describe.
    pub element: ElementRef,
    /// The element's frame in content coordinates.
    pub frame: Rect,
    /// Stacking order; larger values draw above smaller ones.
    pub z_index: i32,
    /// Whether the element should not be displayed.
    pub hidden: bool,
    /// Margins the element's content should respect.
    pub layout_margins: Insets,
    /// Background fill, if any.
    pub background_color: Option<Color>,
    /// Background fill while selected, if any.
    pub selected_background_color: Option<Color>,
    /// Corner radius applied to the background.
    pub corner_radius: f64,
    /// For headers: whether the element is currently pinned to the viewport
    /// edge.
    pub pinned: bool,
    /// For cells and supplementary views: whether to show the trailing
    /// separator.
    pub shows_separator: bool,
    /// Separator tint, if any.
    pub separator_color: Option<Color>,
    /// Whether the element simulates selection on touch-down.
    pub simulates_selection: bool,
}

impl LayoutAttributes {
    /// Attributes for `element` at `frame` with everything else defaulted.
    #[must_use]
    pub fn new(element: ElementRef, frame: Rect) -> Self {
        Self {
            element,
            frame,
            z_index: DEFAULT_Z_INDEX,
            hidden: false,
            layout_margins: Insets::ZERO,
            background_color: None,
            selected_background_color: None,
            corner_radius: 0.0,
            pinned: false,
            shows_separator: false,
            separator_color: None,
            simulates_selection: false,
        }
    }
}
