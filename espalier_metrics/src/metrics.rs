// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section metrics with explicit tracking of which fields were set.

use kurbo::Insets;
use smallvec::SmallVec;

use crate::color::Color;
use crate::order::SupplementaryOrdering;
use crate::theme::Theme;

bitflags::bitflags! {
    /// The fields of a [`SectionMetrics`] value that have been explicitly
    /// assigned.
    ///
    /// Metric merging copies a field only when its bit is set on the source,
    /// so defaults never clobber values set closer to the section.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MetricsFields: u32 {
        /// `content_inset` has been assigned.
        const CONTENT_INSET = 1 << 0;
        /// `corner_radius` has been assigned.
        const CORNER_RADIUS = 1 << 1;
        /// `row_height` has been assigned.
        const ROW_HEIGHT = 1 << 2;
        /// `estimated_row_height` has been assigned.
        const ESTIMATED_ROW_HEIGHT = 1 << 3;
        /// `fixed_column_width` has been assigned.
        const FIXED_COLUMN_WIDTH = 1 << 4;
        /// `row_spacing` has been assigned.
        const ROW_SPACING = 1 << 5;
        /// `interitem_spacing` has been assigned.
        const INTERITEM_SPACING = 1 << 6;
        /// `left_auxiliary_column_width` has been assigned.
        const LEFT_AUXILIARY_COLUMN_WIDTH = 1 << 7;
        /// `right_auxiliary_column_width` has been assigned.
        const RIGHT_AUXILIARY_COLUMN_WIDTH = 1 << 8;
        /// `auxiliary_column_spacing` has been assigned.
        const AUXILIARY_COLUMN_SPACING = 1 << 9;
        /// `columns` has been assigned.
        const COLUMNS = 1 << 10;
        /// `padding` has been assigned.
        const PADDING = 1 << 11;
        /// `layout_margins` has been assigned.
        const LAYOUT_MARGINS = 1 << 12;
        /// `separator_width` has been assigned.
        const SEPARATOR_WIDTH = 1 << 13;
        /// `shows_column_separator` has been assigned.
        const SHOWS_COLUMN_SEPARATOR = 1 << 14;
        /// `shows_row_separator` has been assigned.
        const SHOWS_ROW_SEPARATOR = 1 << 15;
        /// `shows_section_separator` has been assigned.
        const SHOWS_SECTION_SEPARATOR = 1 << 16;
        /// `shows_section_separator_when_last` has been assigned.
        const SHOWS_SECTION_SEPARATOR_WHEN_LAST = 1 << 17;
        /// `separator_insets` has been assigned.
        const SEPARATOR_INSETS = 1 << 18;
        /// `section_separator_insets` has been assigned.
        const SECTION_SEPARATOR_INSETS = 1 << 19;
        /// `background_color` has been assigned.
        const BACKGROUND_COLOR = 1 << 20;
        /// `selected_background_color` has been assigned.
        const SELECTED_BACKGROUND_COLOR = 1 << 21;
        /// `separator_color` has been assigned.
        const SEPARATOR_COLOR = 1 << 22;
        /// `section_separator_color` has been assigned.
        const SECTION_SEPARATOR_COLOR = 1 << 23;
        /// `cell_layout_order` has been assigned.
        const CELL_LAYOUT_ORDER = 1 << 24;
        /// `content_background` has been assigned.
        const CONTENT_BACKGROUND = 1 << 25;
        /// `supplementary_ordering` has been assigned.
        const SUPPLEMENTARY_ORDERING = 1 << 26;
        /// `resizes_placeholder` has been assigned.
        const RESIZES_PLACEHOLDER = 1 << 27;
    }
}

/// The horizontal direction in which cells fill the columns of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemLayoutOrder {
    /// The first item of each row takes the leading column.
    #[default]
    LeadingToTrailing,
    /// The first item of each row takes the trailing column.
    TrailingToLeading,
}

/// Appearance of the decoration drawn behind a section's cell block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackgroundAttributes {
    /// Fill color, or `None` to draw nothing.
    pub color: Option<Color>,
    /// Corner radius of the background, in layout units.
    pub corner_radius: f64,
}

/// A host-declared decoration placed over a section's frame.
///
/// Decorations accumulate across metric merges rather than replacing each
/// other, so defaults and section metrics can each contribute their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decoration {
    /// Host-defined kind, used to pick the view that draws it.
    pub kind: &'static str,
    /// Fill color, or `None` to let the view decide.
    pub color: Option<Color>,
    /// Stacking position relative to cells and supplementary views.
    pub z_index: i32,
}

/// Measurements and appearance for one section of a layout.
///
/// Every field records whether it has been explicitly assigned; see
/// [`MetricsFields`]. Hosts typically build a default metrics value, a
/// per-collection override, and a per-section override, then combine them
/// with [`apply_values_from`](Self::apply_values_from) so that each field
/// takes its most specific definition.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionMetrics {
    defined: MetricsFields,
    content_inset: Insets,
    corner_radius: f64,
    row_height: Option<f64>,
    estimated_row_height: f64,
    fixed_column_width: Option<f64>,
    row_spacing: f64,
    interitem_spacing: f64,
    left_auxiliary_column_width: f64,
    right_auxiliary_column_width: f64,
    auxiliary_column_spacing: f64,
    columns: usize,
    padding: Insets,
    layout_margins: Insets,
    separator_width: f64,
    shows_column_separator: bool,
    shows_row_separator: bool,
    shows_section_separator: bool,
    shows_section_separator_when_last: bool,
    separator_insets: Insets,
    section_separator_insets: Insets,
    background_color: Option<Color>,
    selected_background_color: Option<Color>,
    separator_color: Option<Color>,
    section_separator_color: Option<Color>,
    cell_layout_order: ItemLayoutOrder,
    content_background: BackgroundAttributes,
    supplementary_ordering: SupplementaryOrdering,
    resizes_placeholder: bool,
    decorations: SmallVec<[Decoration; 2]>,
}

impl SectionMetrics {
    /// Row height assumed for unmeasured content, in layout units.
    pub const DEFAULT_ESTIMATED_ROW_HEIGHT: f64 = 44.0;

    /// Metrics with stock values and no field marked as defined.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defined: MetricsFields::empty(),
            content_inset: Insets::ZERO,
            corner_radius: 0.0,
            row_height: None,
            estimated_row_height: Self::DEFAULT_ESTIMATED_ROW_HEIGHT,
            fixed_column_width: None,
            row_spacing: 0.0,
            interitem_spacing: 0.0,
            left_auxiliary_column_width: 0.0,
            right_auxiliary_column_width: 0.0,
            auxiliary_column_spacing: 0.0,
            columns: 1,
            padding: Insets::ZERO,
            layout_margins: Insets::ZERO,
            separator_width: Theme::DEFAULT.hairline,
            shows_column_separator: true,
            shows_row_separator: false,
            shows_section_separator: false,
            shows_section_separator_when_last: false,
            separator_insets: Insets::ZERO,
            section_separator_insets: Insets::ZERO,
            background_color: None,
            selected_background_color: None,
            separator_color: None,
            section_separator_color: None,
            cell_layout_order: ItemLayoutOrder::LeadingToTrailing,
            content_background: BackgroundAttributes::default(),
            supplementary_ordering: SupplementaryOrdering::DEFAULT,
            resizes_placeholder: true,
            decorations: SmallVec::new(),
        }
    }

    /// The set of fields that have been explicitly assigned.
    #[must_use]
    pub fn defined_fields(&self) -> MetricsFields {
        self.defined
    }

    /// Whether every field in `fields` has been explicitly assigned.
    #[must_use]
    pub fn defines(&self, fields: MetricsFields) -> bool {
        self.defined.contains(fields)
    }

    /// Space between the section's frame and its content.
    #[must_use]
    pub fn content_inset(&self) -> Insets {
        self.content_inset
    }

    /// Sets the content inset and marks it defined.
    pub fn set_content_inset(&mut self, inset: Insets) {
        self.content_inset = inset;
        self.defined.insert(MetricsFields::CONTENT_INSET);
    }

    /// Corner radius applied to cell backgrounds.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Sets the cell-background corner radius and marks it defined.
    pub fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = radius;
        self.defined.insert(MetricsFields::CORNER_RADIUS);
    }

    /// Fixed height for every row, or `None` to size rows by their items.
    #[must_use]
    pub fn row_height(&self) -> Option<f64> {
        self.row_height
    }

    /// Sets or clears the fixed row height and marks it defined.
    pub fn set_row_height(&mut self, height: Option<f64>) {
        self.row_height = height;
        self.defined.insert(MetricsFields::ROW_HEIGHT);
    }

    /// Height assumed for items that have not been measured yet.
    #[must_use]
    pub fn estimated_row_height(&self) -> f64 {
        self.estimated_row_height
    }

    /// Sets the estimated row height and marks it defined.
    pub fn set_estimated_row_height(&mut self, height: f64) {
        self.estimated_row_height = height;
        self.defined.insert(MetricsFields::ESTIMATED_ROW_HEIGHT);
    }

    /// Fixed column width, or `None` to divide the available width evenly.
    #[must_use]
    pub fn fixed_column_width(&self) -> Option<f64> {
        self.fixed_column_width
    }

    /// Sets or clears the fixed column width and marks it defined.
    pub fn set_fixed_column_width(&mut self, width: Option<f64>) {
        self.fixed_column_width = width;
        self.defined.insert(MetricsFields::FIXED_COLUMN_WIDTH);
    }

    /// Vertical space between rows.
    #[must_use]
    pub fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    /// Sets the space between rows and marks it defined.
    pub fn set_row_spacing(&mut self, spacing: f64) {
        self.row_spacing = spacing;
        self.defined.insert(MetricsFields::ROW_SPACING);
    }

    /// Horizontal space between columns.
    #[must_use]
    pub fn interitem_spacing(&self) -> f64 {
        self.interitem_spacing
    }

    /// Sets the space between columns and marks it defined.
    pub fn set_interitem_spacing(&mut self, spacing: f64) {
        self.interitem_spacing = spacing;
        self.defined.insert(MetricsFields::INTERITEM_SPACING);
    }

    /// Width reserved for the left auxiliary column.
    #[must_use]
    pub fn left_auxiliary_column_width(&self) -> f64 {
        self.left_auxiliary_column_width
    }

    /// Sets the left auxiliary column width and marks it defined.
    pub fn set_left_auxiliary_column_width(&mut self, width: f64) {
        self.left_auxiliary_column_width = width;
        self.defined
            .insert(MetricsFields::LEFT_AUXILIARY_COLUMN_WIDTH);
    }

    /// Width reserved for the right auxiliary column.
    #[must_use]
    pub fn right_auxiliary_column_width(&self) -> f64 {
        self.right_auxiliary_column_width
    }

    /// Sets the right auxiliary column width and marks it defined.
    pub fn set_right_auxiliary_column_width(&mut self, width: f64) {
        self.right_auxiliary_column_width = width;
        self.defined
            .insert(MetricsFields::RIGHT_AUXILIARY_COLUMN_WIDTH);
    }

    /// Vertical space between stacked items in the auxiliary columns.
    #[must_use]
    pub fn auxiliary_column_spacing(&self) -> f64 {
        self.auxiliary_column_spacing
    }

    /// Sets the spacing between stacked auxiliary items and marks it
    /// defined.
    pub fn set_auxiliary_column_spacing(&mut self, spacing: f64) {
        self.auxiliary_column_spacing = spacing;
        self.defined.insert(MetricsFields::AUXILIARY_COLUMN_SPACING);
    }

    /// Number of columns cells are distributed into.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Sets the column count, clamped to at least one, and marks it defined.
    pub fn set_columns(&mut self, columns: usize) {
        debug_assert!(columns > 0, "a section needs at least one column");
        self.columns = columns.max(1);
        self.defined.insert(MetricsFields::COLUMNS);
    }

    /// Space around the cell block: top and bottom between headers/footers
    /// and the cells, left and right between the auxiliary columns and the
    /// cells.
    #[must_use]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Sets the padding around the cell block and marks it defined.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.defined.insert(MetricsFields::PADDING);
    }

    /// Margins propagated to cells and supplementary views for their own
    /// content alignment.
    #[must_use]
    pub fn layout_margins(&self) -> Insets {
        self.layout_margins
    }

    /// Sets the propagated layout margins and marks them defined.
    pub fn set_layout_margins(&mut self, margins: Insets) {
        self.layout_margins = margins;
        self.defined.insert(MetricsFields::LAYOUT_MARGINS);
    }

    /// Width of separator lines.
    #[must_use]
    pub fn separator_width(&self) -> f64 {
        self.separator_width
    }

    /// Sets the separator line width and marks it defined.
    pub fn set_separator_width(&mut self, width: f64) {
        self.separator_width = width;
        self.defined.insert(MetricsFields::SEPARATOR_WIDTH);
    }

    /// Whether separators are drawn between columns.
    #[must_use]
    pub fn shows_column_separator(&self) -> bool {
        self.shows_column_separator
    }

    /// Sets whether column separators are drawn and marks it defined.
    pub fn set_shows_column_separator(&mut self, shows: bool) {
        self.shows_column_separator = shows;
        self.defined.insert(MetricsFields::SHOWS_COLUMN_SEPARATOR);
    }

    /// Whether separators are drawn between rows.
    #[must_use]
    pub fn shows_row_separator(&self) -> bool {
        self.shows_row_separator
    }

    /// Sets whether row separators are drawn and marks it defined.
    pub fn set_shows_row_separator(&mut self, shows: bool) {
        self.shows_row_separator = shows;
        self.defined.insert(MetricsFields::SHOWS_ROW_SEPARATOR);
    }

    /// Whether separators are drawn above and below the section.
    #[must_use]
    pub fn shows_section_separator(&self) -> bool {
        self.shows_section_separator
    }

    /// Sets whether section separators are drawn and marks it defined.
    pub fn set_shows_section_separator(&mut self, shows: bool) {
        self.shows_section_separator = shows;
        self.defined.insert(MetricsFields::SHOWS_SECTION_SEPARATOR);
    }

    /// Whether the bottom section separator is drawn when this is the last
    /// section.
    #[must_use]
    pub fn shows_section_separator_when_last(&self) -> bool {
        self.shows_section_separator_when_last
    }

    /// Sets whether the last section keeps its bottom separator and marks
    /// it defined.
    pub fn set_shows_section_separator_when_last(&mut self, shows: bool) {
        self.shows_section_separator_when_last = shows;
        self.defined
            .insert(MetricsFields::SHOWS_SECTION_SEPARATOR_WHEN_LAST);
    }

    /// Insets applied to row and column separators.
    #[must_use]
    pub fn separator_insets(&self) -> Insets {
        self.separator_insets
    }

    /// Sets the row and column separator insets and marks them defined.
    pub fn set_separator_insets(&mut self, insets: Insets) {
        self.separator_insets = insets;
        self.defined.insert(MetricsFields::SEPARATOR_INSETS);
    }

    /// Insets applied to section boundary separators.
    #[must_use]
    pub fn section_separator_insets(&self) -> Insets {
        self.section_separator_insets
    }

    /// Sets the section separator insets and marks them defined.
    pub fn set_section_separator_insets(&mut self, insets: Insets) {
        self.section_separator_insets = insets;
        self.defined.insert(MetricsFields::SECTION_SEPARATOR_INSETS);
    }

    /// Background color for cells, or `None` for the theme default.
    #[must_use]
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Sets or clears the cell background color and marks it defined.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
        self.defined.insert(MetricsFields::BACKGROUND_COLOR);
    }

    /// Background color for selected cells, or `None` for the theme default.
    #[must_use]
    pub fn selected_background_color(&self) -> Option<Color> {
        self.selected_background_color
    }

    /// Sets or clears the selected-cell background color and marks it
    /// defined.
    pub fn set_selected_background_color(&mut self, color: Option<Color>) {
        self.selected_background_color = color;
        self.defined.insert(MetricsFields::SELECTED_BACKGROUND_COLOR);
    }

    /// Color of row and column separators, or `None` for the theme default.
    #[must_use]
    pub fn separator_color(&self) -> Option<Color> {
        self.separator_color
    }

    /// Sets or clears the separator color and marks it defined.
    pub fn set_separator_color(&mut self, color: Option<Color>) {
        self.separator_color = color;
        self.defined.insert(MetricsFields::SEPARATOR_COLOR);
    }

    /// Color of section boundary separators, or `None` for the theme
    /// default.
    #[must_use]
    pub fn section_separator_color(&self) -> Option<Color> {
        self.section_separator_color
    }

    /// Sets or clears the section separator color and marks it defined.
    pub fn set_section_separator_color(&mut self, color: Option<Color>) {
        self.section_separator_color = color;
        self.defined.insert(MetricsFields::SECTION_SEPARATOR_COLOR);
    }

    /// Direction in which cells fill the columns of a row.
    #[must_use]
    pub fn cell_layout_order(&self) -> ItemLayoutOrder {
        self.cell_layout_order
    }

    /// Sets the cell fill direction and marks it defined.
    pub fn set_cell_layout_order(&mut self, order: ItemLayoutOrder) {
        self.cell_layout_order = order;
        self.defined.insert(MetricsFields::CELL_LAYOUT_ORDER);
    }

    /// Appearance of the decoration drawn behind the cell block.
    #[must_use]
    pub fn content_background(&self) -> BackgroundAttributes {
        self.content_background
    }

    /// Sets the content background appearance and marks it defined.
    pub fn set_content_background(&mut self, background: BackgroundAttributes) {
        self.content_background = background;
        self.defined.insert(MetricsFields::CONTENT_BACKGROUND);
    }

    /// The order in which supplementary kinds claim section space.
    #[must_use]
    pub fn supplementary_ordering(&self) -> SupplementaryOrdering {
        self.supplementary_ordering
    }

    /// Sets the supplementary ordering and marks it defined.
    pub fn set_supplementary_ordering(&mut self, ordering: SupplementaryOrdering) {
        self.supplementary_ordering = ordering;
        self.defined.insert(MetricsFields::SUPPLEMENTARY_ORDERING);
    }

    /// Whether the section's placeholder stretches to fill leftover height.
    #[must_use]
    pub fn resizes_placeholder(&self) -> bool {
        self.resizes_placeholder
    }

    /// Sets whether the placeholder stretches to fill and marks it defined.
    pub fn set_resizes_placeholder(&mut self, resizes: bool) {
        self.resizes_placeholder = resizes;
        self.defined.insert(MetricsFields::RESIZES_PLACEHOLDER);
    }

    /// Decorations declared for sections using these metrics.
    #[must_use]
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Declares an additional decoration.
    ///
    /// Unlike the scalar fields, decorations are additive: merging appends
    /// the source's decorations after the target's.
    pub fn add_decoration(&mut self, decoration: Decoration) {
        self.decorations.push(decoration);
    }

    /// Copies every field that `other` defines onto `self`, marking it
    /// defined here as well.
    ///
    /// Fields that `other` never assigned are left alone, so applying a
    /// sparse override onto resolved defaults touches exactly the fields the
    /// override named. Decorations are appended unconditionally.
    pub fn apply_values_from(&mut self, other: &Self) {
        self.decorations.extend_from_slice(&other.decorations);

        if other.defines(MetricsFields::CONTENT_INSET) {
            self.set_content_inset(other.content_inset);
        }
        if other.defines(MetricsFields::CORNER_RADIUS) {
            self.set_corner_radius(other.corner_radius);
        }
        if other.defines(MetricsFields::ROW_HEIGHT) {
            self.set_row_height(other.row_height);
        }
        if other.defines(MetricsFields::ESTIMATED_ROW_HEIGHT) {
            self.set_estimated_row_height(other.estimated_row_height);
        }
        if other.defines(MetricsFields::FIXED_COLUMN_WIDTH) {
            self.set_fixed_column_width(other.fixed_column_width);
        }
        if other.defines(MetricsFields::ROW_SPACING) {
            self.set_row_spacing(other.row_spacing);
        }
        if other.defines(MetricsFields::INTERITEM_SPACING) {
            self.set_interitem_spacing(other.interitem_spacing);
        }
        if other.defines(MetricsFields::LEFT_AUXILIARY_COLUMN_WIDTH) {
            self.set_left_auxiliary_column_width(other.left_auxiliary_column_width);
        }
        if other.defines(MetricsFields::RIGHT_AUXILIARY_COLUMN_WIDTH) {
            self.set_right_auxiliary_column_width(other.right_auxiliary_column_width);
        }
        if other.defines(MetricsFields::AUXILIARY_COLUMN_SPACING) {
            self.set_auxiliary_column_spacing(other.auxiliary_column_spacing);
        }
        if other.defines(MetricsFields::COLUMNS) {
            self.set_columns(other.columns);
        }
        if other.defines(MetricsFields::PADDING) {
            self.set_padding(other.padding);
        }
        if other.defines(MetricsFields::LAYOUT_MARGINS) {
            self.set_layout_margins(other.layout_margins);
        }
        if other.defines(MetricsFields::SEPARATOR_WIDTH) {
            self.set_separator_width(other.separator_width);
        }
        if other.defines(MetricsFields::SHOWS_COLUMN_SEPARATOR) {
            self.set_shows_column_separator(other.shows_column_separator);
        }
        if other.defines(MetricsFields::SHOWS_ROW_SEPARATOR) {
            self.set_shows_row_separator(other.shows_row_separator);
        }
        if other.defines(MetricsFields::SHOWS_SECTION_SEPARATOR) {
            self.set_shows_section_separator(other.shows_section_separator);
        }
        if other.defines(MetricsFields::SHOWS_SECTION_SEPARATOR_WHEN_LAST) {
            self.set_shows_section_separator_when_last(other.shows_section_separator_when_last);
        }
        if other.defines(MetricsFields::SEPARATOR_INSETS) {
            self.set_separator_insets(other.separator_insets);
        }
        if other.defines(MetricsFields::SECTION_SEPARATOR_INSETS) {
            self.set_section_separator_insets(other.section_separator_insets);
        }
        if other.defines(MetricsFields::BACKGROUND_COLOR) {
            self.set_background_color(other.background_color);
        }
        if other.defines(MetricsFields::SELECTED_BACKGROUND_COLOR) {
            self.set_selected_background_color(other.selected_background_color);
        }
        if other.defines(MetricsFields::SEPARATOR_COLOR) {
            self.set_separator_color(other.separator_color);
        }
        if other.defines(MetricsFields::SECTION_SEPARATOR_COLOR) {
            self.set_section_separator_color(other.section_separator_color);
        }
        if other.defines(MetricsFields::CELL_LAYOUT_ORDER) {
            self.set_cell_layout_order(other.cell_layout_order);
        }
        if other.defines(MetricsFields::CONTENT_BACKGROUND) {
            self.set_content_background(other.content_background);
        }
        if other.defines(MetricsFields::SUPPLEMENTARY_ORDERING) {
            self.set_supplementary_ordering(other.supplementary_ordering);
        }
        if other.defines(MetricsFields::RESIZES_PLACEHOLDER) {
            self.set_resizes_placeholder(other.resizes_placeholder);
        }
    }

    /// Fills appearance fields the host never assigned with theme values.
    ///
    /// Each filled field is marked as defined, so resolving twice, or
    /// resolving against a second theme, never overwrites the first
    /// resolution. Explicitly assigned fields are left untouched.
    pub fn resolve_theme_defaults(&mut self, theme: &Theme) {
        if !self.defines(MetricsFields::BACKGROUND_COLOR) {
            self.set_background_color(Some(theme.background));
        }
        if !self.defines(MetricsFields::SELECTED_BACKGROUND_COLOR) {
            self.set_selected_background_color(Some(theme.selected_background));
        }
        if !self.defines(MetricsFields::SEPARATOR_COLOR) {
            self.set_separator_color(Some(theme.separator));
        }
        if !self.defines(MetricsFields::SECTION_SEPARATOR_COLOR) {
            self.set_section_separator_color(Some(theme.section_separator));
        }
        if !self.defines(MetricsFields::SEPARATOR_WIDTH) {
            self.set_separator_width(theme.hairline);
        }
    }
}

impl Default for SectionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Insets;

    use super::{BackgroundAttributes, Decoration, ItemLayoutOrder, MetricsFields, SectionMetrics};
    use crate::color::Color;
    use crate::order::{SupplementaryKind, SupplementaryOrdering};
    use crate::theme::Theme;

    #[test]
    fn stock_metrics_define_nothing() {
        let metrics = SectionMetrics::new();
        assert!(metrics.defined_fields().is_empty());
        assert_eq!(metrics.columns(), 1);
        assert_eq!(metrics.row_height(), None);
        assert_eq!(metrics.estimated_row_height(), 44.0);
        assert_eq!(metrics.separator_width(), 1.0);
        assert!(metrics.shows_column_separator());
        assert!(!metrics.shows_row_separator());
        assert!(metrics.resizes_placeholder());
        assert_eq!(metrics.cell_layout_order(), ItemLayoutOrder::LeadingToTrailing);
    }

    #[test]
    fn setters_record_definition() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(88.0));
        assert!(metrics.defines(MetricsFields::ROW_HEIGHT));
        assert!(!metrics.defines(MetricsFields::COLUMNS));
        assert_eq!(metrics.row_height(), Some(88.0));
    }

    #[test]
    fn every_setter_records_its_own_field() {
        let mut metrics = SectionMetrics::new();
        metrics.set_content_inset(Insets::uniform(1.0));
        metrics.set_corner_radius(2.0);
        metrics.set_row_height(Some(44.0));
        metrics.set_estimated_row_height(40.0);
        metrics.set_fixed_column_width(Some(80.0));
        metrics.set_row_spacing(4.0);
        metrics.set_interitem_spacing(4.0);
        metrics.set_left_auxiliary_column_width(40.0);
        metrics.set_right_auxiliary_column_width(40.0);
        metrics.set_auxiliary_column_spacing(8.0);
        metrics.set_columns(2);
        metrics.set_padding(Insets::uniform(6.0));
        metrics.set_layout_margins(Insets::uniform(8.0));
        metrics.set_separator_width(0.5);
        metrics.set_shows_column_separator(false);
        metrics.set_shows_row_separator(true);
        metrics.set_shows_section_separator(true);
        metrics.set_shows_section_separator_when_last(true);
        metrics.set_separator_insets(Insets::new(15.0, 0.0, 0.0, 0.0));
        metrics.set_section_separator_insets(Insets::new(15.0, 0.0, 15.0, 0.0));
        metrics.set_background_color(Some(Color::WHITE));
        metrics.set_selected_background_color(Some(Color::gray(235)));
        metrics.set_separator_color(Some(Color::gray(204)));
        metrics.set_section_separator_color(Some(Color::gray(204)));
        metrics.set_cell_layout_order(ItemLayoutOrder::TrailingToLeading);
        metrics.set_content_background(BackgroundAttributes::default());
        metrics.set_supplementary_ordering(SupplementaryOrdering::DEFAULT);
        metrics.set_resizes_placeholder(false);

        // One flag per setter, none shared and none forgotten.
        assert_eq!(metrics.defined_fields(), MetricsFields::all());
    }

    #[test]
    fn merge_copies_only_defined_fields() {
        let mut base = SectionMetrics::new();
        base.set_columns(3);

        // Insets use (left, top, right, bottom) order.
        let mut overlay = SectionMetrics::new();
        overlay.set_separator_insets(Insets::new(15.0, 0.0, 0.0, 0.0));

        base.apply_values_from(&overlay);
        assert_eq!(base.separator_insets(), Insets::new(15.0, 0.0, 0.0, 0.0));
        assert!(base.defines(MetricsFields::SEPARATOR_INSETS));
        // The overlay never defined a column count, so the base keeps its own.
        assert_eq!(base.columns(), 3);
    }

    #[test]
    fn merge_marks_fields_defined_transitively() {
        let mut first = SectionMetrics::new();
        first.set_row_spacing(4.0);
        first.set_background_color(Some(Color::BLACK));

        let mut middle = SectionMetrics::new();
        middle.apply_values_from(&first);

        let mut direct = SectionMetrics::new();
        direct.apply_values_from(&first);
        let mut chained = SectionMetrics::new();
        chained.apply_values_from(&middle);

        assert_eq!(direct.defined_fields(), chained.defined_fields());
        assert_eq!(chained.row_spacing(), 4.0);
    }

    #[test]
    fn merge_appends_decorations() {
        let shadow = Decoration {
            kind: "shadow",
            color: None,
            z_index: 0,
        };
        let ribbon = Decoration {
            kind: "ribbon",
            color: Some(Color::BLACK),
            z_index: 2,
        };

        let mut base = SectionMetrics::new();
        base.add_decoration(shadow);
        let mut overlay = SectionMetrics::new();
        overlay.add_decoration(ribbon);

        base.apply_values_from(&overlay);
        assert_eq!(base.decorations(), [shadow, ribbon]);
    }

    #[test]
    fn merge_replaces_supplementary_ordering_wholesale() {
        let mut overlay = SectionMetrics::new();
        overlay.set_supplementary_ordering(
            SupplementaryOrdering::DEFAULT.with_order(SupplementaryKind::Footer, -1),
        );

        let mut base = SectionMetrics::new();
        base.apply_values_from(&overlay);
        assert_eq!(
            base.supplementary_ordering().resolved()[0],
            SupplementaryKind::Footer,
        );
        assert!(base.defines(MetricsFields::SUPPLEMENTARY_ORDERING));
    }

    #[test]
    fn theme_resolution_fills_only_missing_fields() {
        let mut metrics = SectionMetrics::new();
        metrics.set_separator_color(Some(Color::BLACK));
        metrics.resolve_theme_defaults(&Theme::with_scale(2.0));

        assert_eq!(metrics.separator_color(), Some(Color::BLACK));
        assert_eq!(metrics.background_color(), Some(Theme::DEFAULT.background));
        assert_eq!(metrics.separator_width(), 0.5);
    }

    #[test]
    fn theme_resolution_is_idempotent() {
        let loud = Theme {
            background: Color::BLACK,
            selected_background: Color::BLACK,
            separator: Color::BLACK,
            section_separator: Color::BLACK,
            hairline: 3.0,
        };

        let mut metrics = SectionMetrics::new();
        metrics.resolve_theme_defaults(&Theme::DEFAULT);
        let resolved = metrics.clone();
        metrics.resolve_theme_defaults(&loud);
        assert_eq!(metrics, resolved);
    }

    #[test]
    fn content_background_merges_as_one_field() {
        let mut overlay = SectionMetrics::new();
        overlay.set_content_background(BackgroundAttributes {
            color: Some(Color::gray(240)),
            corner_radius: 8.0,
        });

        let mut base = SectionMetrics::new();
        base.apply_values_from(&overlay);
        assert_eq!(base.content_background().corner_radius, 8.0);
        assert_eq!(base.content_background().color, Some(Color::gray(240)));
    }
}
