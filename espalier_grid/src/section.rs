// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout-time state for one section: items, rows, supplementary elements,
//! decorations, and the operations that keep their frames consistent.

use alloc::{vec, vec::Vec};

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use espalier_metrics::{SectionMetrics, SupplementaryItem, SupplementaryKind};

use crate::attributes::{
    DecorationKind, ElementRef, HEADER_Z_INDEX, LayoutAttributes, PINNED_HEADER_Z_INDEX,
};
use crate::engine::SectionLayoutEngine;
use crate::invalidate::InvalidationContext;
use crate::types::{LayoutKind, LayoutSizing, SectionIndex};

/// Describes the placeholder a section shows while it has no items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderDescription {
    /// Identifier of the view that renders the placeholder.
    pub reuse_identifier: &'static str,
    /// Height to lay the placeholder out at, in layout units.
    pub height: f64,
    /// Whether `height` is an estimate to be replaced by a real measurement.
    pub has_estimated_height: bool,
}

impl Default for PlaceholderDescription {
    fn default() -> Self {
        Self {
            reuse_identifier: "placeholder",
            height: 200.0,
            has_estimated_height: true,
        }
    }
}

/// Everything needed to lay out one section: the layout family, resolved
/// metrics, the number of items, and the declared supplementary elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionDescription {
    /// The layout family the section asks for.
    pub kind: LayoutKind,
    /// Metrics governing the section's geometry and appearance.
    pub metrics: SectionMetrics,
    /// Number of item cells.
    pub item_count: usize,
    /// Supplementary elements in declaration order.
    pub supplementary_items: Vec<SupplementaryItem>,
    /// Placeholder shown while the section has no items, if any.
    pub placeholder: Option<PlaceholderDescription>,
}

impl SectionDescription {
    /// A grid section with `item_count` items and no supplementary elements.
    #[must_use]
    pub fn new(metrics: SectionMetrics, item_count: usize) -> Self {
        Self {
            kind: LayoutKind::Grid,
            metrics,
            item_count,
            supplementary_items: Vec::new(),
            placeholder: None,
        }
    }
}

/// Layout-time state of one item cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutItem {
    /// The cell's frame in content coordinates.
    pub frame: Rect,
    /// Visual column the cell landed in.
    pub column: usize,
    /// Whether the frame height is an estimate rather than a measurement.
    pub has_estimated_height: bool,
    /// Whether the cell is being dragged; dragged cells keep their slot but
    /// produce hidden attributes.
    pub dragging: bool,
}

/// One laid-out row of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRow {
    /// The row's frame, spanning the cell block horizontally.
    pub frame: Rect,
    /// Indices of the items placed in this row.
    pub items: core::ops::Range<usize>,
}

/// Layout-time state of one supplementary element.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSupplementaryItem {
    /// The declaration this element was laid out from.
    pub descriptor: SupplementaryItem,
    /// The element's frame in content coordinates.
    pub frame: Rect,
    /// Whether the element is currently suppressed (zero height, hidden
    /// while a placeholder shows, or an unplaced custom kind).
    pub hidden: bool,
    /// Whether the frame height is an estimate rather than a measurement.
    pub has_estimated_height: bool,
    /// The vertical position the element occupies when not pinned.
    pub unpinned_y: f64,
    /// Whether the element is currently pinned to the viewport edge.
    pub is_pinned: bool,
}

/// Layout-time state of a section's placeholder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPlaceholder {
    /// The declaration the placeholder was laid out from.
    pub descriptor: PlaceholderDescription,
    /// The placeholder's frame in content coordinates.
    pub frame: Rect,
    /// Whether the frame height is an estimate rather than a measurement.
    pub has_estimated_height: bool,
}

/// A decoration emitted during layout: separators, backgrounds, and
/// host-declared extras.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutDecoration {
    /// What the decoration is.
    pub kind: DecorationKind,
    /// Position among decorations of the same kind in the section.
    pub index: usize,
    /// The decoration's frame in content coordinates.
    pub frame: Rect,
    /// Fill color, if any.
    pub color: Option<espalier_metrics::Color>,
    /// Stacking order.
    pub z_index: i32,
    /// Corner radius, used by background decorations.
    pub corner_radius: f64,
}

/// A section mid-layout or post-layout: the aggregate the engines fill in
/// and the incremental operations mutate.
///
/// Sections are built from a [`SectionDescription`] through
/// [`SectionBuilder`](crate::SectionBuilder) and owned by a
/// [`LayoutInfo`](crate::LayoutInfo). Measured frames survive
/// [`reset`](Self::reset) and relayout, so sizes reported through
/// [`set_item_size`](Self::set_item_size) are not lost when the section is
/// laid out again.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSection {
    pub(crate) index: SectionIndex,
    pub(crate) metrics: SectionMetrics,
    pub(crate) items: Vec<LayoutItem>,
    pub(crate) rows: Vec<LayoutRow>,
    pub(crate) supplementaries: SmallVec<[(SupplementaryKind, Vec<LayoutSupplementaryItem>); 4]>,
    pub(crate) decorations: Vec<LayoutDecoration>,
    pub(crate) placeholder: Option<LayoutPlaceholder>,
    pub(crate) frame: Rect,
    pub(crate) content_frame: Rect,
    pub(crate) pinnable: SmallVec<[usize; 4]>,
    pub(crate) non_pinnable: SmallVec<[usize; 4]>,
    pub(crate) phantom_cell_index: Option<usize>,
    pub(crate) phantom_cell_size: Size,
    pub(crate) last_section: bool,
}

impl LayoutSection {
    pub(crate) fn new(index: SectionIndex, description: SectionDescription) -> Self {
        let SectionDescription {
            kind: _,
            metrics,
            item_count,
            supplementary_items,
            placeholder,
        } = description;

        let mut supplementaries: SmallVec<[(SupplementaryKind, Vec<LayoutSupplementaryItem>); 4]> =
            SmallVec::new();
        for descriptor in supplementary_items {
            let kind = descriptor.kind;
            let item = LayoutSupplementaryItem {
                descriptor,
                frame: Rect::ZERO,
                hidden: false,
                has_estimated_height: true,
                unpinned_y: 0.0,
                is_pinned: false,
            };
            match supplementaries.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, group)) => group.push(item),
                None => supplementaries.push((kind, vec![item])),
            }
        }

        let items = (0..item_count)
            .map(|_| LayoutItem {
                frame: Rect::ZERO,
                column: 0,
                has_estimated_height: true,
                dragging: false,
            })
            .collect();

        let placeholder = placeholder.map(|descriptor| LayoutPlaceholder {
            descriptor,
            frame: Rect::ZERO,
            has_estimated_height: descriptor.has_estimated_height,
        });

        Self {
            index,
            metrics,
            items,
            rows: Vec::new(),
            supplementaries,
            decorations: Vec::new(),
            placeholder,
            frame: Rect::ZERO,
            content_frame: Rect::ZERO,
            pinnable: SmallVec::new(),
            non_pinnable: SmallVec::new(),
            phantom_cell_index: None,
            phantom_cell_size: Size::ZERO,
            last_section: false,
        }
    }

    /// Which section this is.
    #[must_use]
    pub fn index(&self) -> SectionIndex {
        self.index
    }

    /// The metrics the section is laid out with.
    #[must_use]
    pub fn metrics(&self) -> &SectionMetrics {
        &self.metrics
    }

    /// The section's frame in content coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The area holding the cell block (or placeholder) and its padding,
    /// inside any headers, footers, and auxiliary columns.
    #[must_use]
    pub fn content_frame(&self) -> Rect {
        self.content_frame
    }

    /// The laid-out items.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// The laid-out rows.
    #[must_use]
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// The decorations emitted by the most recent layout.
    #[must_use]
    pub fn decorations(&self) -> &[LayoutDecoration] {
        &self.decorations
    }

    /// The section's placeholder state, if it declared one.
    #[must_use]
    pub fn placeholder(&self) -> Option<&LayoutPlaceholder> {
        self.placeholder.as_ref()
    }

    /// The supplementary elements of `kind`, in declaration order.
    #[must_use]
    pub fn supplementary_items(&self, kind: SupplementaryKind) -> &[LayoutSupplementaryItem] {
        self.supplementaries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, group)| group.as_slice())
            .unwrap_or(&[])
    }

    /// The supplementary kinds this section declared, in declaration order.
    pub fn supplementary_kinds(&self) -> impl Iterator<Item = SupplementaryKind> + '_ {
        self.supplementaries.iter().map(|(kind, _)| *kind)
    }

    /// Headers that stay visible at the viewport edge while the section
    /// scrolls beneath them.
    pub fn pinnable_headers(&self) -> impl Iterator<Item = &LayoutSupplementaryItem> + '_ {
        let headers = self.supplementary_items(SupplementaryKind::Header);
        self.pinnable.iter().map(move |&index| &headers[index])
    }

    /// Headers that scroll normally.
    pub fn non_pinnable_headers(&self) -> impl Iterator<Item = &LayoutSupplementaryItem> + '_ {
        let headers = self.supplementary_items(SupplementaryKind::Header);
        self.non_pinnable.iter().map(move |&index| &headers[index])
    }

    /// Whether the placeholder is laid out in place of the cell block.
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.placeholder.is_some() && self.items.is_empty()
    }

    /// The drag-reorder gap, as `(slot index, gap size)`.
    #[must_use]
    pub fn phantom_cell(&self) -> Option<(usize, Size)> {
        self.phantom_cell_index
            .map(|index| (index, self.phantom_cell_size))
    }

    /// Opens (or closes, with `None`) a drag-reorder gap at a grid slot.
    ///
    /// The gap participates in row placement like a cell of the given size.
    /// Takes effect on the next layout pass.
    pub fn set_phantom_cell(&mut self, phantom: Option<(usize, Size)>) {
        debug_assert!(
            phantom.is_none_or(|(index, _)| index <= self.items.len()),
            "phantom cell slot out of range"
        );
        match phantom {
            Some((index, size)) => {
                self.phantom_cell_index = Some(index);
                self.phantom_cell_size = size;
            }
            None => {
                self.phantom_cell_index = None;
                self.phantom_cell_size = Size::ZERO;
            }
        }
    }

    /// Marks the item at `index` as being dragged, or releases it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_item_dragging(&mut self, index: usize, dragging: bool) {
        self.items[index].dragging = dragging;
    }

    /// Whether this is the final section of the layout.
    #[must_use]
    pub fn is_last_section(&self) -> bool {
        self.last_section
    }

    /// Marks whether this is the final section, which gates the trailing
    /// section separator.
    pub fn set_last_section(&mut self, last: bool) {
        self.last_section = last;
    }

    /// Clears rows, decorations, and header bookkeeping ahead of a fresh
    /// layout pass.
    ///
    /// Item and supplementary frames are kept: measured heights recorded on
    /// them carry over into the next pass.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.decorations.clear();
        self.pinnable.clear();
        self.non_pinnable.clear();
        self.frame = Rect::ZERO;
        self.content_frame = Rect::ZERO;
    }

    /// Lays the section out from `origin` and returns the origin for the
    /// next section.
    ///
    /// Resets previous rows and headers first, so repeated calls with the
    /// same inputs produce identical geometry.
    pub fn layout(
        &mut self,
        origin: Point,
        sizing: &mut LayoutSizing<'_>,
        ctx: &mut dyn InvalidationContext,
    ) -> Point {
        SectionLayoutEngine::layout(self, origin, sizing, ctx)
    }

    /// Applies a measured item size, reflowing the item's row and everything
    /// beneath it.
    ///
    /// Returns the change in section height. Every moved or resized element
    /// is reported to `ctx`. The item's width is fixed by the column grid, so
    /// only `size.height` is used.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_item_size(
        &mut self,
        index: usize,
        size: Size,
        ctx: &mut dyn InvalidationContext,
    ) -> f64 {
        let item = &mut self.items[index];
        let old = item.frame;
        item.has_estimated_height = false;
        let new = Rect::new(old.x0, old.y0, old.x1, old.y0 + size.height);
        if new == old {
            return 0.0;
        }
        item.frame = new;
        let section = self.index;
        ctx.invalidate_element(ElementRef::cell(section, index), old.union(new));

        let Some(row_position) = self.rows.iter().position(|row| row.items.contains(&index))
        else {
            return 0.0;
        };
        let row_frame = self.rows[row_position].frame;
        let range = self.rows[row_position].items.clone();
        let new_row_height = range.fold(0.0_f64, |height, i| {
            height.max(self.items[i].frame.height())
        });
        let delta = new_row_height - row_frame.height();
        if delta == 0.0 {
            return 0.0;
        }
        self.ripple_height_change(row_frame.y1, delta, ctx);
        delta
    }

    /// Applies a measured supplementary size, shifting everything beneath
    /// the element.
    ///
    /// Returns the change in section height. Only `size.height` is used.
    ///
    /// # Panics
    ///
    /// Panics if the section has no elements of `kind` or `index` is out of
    /// range.
    pub fn set_supplementary_size(
        &mut self,
        kind: SupplementaryKind,
        index: usize,
        size: Size,
        ctx: &mut dyn InvalidationContext,
    ) -> f64 {
        let section = self.index;
        let Some((_, group)) = self.supplementaries.iter_mut().find(|(k, _)| *k == kind) else {
            panic!("section has no supplementary elements of kind {kind:?}");
        };
        let item = &mut group[index];
        let old = item.frame;
        item.has_estimated_height = false;
        let delta = size.height - old.height();
        if delta == 0.0 {
            return 0.0;
        }
        item.frame = Rect::new(old.x0, old.y0, old.x1, old.y1 + delta);
        ctx.invalidate_element(
            ElementRef::supplementary(section, kind, index),
            old.union(item.frame),
        );
        self.ripple_height_change(old.y1, delta, ctx);
        delta
    }

    /// Stretches the placeholder by `extra` and shifts everything beneath
    /// it, fixing the resulting height as measured.
    pub(crate) fn grow_placeholder(&mut self, extra: f64, ctx: &mut dyn InvalidationContext) {
        if extra <= 0.0 {
            return;
        }
        let section = self.index;
        let Some(placeholder) = &mut self.placeholder else {
            return;
        };
        let old = placeholder.frame;
        placeholder.frame = Rect::new(old.x0, old.y0, old.x1, old.y1 + extra);
        placeholder.has_estimated_height = false;
        ctx.invalidate_element(
            ElementRef::placeholder(section),
            old.union(placeholder.frame),
        );
        self.ripple_height_change(old.y1, extra, ctx);
    }

    /// Moves every element whose frame starts at or after `origin` (in both
    /// axes) by `offset`, reporting each move to `ctx`.
    ///
    /// Elements starting above or to the left of `origin` stay put, so a
    /// change can propagate strictly downstream of its boundary.
    pub fn offset_content_after(
        &mut self,
        origin: Point,
        offset: Vec2,
        ctx: &mut dyn InvalidationContext,
    ) {
        let section = self.index;
        for (index, item) in self.items.iter_mut().enumerate() {
            if item.frame.x0 < origin.x || item.frame.y0 < origin.y {
                continue;
            }
            let old = item.frame;
            item.frame = translated(old, offset);
            ctx.invalidate_element(ElementRef::cell(section, index), old.union(item.frame));
        }
        for (kind, group) in &mut self.supplementaries {
            for (index, item) in group.iter_mut().enumerate() {
                // Judged by the resting position, not the current frame, so
                // a header pinned into the changed region is not dragged
                // along with content that is actually below it.
                if item.frame.x0 < origin.x || item.unpinned_y < origin.y {
                    continue;
                }
                let old = item.frame;
                item.frame = translated(old, offset);
                item.unpinned_y += offset.y;
                ctx.invalidate_element(
                    ElementRef::supplementary(section, *kind, index),
                    old.union(item.frame),
                );
            }
        }
        for row in &mut self.rows {
            if row.frame.x0 < origin.x || row.frame.y0 < origin.y {
                continue;
            }
            row.frame = translated(row.frame, offset);
        }
        for decoration in &mut self.decorations {
            if decoration.frame.x0 < origin.x || decoration.frame.y0 < origin.y {
                continue;
            }
            let old = decoration.frame;
            decoration.frame = translated(old, offset);
            ctx.invalidate_element(
                ElementRef::decoration(section, decoration.kind, decoration.index),
                old.union(decoration.frame),
            );
        }
        if let Some(placeholder) = &mut self.placeholder {
            if placeholder.frame.x0 >= origin.x && placeholder.frame.y0 >= origin.y {
                let old = placeholder.frame;
                placeholder.frame = translated(old, offset);
                ctx.invalidate_element(
                    ElementRef::placeholder(section),
                    old.union(placeholder.frame),
                );
            }
        }
        if self.content_frame.x0 >= origin.x && self.content_frame.y0 >= origin.y {
            self.content_frame = translated(self.content_frame, offset);
        }
    }

    /// Moves the whole section, frame included, by `delta`.
    pub(crate) fn offset_by(&mut self, delta: Vec2, ctx: &mut dyn InvalidationContext) {
        // An origin of -inf catches every element, including headers pinned
        // above the section's own frame.
        self.offset_content_after(
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            delta,
            ctx,
        );
        self.frame = translated(self.frame, delta);
    }

    /// Grows elements spanning the horizontal line at `boundary` and moves
    /// elements below it.
    fn ripple_height_change(
        &mut self,
        boundary: f64,
        delta: f64,
        ctx: &mut dyn InvalidationContext,
    ) {
        let section = self.index;
        // Stretch first, using positions from before anything moves: a rect
        // spanning the boundary keeps its top and gains the delta at the
        // bottom.
        for row in &mut self.rows {
            if row.frame.y0 < boundary && row.frame.y1 >= boundary {
                row.frame = Rect::new(
                    row.frame.x0,
                    row.frame.y0,
                    row.frame.x1,
                    row.frame.y1 + delta,
                );
            }
        }
        for decoration in &mut self.decorations {
            if decoration.frame.y0 < boundary && decoration.frame.y1 >= boundary {
                let old = decoration.frame;
                decoration.frame = Rect::new(old.x0, old.y0, old.x1, old.y1 + delta);
                ctx.invalidate_element(
                    ElementRef::decoration(section, decoration.kind, decoration.index),
                    old.union(decoration.frame),
                );
            }
        }
        if self.content_frame.y0 < boundary && self.content_frame.y1 >= boundary {
            self.content_frame = Rect::new(
                self.content_frame.x0,
                self.content_frame.y0,
                self.content_frame.x1,
                self.content_frame.y1 + delta,
            );
        }
        if self.frame.y0 < boundary && self.frame.y1 >= boundary {
            self.frame = Rect::new(
                self.frame.x0,
                self.frame.y0,
                self.frame.x1,
                self.frame.y1 + delta,
            );
        }
        self.offset_content_after(
            Point::new(self.frame.x0, boundary),
            Vec2::new(0.0, delta),
            ctx,
        );
    }

    /// Moves every tracked header back to its unpinned position.
    pub(crate) fn reset_pinned_headers(&mut self, ctx: &mut dyn InvalidationContext) {
        let section = self.index;
        let mut indices = self.pinnable.clone();
        indices.extend_from_slice(&self.non_pinnable);
        let Some((_, headers)) = self
            .supplementaries
            .iter_mut()
            .find(|(k, _)| *k == SupplementaryKind::Header)
        else {
            return;
        };
        for &index in &indices {
            let header = &mut headers[index];
            header.is_pinned = false;
            if header.frame.y0 != header.unpinned_y {
                let old = header.frame;
                let height = old.height();
                header.frame =
                    Rect::new(old.x0, header.unpinned_y, old.x1, header.unpinned_y + height);
                ctx.invalidate_element(
                    ElementRef::supplementary(section, SupplementaryKind::Header, index),
                    old.union(header.frame),
                );
            }
        }
    }

    /// Stacks the pinnable headers downward from `cursor`, optionally
    /// clamping each so it never passes `clamp_bottom` (the push-out effect)
    /// nor rises above its unpinned position. Returns the cursor below the
    /// stacked run.
    pub(crate) fn pin_pinnable_headers(
        &mut self,
        cursor: f64,
        clamp_bottom: Option<f64>,
        ctx: &mut dyn InvalidationContext,
    ) -> f64 {
        let indices = self.pinnable.clone();
        self.pin_header_run(&indices, cursor, clamp_bottom, ctx)
    }

    /// Stacks the non-pinnable headers downward from `cursor`. Used only for
    /// the global section while the viewport is over-scrolled past the top.
    pub(crate) fn pin_non_pinnable_headers(
        &mut self,
        cursor: f64,
        ctx: &mut dyn InvalidationContext,
    ) -> f64 {
        let indices = self.non_pinnable.clone();
        self.pin_header_run(&indices, cursor, None, ctx)
    }

    fn pin_header_run(
        &mut self,
        indices: &[usize],
        mut cursor: f64,
        clamp_bottom: Option<f64>,
        ctx: &mut dyn InvalidationContext,
    ) -> f64 {
        let section = self.index;
        let Some((_, headers)) = self
            .supplementaries
            .iter_mut()
            .find(|(k, _)| *k == SupplementaryKind::Header)
        else {
            return cursor;
        };
        for &index in indices {
            let header = &mut headers[index];
            if header.hidden {
                continue;
            }
            let height = header.frame.height();
            if height <= 0.0 {
                continue;
            }
            let mut y = cursor;
            if let Some(bottom) = clamp_bottom {
                y = y.min(bottom - height).max(header.unpinned_y);
            }
            if y != header.frame.y0 {
                let old = header.frame;
                header.frame = Rect::new(old.x0, y, old.x1, y + height);
                ctx.invalidate_element(
                    ElementRef::supplementary(section, SupplementaryKind::Header, index),
                    old.union(header.frame),
                );
            }
            header.is_pinned = header.frame.y0 != header.unpinned_y;
            cursor = y + height;
        }
        cursor
    }

    /// Attributes for the cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn item_attributes(&self, index: usize) -> LayoutAttributes {
        let item = &self.items[index];
        let mut attributes =
            LayoutAttributes::new(ElementRef::cell(self.index, index), item.frame);
        attributes.hidden = item.dragging;
        attributes.layout_margins = self.metrics.layout_margins();
        attributes.background_color = self.metrics.background_color();
        attributes.selected_background_color = self.metrics.selected_background_color();
        attributes.corner_radius = self.metrics.corner_radius();
        attributes
    }

    /// Attributes for supplementary element `index` of `kind`, or `None` if
    /// the section has no such element.
    #[must_use]
    pub fn supplementary_attributes(
        &self,
        kind: SupplementaryKind,
        index: usize,
    ) -> Option<LayoutAttributes> {
        let item = self.supplementary_items(kind).get(index)?;
        let descriptor = &item.descriptor;
        let pinned = item.is_pinned;
        let mut attributes = LayoutAttributes::new(
            ElementRef::supplementary(self.index, kind, index),
            item.frame,
        );
        attributes.hidden = item.hidden;
        attributes.pinned = pinned;
        attributes.z_index = if pinned {
            PINNED_HEADER_Z_INDEX
        } else {
            HEADER_Z_INDEX
        };
        attributes.layout_margins = descriptor.attributes.layout_margins;
        let background = descriptor
            .attributes
            .background_color
            .or(self.metrics.background_color());
        attributes.background_color = if pinned {
            descriptor.attributes.pinned_background_color.or(background)
        } else {
            background
        };
        attributes.selected_background_color = descriptor
            .attributes
            .selected_background_color
            .or(self.metrics.selected_background_color());
        attributes.shows_separator = descriptor.attributes.shows_separator;
        let separator = descriptor
            .attributes
            .separator_color
            .or(self.metrics.separator_color());
        attributes.separator_color = if pinned {
            descriptor.attributes.pinned_separator_color.or(separator)
        } else {
            separator
        };
        attributes.simulates_selection = descriptor.attributes.simulates_selection;
        Some(attributes)
    }

    /// Attributes for the placeholder, or `None` when it is not showing.
    #[must_use]
    pub fn placeholder_attributes(&self) -> Option<LayoutAttributes> {
        if !self.shows_placeholder() {
            return None;
        }
        let placeholder = self.placeholder.as_ref()?;
        let mut attributes = LayoutAttributes::new(
            ElementRef::placeholder(self.index),
            placeholder.frame,
        );
        attributes.background_color = self.metrics.background_color();
        attributes.selected_background_color = self.metrics.selected_background_color();
        Some(attributes)
    }

    fn decoration_attributes(&self, position: usize) -> LayoutAttributes {
        let decoration = self.decorations[position];
        let mut attributes = LayoutAttributes::new(
            ElementRef::decoration(self.index, decoration.kind, decoration.index),
            decoration.frame,
        );
        attributes.z_index = decoration.z_index;
        attributes.background_color = decoration.color;
        attributes.corner_radius = decoration.corner_radius;
        attributes
    }

    /// Attributes for every element of the section: items first, then
    /// supplementary elements, decorations, and the placeholder.
    #[must_use]
    pub fn layout_attributes(&self) -> Vec<LayoutAttributes> {
        let supplementary_count: usize = self
            .supplementaries
            .iter()
            .map(|(_, group)| group.len())
            .sum();
        let mut attributes =
            Vec::with_capacity(self.items.len() + supplementary_count + self.decorations.len() + 1);
        for index in 0..self.items.len() {
            attributes.push(self.item_attributes(index));
        }
        for (kind, group) in &self.supplementaries {
            for index in 0..group.len() {
                if let Some(a) = self.supplementary_attributes(*kind, index) {
                    attributes.push(a);
                }
            }
        }
        for position in 0..self.decorations.len() {
            attributes.push(self.decoration_attributes(position));
        }
        if let Some(a) = self.placeholder_attributes() {
            attributes.push(a);
        }
        attributes
    }

    /// Attributes for every element whose frame intersects `rect`.
    #[must_use]
    pub fn layout_attributes_in(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut attributes = self.layout_attributes();
        attributes.retain(|a| intersects(a.frame, rect));
        attributes
    }
}

pub(crate) fn translated(rect: Rect, delta: Vec2) -> Rect {
    Rect::new(
        rect.x0 + delta.x,
        rect.y0 + delta.y,
        rect.x1 + delta.x,
        rect.y1 + delta.y,
    )
}

pub(crate) fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
