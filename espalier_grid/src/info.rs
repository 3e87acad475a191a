// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The whole-layout model: every section, stacked.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use espalier_metrics::{SupplementaryKind, Theme};

use crate::attributes::LayoutAttributes;
use crate::builder::SectionBuilder;
use crate::invalidate::InvalidationContext;
use crate::section::{LayoutSection, SectionDescription};
use crate::types::{LayoutMeasure, LayoutSizing, SectionIndex};

/// Geometry for an entire collection: an optional global section followed by
/// the ordinary sections, stacked top to bottom at a shared width.
///
/// A host describes its content with [`SectionDescription`]s, runs
/// [`layout`](Self::layout), and reads frames back out. Between full layout
/// passes, the targeted mutation methods keep the geometry consistent with
/// measured view sizes, drag sessions, and pinned headers while reporting
/// everything that moved to an [`InvalidationContext`].
///
/// Descriptions whose kind no builder accepts still occupy a slot, so
/// ordinal indices always line up with the host's own section numbering.
#[derive(Clone, Debug)]
pub struct LayoutInfo {
    width: f64,
    theme: Theme,
    global: Option<LayoutSection>,
    sections: Vec<Option<LayoutSection>>,
    content_size: Size,
}

impl LayoutInfo {
    /// An empty layout at the given width, using the stock theme.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self::with_theme(width, Theme::DEFAULT)
    }

    /// An empty layout at the given width, resolving unassigned metric
    /// fields against `theme`.
    #[must_use]
    pub fn with_theme(width: f64, theme: Theme) -> Self {
        Self {
            width,
            theme,
            global: None,
            sections: Vec::new(),
            content_size: Size::ZERO,
        }
    }

    /// The width sections are laid out into.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Changes the layout width. Takes effect at the next
    /// [`layout`](Self::layout) pass.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// The theme used to resolve appearance defaults for added sections.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Total extent of the laid-out content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Number of ordinary section slots, including rejected ones.
    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Whether a global section is present.
    #[must_use]
    pub fn has_global_section(&self) -> bool {
        self.global.is_some()
    }

    /// The section at `index`, if that slot holds one.
    #[must_use]
    pub fn section(&self, index: SectionIndex) -> Option<&LayoutSection> {
        match index {
            SectionIndex::Global => self.global.as_ref(),
            SectionIndex::Ordinary(ordinal) => self.sections.get(ordinal)?.as_ref(),
        }
    }

    /// All present sections, global first.
    pub fn sections(&self) -> impl Iterator<Item = &LayoutSection> + '_ {
        self.global.iter().chain(self.sections.iter().flatten())
    }

    /// Replaces the global section.
    ///
    /// Returns `false` and removes any existing global section when no
    /// builder accepts the description's kind.
    pub fn set_global_section(&mut self, mut description: SectionDescription) -> bool {
        let Some(builder) = SectionBuilder::for_description(&description) else {
            self.global = None;
            return false;
        };
        description.metrics.resolve_theme_defaults(&self.theme);
        self.global = Some(builder.build(SectionIndex::Global, description));
        true
    }

    /// Appends an ordinary section.
    ///
    /// Returns `false` when no builder accepts the description's kind; the
    /// slot is still claimed so later ordinals are unaffected.
    pub fn add_section(&mut self, mut description: SectionDescription) -> bool {
        let index = SectionIndex::Ordinary(self.sections.len());
        let Some(builder) = SectionBuilder::for_description(&description) else {
            self.sections.push(None);
            return false;
        };
        description.metrics.resolve_theme_defaults(&self.theme);
        self.sections.push(Some(builder.build(index, description)));
        true
    }

    /// Removes every section, global included.
    pub fn invalidate(&mut self) {
        self.global = None;
        self.sections.clear();
        self.content_size = Size::ZERO;
    }

    /// Clears derived geometry ahead of a layout pass, keeping measured
    /// element sizes.
    pub fn prepare_for_layout(&mut self) {
        if let Some(global) = &mut self.global {
            global.reset();
        }
        for section in self.sections.iter_mut().flatten() {
            section.reset();
        }
    }

    /// Lays out every section at the current width.
    ///
    /// Element heights come from fixed metrics, from sizes retained since
    /// the last pass, or from `measure` when one is supplied. The pass
    /// replaces all geometry; `ctx` only receives reports from the targeted
    /// mutation methods, not from here.
    pub fn layout(
        &mut self,
        measure: Option<&mut dyn LayoutMeasure>,
        ctx: &mut dyn InvalidationContext,
    ) {
        let mut sizing = match measure {
            Some(measure) => LayoutSizing::with_measure(self.width, measure),
            None => LayoutSizing::new(self.width),
        };
        let last = self.sections.iter().rposition(Option::is_some);
        if let Some(global) = &mut self.global {
            global.set_last_section(last.is_none());
        }
        for (ordinal, slot) in self.sections.iter_mut().enumerate() {
            if let Some(section) = slot {
                section.set_last_section(last == Some(ordinal));
            }
        }

        let mut origin = Point::ZERO;
        if let Some(global) = &mut self.global {
            origin = global.layout(origin, &mut sizing, ctx);
        }
        for slot in &mut self.sections {
            if let Some(section) = slot {
                origin = section.layout(origin, &mut sizing, ctx);
            }
        }
        self.content_size = Size::new(self.width, origin.y);
    }

    /// Height left over below the content in a viewport of the given
    /// height.
    #[must_use]
    pub fn height_available_for_placeholders(&self, viewport_height: f64) -> f64 {
        (viewport_height - self.content_size.height).max(0.0)
    }

    /// Splits leftover viewport height evenly among resizable placeholders
    /// so empty content fills the screen.
    ///
    /// Sections below a grown placeholder shift down; the total growth is
    /// added to the content size and reported to `ctx`.
    pub fn finalize_layout(&mut self, viewport_height: f64, ctx: &mut dyn InvalidationContext) {
        let available = self.height_available_for_placeholders(viewport_height);
        if available <= 0.0 {
            return;
        }
        let eligible = self
            .sections
            .iter()
            .flatten()
            .filter(|section| {
                section.shows_placeholder() && section.metrics().resizes_placeholder()
            })
            .count();
        if eligible == 0 {
            return;
        }
        let share = available / eligible as f64;
        let mut shift = 0.0;
        for section in self.sections.iter_mut().flatten() {
            if shift != 0.0 {
                section.offset_by(Vec2::new(0.0, shift), ctx);
            }
            if section.shows_placeholder() && section.metrics().resizes_placeholder() {
                section.grow_placeholder(share, ctx);
                shift += share;
            }
        }
        if shift != 0.0 {
            self.content_size.height += shift;
            ctx.adjust_content_size(Size::new(0.0, shift));
        }
    }

    /// Records the measured size of one item and reflows everything below
    /// it, shifting later sections as needed.
    ///
    /// # Panics
    ///
    /// Panics when `section` does not hold a section or `index` is out of
    /// bounds.
    pub fn set_item_size(
        &mut self,
        section: SectionIndex,
        index: usize,
        size: Size,
        ctx: &mut dyn InvalidationContext,
    ) {
        let delta = self.expect_section(section).set_item_size(index, size, ctx);
        self.absorb_height_change(section, delta, ctx);
    }

    /// Records the measured size of one supplementary element and reflows
    /// everything below it, shifting later sections as needed.
    ///
    /// # Panics
    ///
    /// Panics when `section` does not hold a section, no elements of `kind`
    /// exist there, or `index` is out of bounds.
    pub fn set_supplementary_size(
        &mut self,
        section: SectionIndex,
        kind: SupplementaryKind,
        index: usize,
        size: Size,
        ctx: &mut dyn InvalidationContext,
    ) {
        let delta = self
            .expect_section(section)
            .set_supplementary_size(kind, index, size, ctx);
        self.absorb_height_change(section, delta, ctx);
    }

    /// Opens (or closes, with `None`) a gap for a cell being dragged over
    /// this layout. Takes effect at the next layout pass.
    ///
    /// # Panics
    ///
    /// Panics when `section` does not hold a section.
    pub fn set_phantom_cell(&mut self, section: SectionIndex, phantom: Option<(usize, Size)>) {
        self.expect_section(section).set_phantom_cell(phantom);
    }

    /// Marks an item as the source of an active drag, hiding it while its
    /// slot is preserved.
    ///
    /// # Panics
    ///
    /// Panics when `section` does not hold a section.
    pub fn set_item_dragging(&mut self, section: SectionIndex, index: usize, dragging: bool) {
        self.expect_section(section).set_item_dragging(index, dragging);
    }

    /// Re-derives pinned header positions for a scroll position.
    ///
    /// Pinnable global headers stack at the top of the viewport. When the
    /// view is pulled down past its top, the remaining global headers stack
    /// under them. The section straddling the bottom of that stack pins its
    /// own pinnable headers there, clamped so they never escape the
    /// section. Headers elsewhere return to where the layout pass put them.
    pub fn update_pinned_headers(
        &mut self,
        content_offset: Point,
        ctx: &mut dyn InvalidationContext,
    ) {
        let pin_line = content_offset.y;
        if let Some(global) = &mut self.global {
            global.reset_pinned_headers(ctx);
        }
        for section in self.sections.iter_mut().flatten() {
            section.reset_pinned_headers(ctx);
        }

        let mut cursor = pin_line;
        if let Some(global) = &mut self.global {
            cursor = global.pin_pinnable_headers(cursor, None, ctx);
            if pin_line < 0.0 {
                cursor = global.pin_non_pinnable_headers(cursor, ctx);
            }
        }
        for section in self.sections.iter_mut().flatten() {
            let frame = section.frame();
            if frame.y0 <= cursor && cursor < frame.y1 {
                section.pin_pinnable_headers(cursor, Some(frame.y1), ctx);
                break;
            }
        }
    }

    /// Attributes for every element, in global-then-ordinal order.
    #[must_use]
    pub fn layout_attributes(&self) -> Vec<LayoutAttributes> {
        let mut attributes = Vec::new();
        for section in self.sections() {
            attributes.extend(section.layout_attributes());
        }
        attributes
    }

    /// Attributes for every element whose frame intersects `rect`.
    #[must_use]
    pub fn layout_attributes_in(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut attributes = Vec::new();
        for section in self.sections() {
            attributes.extend(section.layout_attributes_in(rect));
        }
        attributes
    }

    fn expect_section(&mut self, index: SectionIndex) -> &mut LayoutSection {
        let section = match index {
            SectionIndex::Global => self.global.as_mut(),
            SectionIndex::Ordinary(ordinal) => {
                self.sections.get_mut(ordinal).and_then(Option::as_mut)
            }
        };
        match section {
            Some(section) => section,
            None => panic!("no section at {index:?}"),
        }
    }

    /// Shifts every section below `section` by `delta` and folds it into
    /// the content size.
    fn absorb_height_change(
        &mut self,
        section: SectionIndex,
        delta: f64,
        ctx: &mut dyn InvalidationContext,
    ) {
        if delta == 0.0 {
            return;
        }
        let start = match section {
            SectionIndex::Global => 0,
            SectionIndex::Ordinary(ordinal) => ordinal + 1,
        };
        for slot in self.sections.iter_mut().skip(start) {
            if let Some(later) = slot {
                later.offset_by(Vec2::new(0.0, delta), ctx);
            }
        }
        self.content_size.height += delta;
        ctx.adjust_content_size(Size::new(0.0, delta));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use espalier_metrics::{SectionMetrics, SupplementaryItem, SupplementaryKind};

    use super::LayoutInfo;
    use crate::attributes::ElementRef;
    use crate::invalidate::InvalidationRecord;
    use crate::section::{PlaceholderDescription, SectionDescription};
    use crate::types::{LayoutKind, SectionIndex};

    fn fixed_rows(item_count: usize) -> SectionDescription {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(44.0));
        SectionDescription::new(metrics, item_count)
    }

    fn pinned_header(height: f64) -> SupplementaryItem {
        let mut header = SupplementaryItem::header();
        header.height = Some(height);
        header.should_pin = true;
        header
    }

    fn placeholder_section() -> SectionDescription {
        let mut description = SectionDescription::new(SectionMetrics::new(), 0);
        description.placeholder = Some(PlaceholderDescription {
            height: 200.0,
            has_estimated_height: false,
            ..PlaceholderDescription::default()
        });
        description
    }

    #[test]
    fn sections_stack_below_the_global_section() {
        let mut info = LayoutInfo::new(320.0);
        let mut global = SectionDescription::new(SectionMetrics::new(), 0);
        global.supplementary_items.push(pinned_header(40.0));
        assert!(info.set_global_section(global));
        assert!(info.add_section(fixed_rows(2)));
        assert!(info.add_section(fixed_rows(1)));

        info.layout(None, &mut ());

        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let second = info.section(SectionIndex::Ordinary(1)).unwrap();
        assert_eq!(info.section(SectionIndex::Global).unwrap().frame().y1, 40.0);
        assert_eq!(first.frame(), Rect::new(0.0, 40.0, 320.0, 128.0));
        assert_eq!(second.frame(), Rect::new(0.0, 128.0, 320.0, 172.0));
        assert!(!first.is_last_section());
        assert!(second.is_last_section());
        assert_eq!(info.content_size(), Size::new(320.0, 172.0));
    }

    #[test]
    fn rejected_descriptions_hold_their_slot() {
        let mut info = LayoutInfo::new(320.0);
        assert!(info.add_section(fixed_rows(1)));
        let mut custom = fixed_rows(1);
        custom.kind = LayoutKind::Custom("masonry");
        assert!(!info.add_section(custom));
        assert!(info.add_section(fixed_rows(1)));

        info.layout(None, &mut ());

        assert_eq!(info.number_of_sections(), 3);
        assert!(info.section(SectionIndex::Ordinary(1)).is_none());
        let third = info.section(SectionIndex::Ordinary(2)).unwrap();
        assert_eq!(third.index(), SectionIndex::Ordinary(2));
        // The skipped slot takes no vertical space.
        assert_eq!(third.frame().y0, 44.0);
        assert_eq!(info.sections().count(), 2);
    }

    #[test]
    fn leftover_viewport_height_fills_resizable_placeholders() {
        let mut info = LayoutInfo::new(320.0);
        info.add_section(placeholder_section());
        info.add_section(placeholder_section());
        info.layout(None, &mut ());
        assert_eq!(info.content_size().height, 400.0);
        assert_eq!(info.height_available_for_placeholders(600.0), 200.0);

        let mut record = InvalidationRecord::new();
        info.finalize_layout(600.0, &mut record);

        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let second = info.section(SectionIndex::Ordinary(1)).unwrap();
        assert_eq!(first.placeholder().unwrap().frame.height(), 300.0);
        assert_eq!(second.frame().y0, 300.0);
        assert_eq!(second.placeholder().unwrap().frame, Rect::new(0.0, 300.0, 320.0, 600.0));
        assert_eq!(info.content_size().height, 600.0);
        assert_eq!(record.content_size_adjustment(), Size::new(0.0, 200.0));
    }

    #[test]
    fn fixed_height_placeholders_shift_but_do_not_grow() {
        let mut fixed = placeholder_section();
        fixed.metrics.set_resizes_placeholder(false);

        let mut info = LayoutInfo::new(320.0);
        info.add_section(placeholder_section());
        info.add_section(fixed);
        info.layout(None, &mut ());

        info.finalize_layout(600.0, &mut ());

        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let second = info.section(SectionIndex::Ordinary(1)).unwrap();
        // All 200 leftover points go to the one resizable placeholder.
        assert_eq!(first.placeholder().unwrap().frame.height(), 400.0);
        assert_eq!(second.frame().y0, 400.0);
        assert_eq!(second.placeholder().unwrap().frame.height(), 200.0);
    }

    #[test]
    fn item_resize_shifts_the_sections_below() {
        let mut info = LayoutInfo::new(320.0);
        info.add_section(fixed_rows(2));
        info.add_section(fixed_rows(1));
        info.layout(None, &mut ());

        let mut record = InvalidationRecord::new();
        info.set_item_size(
            SectionIndex::Ordinary(0),
            1,
            Size::new(320.0, 100.0),
            &mut record,
        );

        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let second = info.section(SectionIndex::Ordinary(1)).unwrap();
        assert_eq!(first.items()[1].frame.height(), 100.0);
        assert_eq!(second.frame().y0, 144.0);
        assert_eq!(second.items()[0].frame.y0, 144.0);
        assert_eq!(info.content_size().height, 188.0);
        assert_eq!(record.content_size_adjustment(), Size::new(0.0, 56.0));
        assert!(record.contains(ElementRef::cell(SectionIndex::Ordinary(1), 0)));
    }

    #[test]
    fn pinned_headers_follow_the_scroll_position() {
        let mut info = LayoutInfo::new(320.0);
        let mut global = SectionDescription::new(SectionMetrics::new(), 0);
        global.supplementary_items.push(pinned_header(40.0));
        info.set_global_section(global);
        for _ in 0..2 {
            let mut description = fixed_rows(2);
            description.supplementary_items.push(pinned_header(30.0));
            info.add_section(description);
        }
        info.layout(None, &mut ());

        // Sections span 40..158 and 158..276.
        info.update_pinned_headers(Point::new(0.0, 100.0), &mut ());

        let global = info.section(SectionIndex::Global).unwrap();
        let global_header = global.pinnable_headers().next().unwrap();
        assert_eq!(global_header.frame, Rect::new(0.0, 100.0, 320.0, 140.0));
        assert!(global_header.is_pinned);

        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let header = first.pinnable_headers().next().unwrap();
        // Pinned below the global stack, clamped to the section bottom.
        assert_eq!(header.frame, Rect::new(0.0, 128.0, 320.0, 158.0));
        assert!(header.is_pinned);

        // Scrolling back to the top restores the unpinned geometry.
        info.update_pinned_headers(Point::ZERO, &mut ());
        let global = info.section(SectionIndex::Global).unwrap();
        let global_header = global.pinnable_headers().next().unwrap();
        assert_eq!(global_header.frame.y0, 0.0);
        assert!(!global_header.is_pinned);
        let first = info.section(SectionIndex::Ordinary(0)).unwrap();
        let header = first.pinnable_headers().next().unwrap();
        assert_eq!(header.frame.y0, 40.0);
        assert!(!header.is_pinned);
    }

    #[test]
    fn overscroll_stacks_remaining_global_headers() {
        let mut info = LayoutInfo::new(320.0);
        let mut global = SectionDescription::new(SectionMetrics::new(), 0);
        global.supplementary_items.push(pinned_header(40.0));
        let mut loose = SupplementaryItem::header();
        loose.height = Some(25.0);
        global.supplementary_items.push(loose);
        info.set_global_section(global);
        info.add_section(fixed_rows(2));
        info.layout(None, &mut ());

        info.update_pinned_headers(Point::new(0.0, -50.0), &mut ());

        let global = info.section(SectionIndex::Global).unwrap();
        let pinned = global.pinnable_headers().next().unwrap();
        let loose = global.non_pinnable_headers().next().unwrap();
        assert_eq!(pinned.frame, Rect::new(0.0, -50.0, 320.0, -10.0));
        assert_eq!(loose.frame, Rect::new(0.0, -10.0, 320.0, 15.0));
    }

    #[test]
    fn attributes_aggregate_across_sections() {
        let mut info = LayoutInfo::new(320.0);
        let mut global = SectionDescription::new(SectionMetrics::new(), 0);
        global.supplementary_items.push(pinned_header(40.0));
        info.set_global_section(global);
        info.add_section(fixed_rows(2));
        info.layout(None, &mut ());

        let all = info.layout_attributes();
        assert_eq!(all.len(), 3);
        assert_eq!(
            all[0].element,
            ElementRef::supplementary(SectionIndex::Global, SupplementaryKind::Header, 0)
        );

        // 40..84 covers the header and the first item only.
        let some = info.layout_attributes_in(Rect::new(0.0, 0.0, 320.0, 84.0));
        assert_eq!(some.len(), 2);
    }

    #[test]
    fn invalidate_forgets_every_section() {
        let mut info = LayoutInfo::new(320.0);
        info.set_global_section(SectionDescription::new(SectionMetrics::new(), 0));
        info.add_section(fixed_rows(1));
        info.layout(None, &mut ());

        info.invalidate();

        assert!(!info.has_global_section());
        assert_eq!(info.number_of_sections(), 0);
        assert_eq!(info.content_size(), Size::ZERO);
    }

    #[test]
    #[should_panic(expected = "no section at")]
    fn size_updates_for_missing_sections_are_a_contract_violation() {
        let mut info = LayoutInfo::new(320.0);
        info.set_item_size(
            SectionIndex::Ordinary(0),
            0,
            Size::new(320.0, 10.0),
            &mut (),
        );
    }
}
