// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of headers, footers, and auxiliary columns around a section's
//! content.

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use espalier_metrics::SupplementaryKind;

use crate::engine::ContentLayoutEngine;
use crate::invalidate::InvalidationContext;
use crate::section::{LayoutSection, LayoutSupplementaryItem};
use crate::types::{LayoutSizing, SectionIndex};

/// Wraps a content engine and peels section space for supplementary
/// elements around it.
///
/// Kinds are visited in the metrics' resolved ordering; each visited kind
/// claims space from what remains, so earlier kinds sit outermost. Headers
/// stack at the current top, footers capture their span and are placed once
/// the content bottom is known, and auxiliary kinds reserve side strips
/// whose items stack with the metrics' auxiliary spacing. Padding separates
/// the innermost boundary from the wrapped content. Kinds outside the
/// built-in ordering are never placed.
pub(crate) struct SupplementaryLayoutEngine<E> {
    inner: E,
}

impl<E: ContentLayoutEngine> SupplementaryLayoutEngine<E> {
    pub(crate) fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: ContentLayoutEngine> ContentLayoutEngine for SupplementaryLayoutEngine<E> {
    fn layout_content(
        &mut self,
        section: &mut LayoutSection,
        origin: Point,
        width: f64,
        sizing: &mut LayoutSizing<'_>,
        ctx: &mut dyn InvalidationContext,
    ) -> Point {
        let section_index = section.index;
        let showing_placeholder = section.shows_placeholder();
        let order = section.metrics.supplementary_ordering().resolved();
        let padding = section.metrics.padding();
        let aux_spacing = section.metrics.auxiliary_column_spacing();

        let mut left = origin.x;
        let mut right = origin.x + width;
        let mut top = origin.y;
        let mut aux_bottom = origin.y;
        let mut footers: SmallVec<[(usize, f64, f64); 2]> = SmallVec::new();

        for kind in order {
            let Some(group) = group_position(section, kind) else {
                continue;
            };
            let count = section.supplementaries[group].1.len();
            match kind {
                SupplementaryKind::Header => {
                    for index in 0..count {
                        let item = &mut section.supplementaries[group].1[index];
                        if showing_placeholder
                            && !item.descriptor.visible_while_showing_placeholder
                        {
                            suppress(item, left, top, right);
                            continue;
                        }
                        let height = resolve_height(
                            item,
                            section_index,
                            kind,
                            index,
                            right - left,
                            sizing,
                        );
                        if height <= 0.0 {
                            suppress(item, left, top, right);
                            continue;
                        }
                        item.hidden = false;
                        item.frame = Rect::new(left, top, right, top + height);
                        item.unpinned_y = top;
                        item.is_pinned = false;
                        let should_pin = item.descriptor.should_pin;
                        top += height;
                        if should_pin {
                            section.pinnable.push(index);
                        } else {
                            section.non_pinnable.push(index);
                        }
                    }
                }
                SupplementaryKind::Footer => {
                    for index in 0..count {
                        footers.push((index, left, right));
                    }
                }
                SupplementaryKind::LeftAuxiliary | SupplementaryKind::RightAuxiliary => {
                    let strip_width = if kind == SupplementaryKind::LeftAuxiliary {
                        section.metrics.left_auxiliary_column_width()
                    } else {
                        section.metrics.right_auxiliary_column_width()
                    };
                    if strip_width <= 0.0 {
                        for index in 0..count {
                            let item = &mut section.supplementaries[group].1[index];
                            suppress(item, left, top, left);
                        }
                        continue;
                    }
                    let (x0, x1) = if kind == SupplementaryKind::LeftAuxiliary {
                        let span = (left, left + strip_width);
                        left += strip_width;
                        span
                    } else {
                        let span = (right - strip_width, right);
                        right -= strip_width;
                        span
                    };
                    let mut y = top;
                    let mut placed = false;
                    for index in 0..count {
                        let item = &mut section.supplementaries[group].1[index];
                        if showing_placeholder
                            && !item.descriptor.visible_while_showing_placeholder
                        {
                            suppress(item, x0, y, x1);
                            continue;
                        }
                        let height = resolve_height(
                            item,
                            section_index,
                            kind,
                            index,
                            strip_width,
                            sizing,
                        );
                        if height <= 0.0 {
                            suppress(item, x0, y, x1);
                            continue;
                        }
                        if placed {
                            y += aux_spacing;
                        }
                        item.hidden = false;
                        item.frame = Rect::new(x0, y, x1, y + height);
                        item.unpinned_y = y;
                        item.is_pinned = false;
                        y += height;
                        placed = true;
                    }
                    if placed {
                        aux_bottom = aux_bottom.max(y);
                    }
                }
                SupplementaryKind::Custom(_) => {}
            }
        }

        // Kinds outside the built-in ordering are stored but never placed.
        for group in 0..section.supplementaries.len() {
            if section.supplementaries[group].0.is_built_in() {
                continue;
            }
            for index in 0..section.supplementaries[group].1.len() {
                let item = &mut section.supplementaries[group].1[index];
                item.hidden = true;
                item.frame = Rect::ZERO;
                item.unpinned_y = 0.0;
                item.is_pinned = false;
            }
        }

        let inner_left = left + padding.x0;
        let inner_right = right - padding.x1;
        let inner_top = top + padding.y0;
        let inner_width = (inner_right - inner_left).max(0.0);
        let inner_end = self.inner.layout_content(
            section,
            Point::new(inner_left, inner_top),
            inner_width,
            sizing,
            ctx,
        );
        let content_bottom = (inner_end.y + padding.y1).max(aux_bottom);
        section.content_frame = Rect::new(left, top, right, content_bottom);

        let mut bottom = content_bottom;
        let footer_group = group_position(section, SupplementaryKind::Footer);
        for &(index, x0, x1) in &footers {
            let Some(group) = footer_group else {
                break;
            };
            let item = &mut section.supplementaries[group].1[index];
            if showing_placeholder && !item.descriptor.visible_while_showing_placeholder {
                suppress(item, x0, bottom, x1);
                continue;
            }
            let height = resolve_height(
                item,
                section_index,
                SupplementaryKind::Footer,
                index,
                x1 - x0,
                sizing,
            );
            if height <= 0.0 {
                suppress(item, x0, bottom, x1);
                continue;
            }
            item.hidden = false;
            item.frame = Rect::new(x0, bottom, x1, bottom + height);
            item.unpinned_y = bottom;
            item.is_pinned = false;
            bottom += height;
        }

        Point::new(origin.x, bottom)
    }
}

fn group_position(section: &LayoutSection, kind: SupplementaryKind) -> Option<usize> {
    section
        .supplementaries
        .iter()
        .position(|(k, _)| *k == kind)
}

/// Resolves an element's height: fixed if declared, a retained measurement
/// if one was recorded, else the measurement callback or the estimate.
fn resolve_height(
    item: &mut LayoutSupplementaryItem,
    section_index: SectionIndex,
    kind: SupplementaryKind,
    index: usize,
    available_width: f64,
    sizing: &mut LayoutSizing<'_>,
) -> f64 {
    if let Some(height) = item.descriptor.height {
        item.has_estimated_height = false;
        return height;
    }
    if !item.has_estimated_height {
        return item.frame.height();
    }
    let fitting = Size::new(available_width, item.descriptor.estimated_height);
    match sizing.measure_supplementary(section_index, kind, index, fitting) {
        Some(measured) => {
            item.has_estimated_height = false;
            measured
        }
        None => item.descriptor.estimated_height,
    }
}

/// Parks a skipped element as a zero-height hidden frame at its would-be
/// position.
fn suppress(item: &mut LayoutSupplementaryItem, x0: f64, y: f64, x1: f64) {
    item.hidden = true;
    item.frame = Rect::new(x0, y, x1, y);
    item.unpinned_y = y;
    item.is_pinned = false;
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use espalier_metrics::{SectionMetrics, SupplementaryItem, SupplementaryKind};

    use super::SupplementaryLayoutEngine;
    use crate::cells::CellLayoutEngine;
    use crate::engine::{ContentLayoutEngine, PlaceholderLayoutEngine};
    use crate::section::{LayoutSection, PlaceholderDescription, SectionDescription};
    use crate::types::{LayoutSizing, SectionIndex};

    fn layout(section: &mut LayoutSection, width: f64) -> Point {
        let mut sizing = LayoutSizing::new(width);
        SupplementaryLayoutEngine::new(CellLayoutEngine).layout_content(
            section,
            Point::ZERO,
            width,
            &mut sizing,
            &mut (),
        )
    }

    fn fixed_supplementary(kind: SupplementaryKind, height: f64) -> SupplementaryItem {
        let mut item = SupplementaryItem::new(kind);
        item.height = Some(height);
        item
    }

    #[test]
    fn header_and_footer_wrap_the_cell_block() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        let mut description = SectionDescription::new(metrics, 2);
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::Header, 50.0));
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::Footer, 30.0));
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        let end = layout(&mut section, 320.0);

        let headers = section.supplementary_items(SupplementaryKind::Header);
        let footers = section.supplementary_items(SupplementaryKind::Footer);
        assert_eq!(headers[0].frame, Rect::new(0.0, 0.0, 320.0, 50.0));
        assert_eq!(headers[0].unpinned_y, 0.0);
        assert_eq!(section.items()[0].frame.y0, 50.0);
        assert_eq!(section.items()[1].frame.y0, 72.0);
        assert_eq!(footers[0].frame, Rect::new(0.0, 94.0, 320.0, 124.0));
        assert_eq!(end, Point::new(0.0, 124.0));
        assert_eq!(section.content_frame(), Rect::new(0.0, 50.0, 320.0, 94.0));
    }

    #[test]
    fn auxiliary_column_reserves_a_side_strip() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_left_auxiliary_column_width(40.0);
        metrics.set_auxiliary_column_spacing(10.0);
        let mut description = SectionDescription::new(metrics, 1);
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::LeftAuxiliary, 30.0));
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::LeftAuxiliary, 30.0));
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        let end = layout(&mut section, 320.0);

        let strip = section.supplementary_items(SupplementaryKind::LeftAuxiliary);
        assert_eq!(strip[0].frame, Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(strip[1].frame, Rect::new(0.0, 40.0, 40.0, 70.0));
        // Cells move over to make room for the strip.
        assert_eq!(section.items()[0].frame.x0, 40.0);
        assert_eq!(section.items()[0].frame.x1, 320.0);
        // The strip reaches lower than the single cell, so it sets the
        // content bottom.
        assert_eq!(end.y, 70.0);
    }

    #[test]
    fn later_ordered_headers_sit_inside_auxiliary_strips() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_left_auxiliary_column_width(40.0);
        let mut description = SectionDescription::new(metrics.clone(), 1);
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::Header, 50.0));
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::LeftAuxiliary, 30.0));

        // Default order visits the header before the auxiliary column, so
        // the header spans the full width.
        let mut outer = LayoutSection::new(SectionIndex::Ordinary(0), description.clone());
        layout(&mut outer, 320.0);
        assert_eq!(
            outer.supplementary_items(SupplementaryKind::Header)[0].frame.x0,
            0.0
        );

        // Pushing the header later in the order peels the strip first.
        let mut inner_metrics = metrics;
        inner_metrics.set_supplementary_ordering(
            inner_metrics
                .supplementary_ordering()
                .with_order(SupplementaryKind::Header, 9),
        );
        description.metrics = inner_metrics;
        let mut inner = LayoutSection::new(SectionIndex::Ordinary(0), description);
        layout(&mut inner, 320.0);
        assert_eq!(
            inner.supplementary_items(SupplementaryKind::Header)[0].frame.x0,
            40.0
        );
    }

    #[test]
    fn placeholder_stands_in_for_cells_and_filters_chrome() {
        let mut visible = fixed_supplementary(SupplementaryKind::Header, 50.0);
        visible.visible_while_showing_placeholder = true;
        let hidden = fixed_supplementary(SupplementaryKind::Footer, 30.0);

        let mut description = SectionDescription::new(SectionMetrics::new(), 0);
        description.supplementary_items.push(visible);
        description.supplementary_items.push(hidden);
        description.placeholder = Some(PlaceholderDescription::default());
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        let mut sizing = LayoutSizing::new(320.0);
        let end = SupplementaryLayoutEngine::new(PlaceholderLayoutEngine).layout_content(
            &mut section,
            Point::ZERO,
            320.0,
            &mut sizing,
            &mut (),
        );

        let placeholder = section.placeholder().unwrap();
        assert_eq!(placeholder.frame, Rect::new(0.0, 50.0, 320.0, 250.0));
        assert!(section.supplementary_items(SupplementaryKind::Footer)[0].hidden);
        assert!(!section.supplementary_items(SupplementaryKind::Header)[0].hidden);
        assert_eq!(end.y, 250.0);
    }

    #[test]
    fn pin_flags_split_headers_into_pinnable_and_not() {
        let mut pinned = fixed_supplementary(SupplementaryKind::Header, 40.0);
        pinned.should_pin = true;
        let loose = fixed_supplementary(SupplementaryKind::Header, 40.0);

        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        let mut description = SectionDescription::new(metrics, 1);
        description.supplementary_items.push(pinned);
        description.supplementary_items.push(loose);
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        layout(&mut section, 320.0);

        assert_eq!(section.pinnable_headers().count(), 1);
        assert_eq!(section.non_pinnable_headers().count(), 1);
        assert_eq!(section.pinnable_headers().next().unwrap().frame.y0, 0.0);
        assert_eq!(section.non_pinnable_headers().next().unwrap().frame.y0, 40.0);
    }

    #[test]
    fn custom_kinds_are_stored_but_never_placed() {
        let badge = SupplementaryItem::new(SupplementaryKind::Custom("badge"));
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        let mut description = SectionDescription::new(metrics, 1);
        description.supplementary_items.push(badge);
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        layout(&mut section, 320.0);

        let badges = section.supplementary_items(SupplementaryKind::Custom("badge"));
        assert_eq!(badges.len(), 1);
        assert!(badges[0].hidden);
        assert_eq!(badges[0].frame, Rect::ZERO);
    }

    #[test]
    fn zero_height_elements_are_suppressed_in_place() {
        let empty = fixed_supplementary(SupplementaryKind::Header, 0.0);
        let solid = fixed_supplementary(SupplementaryKind::Header, 40.0);

        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        let mut description = SectionDescription::new(metrics, 1);
        description.supplementary_items.push(empty);
        description.supplementary_items.push(solid);
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        layout(&mut section, 320.0);

        let headers = section.supplementary_items(SupplementaryKind::Header);
        assert!(headers[0].hidden);
        assert_eq!(headers[0].frame.height(), 0.0);
        assert_eq!(headers[1].frame.y0, 0.0);
        assert_eq!(section.items()[0].frame.y0, 40.0);
    }

    #[test]
    fn padding_insets_the_cell_block_only() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_padding(kurbo::Insets::new(8.0, 6.0, 8.0, 6.0));
        let mut description = SectionDescription::new(metrics, 1);
        description
            .supplementary_items
            .push(fixed_supplementary(SupplementaryKind::Header, 50.0));
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);

        let end = layout(&mut section, 320.0);

        // The header ignores padding; the cell block is inset on all sides.
        assert_eq!(
            section.supplementary_items(SupplementaryKind::Header)[0].frame.x0,
            0.0
        );
        assert_eq!(section.items()[0].frame, Rect::new(8.0, 56.0, 312.0, 78.0));
        assert_eq!(end.y, 84.0);
        assert_eq!(section.content_frame(), Rect::new(0.0, 50.0, 320.0, 84.0));
    }
}
