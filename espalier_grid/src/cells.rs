// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-and-column placement of item cells.

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use espalier_metrics::ItemLayoutOrder;

use crate::engine::ContentLayoutEngine;
use crate::invalidate::InvalidationContext;
use crate::section::{LayoutRow, LayoutSection};
use crate::types::LayoutSizing;

/// Lays the section's cells out as a grid of rows.
///
/// Items fill each row in the metrics' cell layout order; a row is as tall
/// as its tallest item unless the metrics fix a row height. A phantom cell
/// slot, when set, consumes a grid position without placing an item, opening
/// a gap for drag-reorder.
///
/// The engine appends to the section's row list; callers reset the section
/// before a fresh pass.
pub(crate) struct CellLayoutEngine;

impl ContentLayoutEngine for CellLayoutEngine {
    fn layout_content(
        &mut self,
        section: &mut LayoutSection,
        origin: Point,
        width: f64,
        sizing: &mut LayoutSizing<'_>,
        _ctx: &mut dyn InvalidationContext,
    ) -> Point {
        let columns = section.metrics.columns().max(1);
        let fixed_row_height = section.metrics.row_height();
        let estimated_row_height = section.metrics.estimated_row_height();
        let row_spacing = section.metrics.row_spacing();
        let interitem = section.metrics.interitem_spacing();
        let order = section.metrics.cell_layout_order();
        let column_width = section
            .metrics
            .fixed_column_width()
            .unwrap_or_else(|| (width - interitem * (columns - 1) as f64) / columns as f64);
        let section_index = section.index;
        let phantom_index = section.phantom_cell_index;
        let phantom_height = section.phantom_cell_size.height;

        let slot_count = section.items.len() + usize::from(phantom_index.is_some());
        if slot_count == 0 {
            return origin;
        }
        let row_count = slot_count.div_ceil(columns);
        section.rows.reserve(row_count);

        let mut y = origin.y;
        let mut slot = 0;
        for row_index in 0..row_count {
            let row_slots = columns.min(slot_count - slot);

            // Resolve heights first so the row can take the tallest slot.
            let mut slot_heights: SmallVec<[f64; 8]> = SmallVec::with_capacity(row_slots);
            for position in 0..row_slots {
                let height = match slot_item(slot + position, phantom_index) {
                    None => phantom_height,
                    Some(item_index) => {
                        let item = &mut section.items[item_index];
                        match fixed_row_height {
                            Some(height) => {
                                item.has_estimated_height = false;
                                height
                            }
                            None if !item.has_estimated_height => item.frame.height(),
                            None => {
                                let fitting = Size::new(column_width, estimated_row_height);
                                match sizing.measure_item(section_index, item_index, fitting) {
                                    Some(measured) => {
                                        item.has_estimated_height = false;
                                        measured
                                    }
                                    None => estimated_row_height,
                                }
                            }
                        }
                    }
                };
                slot_heights.push(height);
            }
            let row_height = slot_heights.iter().fold(0.0_f64, |tallest, h| tallest.max(*h));

            let mut first_item = None;
            let mut item_end = 0;
            for position in 0..row_slots {
                let Some(item_index) = slot_item(slot + position, phantom_index) else {
                    continue;
                };
                let column = match order {
                    ItemLayoutOrder::LeadingToTrailing => position,
                    ItemLayoutOrder::TrailingToLeading => columns - 1 - position,
                };
                let x = origin.x + (column_width + interitem) * column as f64;
                let item = &mut section.items[item_index];
                item.column = column;
                item.frame = Rect::new(x, y, x + column_width, y + slot_heights[position]);
                first_item.get_or_insert(item_index);
                item_end = item_index + 1;
            }
            let items = match first_item {
                Some(start) => start..item_end,
                // A row holding only the phantom gap covers no items.
                None => item_end..item_end,
            };

            section.rows.push(LayoutRow {
                frame: Rect::new(origin.x, y, origin.x + width, y + row_height),
                items,
            });

            slot += row_slots;
            y += row_height;
            if row_index + 1 < row_count {
                y += row_spacing;
            }
        }
        Point::new(origin.x, y)
    }
}

/// Maps a grid slot to the item occupying it, or `None` for the phantom gap.
fn slot_item(slot: usize, phantom: Option<usize>) -> Option<usize> {
    match phantom {
        Some(gap) if slot == gap => None,
        Some(gap) if slot > gap => Some(slot - 1),
        _ => Some(slot),
    }
}
