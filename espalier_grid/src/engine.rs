// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engines that turn a section's description into geometry.

use kurbo::{Point, Rect};

use crate::attributes::{BACKGROUND_Z_INDEX, DEFAULT_Z_INDEX, DecorationKind};
use crate::cells::CellLayoutEngine;
use crate::invalidate::InvalidationContext;
use crate::section::{LayoutDecoration, LayoutSection};
use crate::supplementary::SupplementaryLayoutEngine;
use crate::types::LayoutSizing;

/// Lays out the block at the core of a section: either its cells or its
/// placeholder.
///
/// Content engines place into `section` starting at `origin` within
/// `width`, and return the point just past their content. They are additive;
/// clearing derived state between passes is the caller's job.
pub(crate) trait ContentLayoutEngine {
    fn layout_content(
        &mut self,
        section: &mut LayoutSection,
        origin: Point,
        width: f64,
        sizing: &mut LayoutSizing<'_>,
        ctx: &mut dyn InvalidationContext,
    ) -> Point;
}

/// Stretches a section's placeholder across the available width.
///
/// A placeholder with a measured height keeps it; otherwise the described
/// height is used and the estimate flag re-read from the description.
pub(crate) struct PlaceholderLayoutEngine;

impl ContentLayoutEngine for PlaceholderLayoutEngine {
    fn layout_content(
        &mut self,
        section: &mut LayoutSection,
        origin: Point,
        width: f64,
        _sizing: &mut LayoutSizing<'_>,
        _ctx: &mut dyn InvalidationContext,
    ) -> Point {
        let Some(placeholder) = section.placeholder.as_mut() else {
            return origin;
        };
        let height = if !placeholder.has_estimated_height && placeholder.frame.height() > 0.0 {
            placeholder.frame.height()
        } else {
            placeholder.has_estimated_height = placeholder.descriptor.has_estimated_height;
            placeholder.descriptor.height
        };
        placeholder.frame = Rect::new(origin.x, origin.y, origin.x + width, origin.y + height);
        Point::new(origin.x, origin.y + height)
    }
}

/// Runs a full layout pass over one section.
///
/// Derived state is cleared, the supplementary engine is run around either
/// the cell engine or the placeholder engine, the section frame is set from
/// the result, and decorations are emitted from the final geometry.
pub(crate) struct SectionLayoutEngine;

impl SectionLayoutEngine {
    pub(crate) fn layout(
        section: &mut LayoutSection,
        origin: Point,
        sizing: &mut LayoutSizing<'_>,
        ctx: &mut dyn InvalidationContext,
    ) -> Point {
        section.reset();
        let width = sizing.width;
        let end = if section.shows_placeholder() {
            SupplementaryLayoutEngine::new(PlaceholderLayoutEngine)
                .layout_content(section, origin, width, sizing, ctx)
        } else {
            SupplementaryLayoutEngine::new(CellLayoutEngine)
                .layout_content(section, origin, width, sizing, ctx)
        };
        section.frame = Rect::new(origin.x, origin.y, origin.x + width, end.y);
        emit_decorations(section);
        end
    }
}

/// Appends separator and background decorations derived from the section's
/// settled geometry.
fn emit_decorations(section: &mut LayoutSection) {
    let LayoutSection {
        metrics,
        rows,
        decorations,
        frame,
        content_frame,
        last_section,
        ..
    } = section;

    let background = metrics.content_background();
    if background.color.is_some() {
        decorations.push(LayoutDecoration {
            kind: DecorationKind::ContentBackground,
            index: 0,
            frame: *content_frame,
            color: background.color,
            z_index: BACKGROUND_Z_INDEX,
            corner_radius: background.corner_radius,
        });
    }

    let separator_width = metrics.separator_width();
    let columns = metrics.columns().max(1);
    if metrics.shows_column_separator() && columns > 1 && separator_width > 0.0 {
        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            let insets = metrics.separator_insets();
            let interitem = metrics.interitem_spacing();
            let column_width = metrics.fixed_column_width().unwrap_or_else(|| {
                (first.frame.width() - interitem * (columns - 1) as f64) / columns as f64
            });
            let y0 = first.frame.y0 + insets.y0;
            let y1 = last.frame.y1 - insets.y1;
            for boundary in 1..columns {
                // Centered in the gap between adjacent columns.
                let x0 = first.frame.x0 + (column_width + interitem) * boundary as f64
                    - (interitem + separator_width) / 2.0;
                decorations.push(LayoutDecoration {
                    kind: DecorationKind::ColumnSeparator,
                    index: boundary - 1,
                    frame: Rect::new(x0, y0, x0 + separator_width, y1),
                    color: metrics.separator_color(),
                    z_index: DEFAULT_Z_INDEX,
                    corner_radius: 0.0,
                });
            }
        }
    }

    if metrics.shows_row_separator() && separator_width > 0.0 && rows.len() > 1 {
        let insets = metrics.separator_insets();
        for (index, row) in rows[..rows.len() - 1].iter().enumerate() {
            decorations.push(LayoutDecoration {
                kind: DecorationKind::RowSeparator,
                index,
                frame: Rect::new(
                    row.frame.x0 + insets.x0,
                    row.frame.y1,
                    row.frame.x1 - insets.x1,
                    row.frame.y1 + separator_width,
                ),
                color: metrics.separator_color(),
                z_index: DEFAULT_Z_INDEX,
                corner_radius: 0.0,
            });
        }
    }

    if metrics.shows_section_separator()
        && separator_width > 0.0
        && (!*last_section || metrics.shows_section_separator_when_last())
    {
        let insets = metrics.section_separator_insets();
        decorations.push(LayoutDecoration {
            kind: DecorationKind::SectionSeparator,
            index: 0,
            frame: Rect::new(
                frame.x0 + insets.x0,
                frame.y1 - separator_width,
                frame.x1 - insets.x1,
                frame.y1,
            ),
            color: metrics.section_separator_color(),
            z_index: DEFAULT_Z_INDEX,
            corner_radius: 0.0,
        });
    }

    for decoration in metrics.decorations() {
        let kind = DecorationKind::Custom(decoration.kind);
        let index = decorations
            .iter()
            .filter(|existing| existing.kind == kind)
            .count();
        decorations.push(LayoutDecoration {
            kind,
            index,
            frame: *frame,
            color: decoration.color,
            z_index: decoration.z_index,
            corner_radius: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use espalier_metrics::{
        BackgroundAttributes, Color, Decoration, SectionMetrics, SupplementaryItem,
    };

    use crate::attributes::{BACKGROUND_Z_INDEX, DecorationKind};
    use crate::section::{LayoutSection, PlaceholderDescription, SectionDescription};
    use crate::types::{LayoutSizing, SectionIndex};

    fn laid_out(description: SectionDescription, width: f64) -> LayoutSection {
        let mut section = LayoutSection::new(SectionIndex::Ordinary(0), description);
        let mut sizing = LayoutSizing::new(width);
        section.layout(Point::ZERO, &mut sizing, &mut ());
        section
    }

    #[test]
    fn content_background_covers_the_content_frame() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_content_background(BackgroundAttributes {
            color: Some(Color::gray(0xf0)),
            corner_radius: 4.0,
        });
        let mut description = SectionDescription::new(metrics, 1);
        let mut header = SupplementaryItem::header();
        header.height = Some(50.0);
        description.supplementary_items.push(header);

        let section = laid_out(description, 320.0);

        let background = section.decorations()[0];
        assert_eq!(background.kind, DecorationKind::ContentBackground);
        assert_eq!(background.frame, section.content_frame());
        assert_eq!(background.frame, Rect::new(0.0, 50.0, 320.0, 72.0));
        assert_eq!(background.z_index, BACKGROUND_Z_INDEX);
        assert_eq!(background.corner_radius, 4.0);
    }

    #[test]
    fn column_separators_bisect_the_gaps_between_columns() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_columns(2);
        let section = laid_out(SectionDescription::new(metrics, 4), 320.0);

        let separators: Vec<_> = section
            .decorations()
            .iter()
            .filter(|d| d.kind == DecorationKind::ColumnSeparator)
            .collect();
        assert_eq!(separators.len(), 1);
        // Default hairline is 1pt wide, centered on the shared edge.
        assert_eq!(separators[0].frame, Rect::new(159.5, 0.0, 160.5, 44.0));
        assert_eq!(separators[0].index, 0);
    }

    #[test]
    fn row_separators_fall_between_rows_but_not_after_the_last() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_shows_row_separator(true);
        metrics.set_separator_insets(kurbo::Insets::new(15.0, 0.0, 0.0, 0.0));
        let section = laid_out(SectionDescription::new(metrics, 3), 320.0);

        let separators: Vec<_> = section
            .decorations()
            .iter()
            .filter(|d| d.kind == DecorationKind::RowSeparator)
            .collect();
        assert_eq!(separators.len(), 2);
        assert_eq!(separators[0].frame, Rect::new(15.0, 22.0, 320.0, 23.0));
        assert_eq!(separators[1].frame, Rect::new(15.0, 44.0, 320.0, 45.0));
    }

    #[test]
    fn section_separator_is_dropped_for_the_last_section() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.set_shows_section_separator(true);

        let has_separator = |section: &LayoutSection| {
            section
                .decorations()
                .iter()
                .any(|d| d.kind == DecorationKind::SectionSeparator)
        };

        let section = laid_out(SectionDescription::new(metrics.clone(), 2), 320.0);
        assert!(has_separator(&section));
        let bottom = section
            .decorations()
            .iter()
            .find(|d| d.kind == DecorationKind::SectionSeparator)
            .map(|d| d.frame)
            .unwrap();
        assert_eq!(bottom, Rect::new(0.0, 43.0, 320.0, 44.0));

        let mut last = LayoutSection::new(
            SectionIndex::Ordinary(1),
            SectionDescription::new(metrics.clone(), 2),
        );
        last.set_last_section(true);
        let mut sizing = LayoutSizing::new(320.0);
        last.layout(Point::ZERO, &mut sizing, &mut ());
        assert!(!has_separator(&last));

        metrics.set_shows_section_separator_when_last(true);
        let mut kept = LayoutSection::new(
            SectionIndex::Ordinary(2),
            SectionDescription::new(metrics, 2),
        );
        kept.set_last_section(true);
        kept.layout(Point::ZERO, &mut sizing, &mut ());
        assert!(has_separator(&kept));
    }

    #[test]
    fn metric_decorations_span_the_section_and_count_per_kind() {
        let mut metrics = SectionMetrics::new();
        metrics.set_row_height(Some(22.0));
        metrics.add_decoration(Decoration {
            kind: "ribbon",
            color: Some(Color::rgb(0xff, 0x00, 0x00)),
            z_index: 7,
        });
        metrics.add_decoration(Decoration {
            kind: "ribbon",
            color: None,
            z_index: 7,
        });
        let section = laid_out(SectionDescription::new(metrics, 1), 320.0);

        let ribbons: Vec<_> = section
            .decorations()
            .iter()
            .filter(|d| d.kind == DecorationKind::Custom("ribbon"))
            .collect();
        assert_eq!(ribbons.len(), 2);
        assert_eq!(ribbons[0].index, 0);
        assert_eq!(ribbons[1].index, 1);
        assert_eq!(ribbons[0].frame, section.frame());
        assert_eq!(ribbons[0].z_index, 7);
    }

    #[test]
    fn placeholder_layout_emits_no_row_chrome() {
        let mut metrics = SectionMetrics::new();
        metrics.set_shows_row_separator(true);
        metrics.set_columns(3);
        let mut description = SectionDescription::new(metrics, 0);
        description.placeholder = Some(PlaceholderDescription {
            height: 120.0,
            has_estimated_height: false,
            ..PlaceholderDescription::default()
        });

        let section = laid_out(description, 320.0);

        assert!(section.rows().is_empty());
        assert!(section.decorations().is_empty());
        assert_eq!(
            section.placeholder().unwrap().frame,
            Rect::new(0.0, 0.0, 320.0, 120.0)
        );
        assert_eq!(section.frame(), Rect::new(0.0, 0.0, 320.0, 120.0));
    }
}
