// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A contacts-style layout: global toolbar, measured cells, placeholders,
//! and pinned headers tracking a scroll position.
//!
//! This example shows how to combine:
//! - `espalier_metrics` for describing sections and merging metric defaults,
//! - `espalier_grid` for turning the descriptions into frames and keeping
//!   them consistent as elements are measured and the view scrolls.
//!
//! Run:
//! - `cargo run -p espalier_examples --example sectioned_layout`

use espalier_grid::{
    InvalidationRecord, LayoutInfo, LayoutMeasure, PlaceholderDescription, SectionDescription,
    SectionIndex,
};
use espalier_metrics::{SectionMetrics, SupplementaryItem, SupplementaryKind};
use kurbo::{Point, Rect, Size};

/// Pretend cells whose height depends on how much text each row holds.
struct ContactMeasurer;

impl LayoutMeasure for ContactMeasurer {
    fn measure_item(&mut self, _section: SectionIndex, index: usize, fitting: Size) -> Size {
        // Every third contact has a two-line address.
        let height = if index % 3 == 0 { 58.0 } else { 40.0 };
        Size::new(fitting.width, height)
    }

    fn measure_supplementary(
        &mut self,
        _section: SectionIndex,
        _kind: SupplementaryKind,
        _index: usize,
        fitting: Size,
    ) -> Size {
        fitting
    }
}

fn pinned_header(height: f64) -> SupplementaryItem {
    let mut header = SupplementaryItem::header();
    header.height = Some(height);
    header.should_pin = true;
    header
}

fn frame_string(frame: Rect) -> String {
    format!(
        "({:.0}, {:.0})-({:.0}, {:.0})",
        frame.x0, frame.y0, frame.x1, frame.y1
    )
}

fn main() {
    let width = 320.0;
    let viewport_height = 900.0;

    // Shared defaults for every section; each description overrides a bit.
    let mut defaults = SectionMetrics::new();
    defaults.set_row_height(Some(44.0));

    let mut info = LayoutInfo::new(width);

    // Global section: a toolbar that stays pinned at the top of the view.
    let mut toolbar = SectionDescription::new(SectionMetrics::new(), 0);
    toolbar.supplementary_items.push(pinned_header(48.0));
    info.set_global_section(toolbar);

    // "Favorites": measured, self-sizing cells under a pinned header.
    let mut favorites_metrics = SectionMetrics::new();
    favorites_metrics.apply_values_from(&defaults);
    favorites_metrics.set_row_height(None);
    favorites_metrics.set_estimated_row_height(44.0);
    let mut favorites = SectionDescription::new(favorites_metrics, 4);
    favorites.supplementary_items.push(pinned_header(28.0));
    info.add_section(favorites);

    // "All contacts": fixed-height rows with separators between them.
    let mut all_metrics = SectionMetrics::new();
    all_metrics.apply_values_from(&defaults);
    all_metrics.set_shows_row_separator(true);
    let mut all = SectionDescription::new(all_metrics, 6);
    all.supplementary_items.push(pinned_header(28.0));
    info.add_section(all);

    // "Recently deleted": empty, so it shows a placeholder that stretches
    // to fill whatever viewport height the other sections leave over.
    let mut empty = SectionDescription::new(SectionMetrics::new(), 0);
    empty.placeholder = Some(PlaceholderDescription::default());
    info.add_section(empty);

    let mut measurer = ContactMeasurer;
    info.layout(Some(&mut measurer), &mut ());
    info.finalize_layout(viewport_height, &mut ());

    println!("Laid out {} sections plus the global toolbar:", info.number_of_sections());
    for section in info.sections() {
        println!(
            "  {:?}: frame {} with {} items",
            section.index(),
            frame_string(section.frame()),
            section.items().len(),
        );
    }
    println!("Content size: {:?}", info.content_size());

    // Scroll down; the toolbar pins to the scroll position and the header
    // of the section under it pins just below.
    let scroll = Point::new(0.0, 150.0);
    info.update_pinned_headers(scroll, &mut ());
    println!("\nAfter scrolling to y = {:.0}:", scroll.y);
    for section in info.sections() {
        for header in section.pinnable_headers() {
            println!(
                "  {:?} header at {} (pinned: {})",
                section.index(),
                frame_string(header.frame),
                header.is_pinned,
            );
        }
    }

    // A favorite expands in place; only the content below it moves, and the
    // record says exactly which elements need redrawing.
    let mut record = InvalidationRecord::new();
    info.set_item_size(
        SectionIndex::Ordinary(0),
        1,
        Size::new(width, 96.0),
        &mut record,
    );
    println!(
        "\nExpanding one favorite moved {} elements and grew the content by {:.0}",
        record.len(),
        record.content_size_adjustment().height,
    );

    // Only elements inside the viewport need attributes at render time.
    let viewport = Rect::new(0.0, scroll.y, width, scroll.y + viewport_height);
    let visible = info.layout_attributes_in(viewport);
    println!("\n{} elements visible in {}:", visible.len(), frame_string(viewport));
    for attributes in visible.iter().take(5) {
        println!(
            "  {:?} at {} z={}",
            attributes.element,
            frame_string(attributes.frame),
            attributes.z_index,
        );
    }
}
