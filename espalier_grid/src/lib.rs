// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_grid --heading-base-level=0

//! Espalier Grid: sectioned grid layout with pinned headers, placeholders,
//! and frame invalidation.
//!
//! This crate is the geometric half of the Espalier layout engine. It takes
//! the declarative section descriptions from `espalier_metrics` and turns
//! them into frames: cells flow into rows and columns, headers and footers
//! and auxiliary columns wrap the cell block in layers, and empty sections
//! show a placeholder instead. After the initial pass, targeted mutations
//! keep the geometry consistent without relaying out the world: measured
//! element sizes reflow only the content below them, pinned headers track
//! the scroll position, and drag sessions open phantom gaps between cells.
//! Every frame such a mutation moves is reported to an
//! [`InvalidationContext`] so hosts can redraw exactly what changed.
//!
//! The core types are:
//!
//! - [`LayoutInfo`]: the whole layout, an optional global section above the
//!   ordinary ones, stacked at a shared width.
//! - [`SectionDescription`]: what a host wants one section to contain, built
//!   from a [`SectionMetrics`](espalier_metrics::SectionMetrics), an item
//!   count, supplementary items, and an optional placeholder.
//! - [`LayoutSection`]: one described section after layout, holding item,
//!   row, supplementary, decoration, and placeholder geometry.
//! - [`LayoutMeasure`]: the host callback that sizes self-sizing elements
//!   during a layout pass.
//! - [`LayoutAttributes`]: a renderable snapshot of one element, resolved
//!   from geometry and metrics.
//!
//! ## Laying out sections
//!
//! ```rust
//! use espalier_grid::{LayoutInfo, SectionDescription, SectionIndex};
//! use espalier_metrics::{SectionMetrics, SupplementaryItem};
//!
//! let mut metrics = SectionMetrics::new();
//! metrics.set_row_height(Some(44.0));
//! let mut description = SectionDescription::new(metrics, 3);
//! let mut header = SupplementaryItem::header();
//! header.height = Some(50.0);
//! description.supplementary_items.push(header);
//!
//! let mut info = LayoutInfo::new(320.0);
//! info.add_section(description);
//! info.layout(None, &mut ());
//!
//! let section = info.section(SectionIndex::Ordinary(0)).unwrap();
//! assert_eq!(section.items()[0].frame.y0, 50.0);
//! assert_eq!(info.content_size().height, 182.0);
//! ```
//!
//! ## Reflowing after measurement
//!
//! ```rust
//! use espalier_grid::{InvalidationRecord, LayoutInfo, SectionIndex};
//! # use espalier_grid::SectionDescription;
//! # use espalier_metrics::SectionMetrics;
//! use kurbo::Size;
//!
//! # let mut metrics = SectionMetrics::new();
//! # metrics.set_row_height(Some(44.0));
//! # let mut info = LayoutInfo::new(320.0);
//! # info.add_section(SectionDescription::new(metrics.clone(), 2));
//! # info.add_section(SectionDescription::new(metrics, 2));
//! info.layout(None, &mut ());
//!
//! // A cell reported a measured height; everything below it moves.
//! let mut record = InvalidationRecord::new();
//! info.set_item_size(SectionIndex::Ordinary(0), 0, Size::new(320.0, 60.0), &mut record);
//!
//! assert_eq!(record.content_size_adjustment().height, 16.0);
//! assert!(!record.is_empty());
//! ```
//!
//! Layout is deterministic: the same descriptions, width, and measurements
//! always produce the same frames.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod builder;
mod cells;
mod engine;
mod info;
mod invalidate;
mod section;
mod supplementary;
mod types;

pub use attributes::{
    BACKGROUND_Z_INDEX, DEFAULT_Z_INDEX, DecorationKind, ElementRef, ElementRole, HEADER_Z_INDEX,
    LayoutAttributes, PINNED_HEADER_Z_INDEX,
};
pub use builder::{GridSectionBuilder, SectionBuilder};
pub use info::LayoutInfo;
pub use invalidate::{InvalidationContext, InvalidationRecord};
pub use section::{
    LayoutDecoration, LayoutItem, LayoutPlaceholder, LayoutRow, LayoutSection,
    LayoutSupplementaryItem, PlaceholderDescription, SectionDescription,
};
pub use types::{LayoutKind, LayoutMeasure, LayoutSizing, SectionIndex};
