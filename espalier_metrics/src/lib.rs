// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_metrics --heading-base-level=0

//! Espalier Metrics: section measurements, inheritance, and supplementary
//! ordering.
//!
//! This crate holds the declarative half of the Espalier layout engine: plain
//! data describing how a section of a collection should look, independent of
//! any particular widget toolkit or renderer. The geometric half lives in
//! `espalier_grid`, which consumes these types.
//!
//! The core concepts are:
//!
//! - [`SectionMetrics`]: measurements and appearance for one section, with
//!   per-field tracking of which values were explicitly assigned. Merging via
//!   [`SectionMetrics::apply_values_from`] copies only assigned fields, so
//!   application-wide defaults, collection overrides, and section overrides
//!   compose without defaults clobbering specific values.
//! - [`Theme`]: host-supplied appearance defaults, filled into unassigned
//!   fields by [`SectionMetrics::resolve_theme_defaults`].
//! - [`SupplementaryKind`] and [`SupplementaryOrdering`]: the four built-in
//!   supplementary roles (header, footer, and the two auxiliary columns) and
//!   the order in which they claim space from a section's frame.
//! - [`SupplementaryItem`]: one supplementary view a section wants placed,
//!   with fixed or estimated height, pinning, and host configuration
//!   callbacks.
//!
//! ## Merging example
//!
//! ```rust
//! use espalier_metrics::{MetricsFields, SectionMetrics, Theme};
//!
//! // Application-wide defaults.
//! let mut defaults = SectionMetrics::new();
//! defaults.set_row_height(Some(44.0));
//! defaults.set_columns(2);
//!
//! // One section overrides the column count only.
//! let mut section = SectionMetrics::new();
//! section.set_columns(3);
//!
//! let mut resolved = SectionMetrics::new();
//! resolved.apply_values_from(&defaults);
//! resolved.apply_values_from(&section);
//! resolved.resolve_theme_defaults(&Theme::DEFAULT);
//!
//! assert_eq!(resolved.columns(), 3);
//! assert_eq!(resolved.row_height(), Some(44.0));
//! assert!(resolved.defines(MetricsFields::BACKGROUND_COLOR));
//! ```
//!
//! Merging is directional: later sources win, but only for the fields they
//! actually define. Fields never assigned anywhere keep their stock values
//! until theme resolution fills in appearance defaults.
//!
//! ## Supplementary ordering
//!
//! ```rust
//! use espalier_metrics::{SupplementaryKind, SupplementaryOrdering};
//!
//! // Lay the footer out before the header, so it sits outside it.
//! let ordering = SupplementaryOrdering::DEFAULT
//!     .with_order(SupplementaryKind::Footer, -1);
//! assert_eq!(ordering.resolved()[0], SupplementaryKind::Footer);
//! ```
//!
//! Kinds resolved earlier claim space closer to the section's outer edge;
//! ties between order values break by declaration order, so resolution is
//! always total and deterministic.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod color;
mod metrics;
mod order;
mod supplementary;
mod theme;

pub use color::Color;
pub use metrics::{
    BackgroundAttributes, Decoration, ItemLayoutOrder, MetricsFields, SectionMetrics,
};
pub use order::{SupplementaryKind, SupplementaryOrdering};
pub use supplementary::{ConfigureFn, SupplementaryAttributes, SupplementaryItem};
pub use theme::Theme;
