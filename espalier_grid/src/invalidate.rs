// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invalidation reporting for incremental relayout.
//!
//! Layout operations that move or resize elements report what changed
//! through an [`InvalidationContext`]. Hosts that relayout from scratch can
//! pass `()` to ignore the reports; hosts that patch their display pass an
//! [`InvalidationRecord`] and read back the affected elements, the damaged
//! area, and the net content size change.

use hashbrown::HashSet;
use kurbo::{Rect, Size};

use crate::attributes::ElementRef;

/// Receiver for change reports produced during layout mutation.
pub trait InvalidationContext {
    /// Reports that `element` changed, together with the area it occupied
    /// before and after the change.
    fn invalidate_element(&mut self, element: ElementRef, area: Rect);

    /// Reports a change to the overall content size.
    fn adjust_content_size(&mut self, delta: Size);
}

/// Ignores all reports.
impl InvalidationContext for () {
    fn invalidate_element(&mut self, _element: ElementRef, _area: Rect) {}

    fn adjust_content_size(&mut self, _delta: Size) {}
}

/// An [`InvalidationContext`] that accumulates reports for later replay.
#[derive(Clone, Debug, Default)]
pub struct InvalidationRecord {
    elements: HashSet<ElementRef>,
    damage: Option<Rect>,
    content_size_adjustment: Size,
}

impl InvalidationRecord {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been reported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
            && self.damage.is_none()
            && self.content_size_adjustment == Size::ZERO
    }

    /// Whether `element` has been reported as changed.
    #[must_use]
    pub fn contains(&self, element: ElementRef) -> bool {
        self.elements.contains(&element)
    }

    /// The elements reported so far, in no particular order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef> + '_ {
        self.elements.iter().copied()
    }

    /// Number of distinct elements reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Union of all areas reported so far, or `None` if none were.
    #[must_use]
    pub fn damage(&self) -> Option<Rect> {
        self.damage
    }

    /// Net content size change reported so far.
    #[must_use]
    pub fn content_size_adjustment(&self) -> Size {
        self.content_size_adjustment
    }

    /// Forgets everything reported so far.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.damage = None;
        self.content_size_adjustment = Size::ZERO;
    }
}

impl InvalidationContext for InvalidationRecord {
    fn invalidate_element(&mut self, element: ElementRef, area: Rect) {
        self.elements.insert(element);
        self.damage = Some(match self.damage {
            Some(damage) => damage.union(area),
            None => area,
        });
    }

    fn adjust_content_size(&mut self, delta: Size) {
        self.content_size_adjustment += delta;
    }
}
