// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Supplementary kinds and the order in which a section lays them out.

/// The role of a supplementary element attached to a section.
///
/// The four built-in kinds participate in section layout: each one claims a
/// strip of the section's remaining area, in the order resolved by
/// [`SupplementaryOrdering`]. Custom kinds can be declared and queried on a
/// section, but hosts are responsible for placing them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    /// A full-width strip above the cells.
    Header,
    /// A full-width strip below the cells.
    Footer,
    /// A column along the leading edge of the cells.
    LeftAuxiliary,
    /// A column along the trailing edge of the cells.
    RightAuxiliary,
    /// A host-defined kind, identified by name.
    Custom(&'static str),
}

impl SupplementaryKind {
    /// The built-in kinds, in declaration order.
    ///
    /// Declaration order is the tie-break when two kinds share an order
    /// value, so with every order equal the kinds resolve in exactly this
    /// sequence.
    pub const BUILT_IN: [Self; 4] = [
        Self::Header,
        Self::Footer,
        Self::LeftAuxiliary,
        Self::RightAuxiliary,
    ];

    /// A stable name for this kind, suitable for view registration keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::LeftAuxiliary => "left-auxiliary",
            Self::RightAuxiliary => "right-auxiliary",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the four built-in kinds.
    #[must_use]
    pub const fn is_built_in(self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// The slot of a built-in kind in declaration order.
    const fn slot(self) -> Option<usize> {
        match self {
            Self::Header => Some(0),
            Self::Footer => Some(1),
            Self::LeftAuxiliary => Some(2),
            Self::RightAuxiliary => Some(3),
            Self::Custom(_) => None,
        }
    }
}

/// The order in which a section's built-in supplementary kinds are laid out.
///
/// Each built-in kind holds exactly one order value; assigning a kind's order
/// replaces the previous value. Lower values lay out first, which places the
/// kind further out in the section: the first resolved kind claims space from
/// the full section area and later kinds claim space from what remains.
///
/// ```
/// use espalier_metrics::{SupplementaryKind, SupplementaryOrdering};
///
/// let mut ordering = SupplementaryOrdering::default();
/// ordering.set_order(SupplementaryKind::Footer, -1);
/// assert_eq!(ordering.resolved()[0], SupplementaryKind::Footer);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SupplementaryOrdering {
    /// Order values indexed by built-in kind slot.
    orders: [i32; 4],
}

impl SupplementaryOrdering {
    /// The default ordering: header, footer, left auxiliary, right auxiliary.
    pub const DEFAULT: Self = Self {
        orders: [0, 1, 2, 3],
    };

    /// The order value assigned to `kind`, or `None` for custom kinds.
    #[must_use]
    pub const fn order_of(&self, kind: SupplementaryKind) -> Option<i32> {
        match kind.slot() {
            Some(slot) => Some(self.orders[slot]),
            None => None,
        }
    }

    /// Assigns the order value for a built-in kind, replacing the previous
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a custom kind; only built-in kinds participate in
    /// section layout ordering.
    pub const fn set_order(&mut self, kind: SupplementaryKind, order: i32) {
        match kind.slot() {
            Some(slot) => self.orders[slot] = order,
            None => panic!("only built-in supplementary kinds can be ordered"),
        }
    }

    /// This ordering with the order value for a built-in kind replaced.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a custom kind.
    #[must_use]
    pub const fn with_order(mut self, kind: SupplementaryKind, order: i32) -> Self {
        self.set_order(kind, order);
        self
    }

    /// The built-in kinds sorted by ascending order value.
    ///
    /// Kinds sharing an order value resolve in declaration order, so the
    /// result is total and deterministic.
    #[must_use]
    pub fn resolved(&self) -> [SupplementaryKind; 4] {
        let mut keyed: [(i32, usize); 4] = [(0, 0); 4];
        for (slot, order) in self.orders.iter().enumerate() {
            keyed[slot] = (*order, slot);
        }
        keyed.sort_unstable();
        keyed.map(|(_, slot)| SupplementaryKind::BUILT_IN[slot])
    }
}

impl Default for SupplementaryOrdering {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{SupplementaryKind, SupplementaryOrdering};

    #[test]
    fn default_resolves_in_declaration_order() {
        assert_eq!(
            SupplementaryOrdering::default().resolved(),
            SupplementaryKind::BUILT_IN,
        );
    }

    #[test]
    fn explicit_orders_sort_ascending() {
        let ordering = SupplementaryOrdering::DEFAULT
            .with_order(SupplementaryKind::Header, 1)
            .with_order(SupplementaryKind::Footer, 0);
        assert_eq!(
            ordering.resolved(),
            [
                SupplementaryKind::Footer,
                SupplementaryKind::Header,
                SupplementaryKind::LeftAuxiliary,
                SupplementaryKind::RightAuxiliary,
            ],
        );
    }

    #[test]
    fn equal_orders_fall_back_to_declaration_order() {
        let mut ordering = SupplementaryOrdering::DEFAULT;
        for kind in SupplementaryKind::BUILT_IN {
            ordering.set_order(kind, 7);
        }
        assert_eq!(ordering.resolved(), SupplementaryKind::BUILT_IN);
    }

    #[test]
    fn later_assignment_replaces_earlier() {
        let mut ordering = SupplementaryOrdering::DEFAULT;
        ordering.set_order(SupplementaryKind::RightAuxiliary, 5);
        ordering.set_order(SupplementaryKind::RightAuxiliary, -1);
        assert_eq!(
            ordering.order_of(SupplementaryKind::RightAuxiliary),
            Some(-1),
        );
        assert_eq!(ordering.resolved()[0], SupplementaryKind::RightAuxiliary);
    }

    #[test]
    fn custom_kinds_have_no_order() {
        let ordering = SupplementaryOrdering::DEFAULT;
        assert_eq!(ordering.order_of(SupplementaryKind::Custom("badge")), None);
    }

    #[test]
    #[should_panic(expected = "built-in")]
    fn ordering_a_custom_kind_panics() {
        let mut ordering = SupplementaryOrdering::DEFAULT;
        ordering.set_order(SupplementaryKind::Custom("badge"), 0);
    }
}
