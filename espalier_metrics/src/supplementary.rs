// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptions of the supplementary views a section wants.

use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use kurbo::Insets;

use crate::color::Color;
use crate::order::SupplementaryKind;

/// Visual attributes a host applies to a supplementary view.
///
/// The layout engine carries these through to the view's layout attributes
/// untouched; only `should_pin` on the item itself changes how layout
/// behaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplementaryAttributes {
    /// Margins for the view's own content alignment.
    pub layout_margins: Insets,
    /// Background color, or `None` for the section background.
    pub background_color: Option<Color>,
    /// Background color while selected, or `None` for the section default.
    pub selected_background_color: Option<Color>,
    /// Background color while pinned to the viewport edge.
    pub pinned_background_color: Option<Color>,
    /// Whether the view draws a separator along its bottom edge.
    pub shows_separator: bool,
    /// Color of that separator.
    pub separator_color: Option<Color>,
    /// Separator color while pinned.
    pub pinned_separator_color: Option<Color>,
    /// Whether the view should show selection highlights like a cell.
    pub simulates_selection: bool,
}

impl Default for SupplementaryAttributes {
    fn default() -> Self {
        Self {
            layout_margins: Insets::ZERO,
            background_color: None,
            selected_background_color: None,
            pinned_background_color: None,
            shows_separator: false,
            separator_color: None,
            pinned_separator_color: None,
            simulates_selection: false,
        }
    }
}

/// A callback that prepares a host view for a supplementary element.
///
/// Arguments are the view, a host context (typically the data source), and
/// the element's index within its kind.
pub type ConfigureFn = Rc<dyn Fn(&mut dyn Any, &dyn Any, usize)>;

/// One supplementary view a section asks the layout to place.
///
/// A section may declare any number of items per kind; items of the same
/// kind stack in declaration order. Heights may be fixed up front or left
/// to measurement, with `estimated_height` standing in until a measurement
/// arrives.
#[derive(Clone)]
pub struct SupplementaryItem {
    /// Which strip of the section this view occupies.
    pub kind: SupplementaryKind,
    /// Key the host uses to create or reuse the view.
    pub reuse_identifier: &'static str,
    /// Fixed height, or `None` to use measured content height.
    pub height: Option<f64>,
    /// Height assumed until the host supplies a measurement.
    pub estimated_height: f64,
    /// Whether the view sticks to the viewport edge while its section
    /// scrolls. Only honored for headers.
    pub should_pin: bool,
    /// Whether the view stays visible while the section shows a
    /// placeholder instead of cells.
    pub visible_while_showing_placeholder: bool,
    /// Appearance carried through to the view's layout attributes.
    pub attributes: SupplementaryAttributes,
    configure: Option<ConfigureFn>,
}

impl SupplementaryItem {
    /// Height assumed for unmeasured supplementary views, in layout units.
    pub const DEFAULT_ESTIMATED_HEIGHT: f64 = 44.0;

    /// An item of the given kind with stock values.
    #[must_use]
    pub fn new(kind: SupplementaryKind) -> Self {
        Self {
            kind,
            reuse_identifier: kind.name(),
            height: None,
            estimated_height: Self::DEFAULT_ESTIMATED_HEIGHT,
            should_pin: false,
            visible_while_showing_placeholder: false,
            attributes: SupplementaryAttributes::default(),
            configure: None,
        }
    }

    /// A stock section header.
    #[must_use]
    pub fn header() -> Self {
        Self::new(SupplementaryKind::Header)
    }

    /// A stock section footer.
    #[must_use]
    pub fn footer() -> Self {
        Self::new(SupplementaryKind::Footer)
    }

    /// Whether this item's height is an estimate rather than a fixed value.
    #[must_use]
    pub fn has_estimated_height(&self) -> bool {
        self.height.is_none()
    }

    /// Appends a configuration callback.
    ///
    /// Callbacks chain: each call runs after the ones added before it, so
    /// wrapping layers of a data source can each contribute their own setup.
    pub fn add_configurator(
        &mut self,
        configure: impl Fn(&mut dyn Any, &dyn Any, usize) + 'static,
    ) {
        let next: ConfigureFn = Rc::new(configure);
        self.configure = Some(match self.configure.take() {
            None => next,
            Some(previous) => Rc::new(move |view: &mut dyn Any, context: &dyn Any, index| {
                previous(view, context, index);
                next(view, context, index);
            }),
        });
    }

    /// Whether any configuration callback has been added.
    #[must_use]
    pub fn has_configurator(&self) -> bool {
        self.configure.is_some()
    }

    /// Runs the configuration callbacks, if any, in the order added.
    ///
    /// The layout engine never calls this; hosts invoke it when binding a
    /// view to the element at `index`.
    pub fn configure_view(&self, view: &mut dyn Any, context: &dyn Any, index: usize) {
        if let Some(configure) = &self.configure {
            configure(view, context, index);
        }
    }
}

impl fmt::Debug for SupplementaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplementaryItem")
            .field("kind", &self.kind)
            .field("reuse_identifier", &self.reuse_identifier)
            .field("height", &self.height)
            .field("estimated_height", &self.estimated_height)
            .field("should_pin", &self.should_pin)
            .field(
                "visible_while_showing_placeholder",
                &self.visible_while_showing_placeholder,
            )
            .field("attributes", &self.attributes)
            .field("configure", &self.configure.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Equality over the declarative fields; configuration callbacks are not
/// comparable and are ignored.
impl PartialEq for SupplementaryItem {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.reuse_identifier == other.reuse_identifier
            && self.height == other.height
            && self.estimated_height == other.estimated_height
            && self.should_pin == other.should_pin
            && self.visible_while_showing_placeholder == other.visible_while_showing_placeholder
            && self.attributes == other.attributes
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::SupplementaryItem;
    use crate::order::SupplementaryKind;

    #[test]
    fn new_items_estimate_their_height() {
        let item = SupplementaryItem::header();
        assert_eq!(item.kind, SupplementaryKind::Header);
        assert_eq!(item.reuse_identifier, "header");
        assert_eq!(item.estimated_height, 44.0);
        assert!(item.has_estimated_height());

        let fixed = SupplementaryItem {
            height: Some(30.0),
            ..SupplementaryItem::footer()
        };
        assert!(!fixed.has_estimated_height());
    }

    #[test]
    fn configurators_chain_in_order() {
        let mut item = SupplementaryItem::header();
        item.add_configurator(|view, _, _| {
            if let Some(log) = view.downcast_mut::<Vec<&'static str>>() {
                log.push("outer");
            }
        });
        item.add_configurator(|view, _, _| {
            if let Some(log) = view.downcast_mut::<Vec<&'static str>>() {
                log.push("inner");
            }
        });

        let mut log: Vec<&'static str> = Vec::new();
        item.configure_view(&mut log, &(), 0);
        assert_eq!(log, ["outer", "inner"]);
    }

    #[test]
    fn equality_ignores_configurators() {
        let plain = SupplementaryItem::header();
        let mut configured = SupplementaryItem::header();
        configured.add_configurator(|_, _, _| {});
        assert!(configured.has_configurator());
        assert_eq!(plain, configured);
    }
}
