use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

/// A CSS selector written as a literal and compiled on first use.
#[derive(Debug)]
pub(super) struct StaticSelector {
    compiled: OnceLock<Selector>,
    source: &'static str,
}

impl StaticSelector {
    pub(super) const fn new(source: &'static str) -> Self {
        Self {
            compiled: OnceLock::new(),
            source,
        }
    }

    /// First element of `document` matching this selector.
    pub(super) fn first_in<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(self).next()
    }

    /// First descendant of `element` matching this selector.
    pub(super) fn first_under<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.select(self).next()
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        self.compiled.get_or_init(|| {
            Selector::parse(self.source)
                .unwrap_or_else(|e| panic!("invalid static selector {:?}: {e:?}", self.source))
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}
