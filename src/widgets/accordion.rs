//! Disclosure widgets: the exclusive [`Accordion`] and the independent
//! [`Expandable`] card.
//!
//! The two have different concurrency policies and are deliberately separate
//! types. An accordion coordinates its sections; expandable cards never look
//! at their siblings.

use crate::naming::RegionIds;

/// Accessibility attributes for a disclosure trigger.
///
/// `expanded` maps to `aria-expanded`; `controls` is the id of the content
/// region and maps to `aria-controls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    pub expanded: bool,
    pub controls: String,
}

impl Disclosure {
    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }
}

/// At most one section open at a time.
#[derive(Debug, Clone)]
pub struct Accordion {
    regions: Vec<String>,
    open: Option<usize>,
}

impl Accordion {
    pub fn new<I, S>(titles: I, ids: &mut RegionIds) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            regions: titles.into_iter().map(|t| ids.allocate(t.as_ref())).collect(),
            open: None,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Open `index`, closing whichever section was open; close it if it was
    /// the open one. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.regions.len() {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn disclosure(&self, index: usize) -> Option<Disclosure> {
        self.regions.get(index).map(|region| Disclosure {
            expanded: self.is_open(index),
            controls: region.clone(),
        })
    }
}

/// A card with its own open flag.
#[derive(Debug, Clone)]
pub struct Expandable {
    region: String,
    open: bool,
}

impl Expandable {
    pub fn new(title: &str, ids: &mut RegionIds) -> Self {
        Self {
            region: ids.allocate(title),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn disclosure(&self) -> Disclosure {
        Disclosure {
            expanded: self.open,
            controls: self.region.clone(),
        }
    }
}
