//! Interactive widget state.
//!
//! Each widget is a plain struct owned by the page that renders it. None of
//! them know about fetching: they are built from rows a resource already
//! returned and only track transient interaction state.
//!
//! | Widget | State |
//! |--------|-------|
//! | [`Lightbox`] | closed, or open at an image index |
//! | [`BentoGallery`] | span per tile + one composed [`Lightbox`] |
//! | [`Accordion`] | at most one open section |
//! | [`Expandable`] | one independent open flag per card |
//!
//! Global input and scroll suppression go through a [`Viewport`], which hands
//! out guards that undo themselves on drop.

mod accordion;
mod bento;
mod lightbox;
mod viewport;

pub use accordion::{Accordion, Disclosure, Expandable};
pub use bento::{BentoGallery, BentoLayout, BentoTile, DEFAULT_SPANS, SpanPattern};
pub use lightbox::{Lightbox, LightboxImage};
pub use viewport::{KeySubscription, ScrollLock, Viewport};

/// A keyboard key, named as the DOM `KeyboardEvent.key` names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other(String),
}

impl Key {
    pub fn from_dom(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("a"), Key::Other("a".into()));
    }
}
