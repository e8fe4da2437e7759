//! Full-screen image viewer with wraparound navigation.
//!
//! While open, the lightbox holds a key subscription and a scroll lock on its
//! [`Viewport`]. Both live inside the open state, so closing the viewer, or
//! dropping it while open, releases them exactly once.

use super::Key;
use super::viewport::{KeySubscription, ScrollLock, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxImage {
    pub src: String,
    pub alt: String,
}

impl LightboxImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

#[derive(Debug)]
struct Open {
    index: usize,
    _keys: KeySubscription,
    _scroll: ScrollLock,
}

#[derive(Debug)]
pub struct Lightbox {
    images: Vec<LightboxImage>,
    viewport: Viewport,
    open: Option<Open>,
}

impl Lightbox {
    pub fn new(images: Vec<LightboxImage>, viewport: Viewport) -> Self {
        Self {
            images,
            viewport,
            open: None,
        }
    }

    pub fn images(&self) -> &[LightboxImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the displayed image, or `None` when closed.
    pub fn open_index(&self) -> Option<usize> {
        self.open.as_ref().map(|o| o.index)
    }

    pub fn current(&self) -> Option<&LightboxImage> {
        self.open_index().and_then(|i| self.images.get(i))
    }

    /// Open at `index` (clamped to the last image). Does nothing when there
    /// are no images. Opening an open viewer just moves it.
    pub fn open(&mut self, index: usize) -> bool {
        if self.images.is_empty() {
            return false;
        }
        let index = index.min(self.images.len() - 1);
        match &mut self.open {
            Some(open) => open.index = index,
            None => {
                self.open = Some(Open {
                    index,
                    _keys: self.viewport.subscribe_keys(),
                    _scroll: self.viewport.lock_scroll(),
                });
            }
        }
        true
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn next(&mut self) {
        let len = self.images.len();
        if let Some(open) = &mut self.open {
            open.index = (open.index + 1) % len;
        }
    }

    pub fn prev(&mut self) {
        let len = self.images.len();
        if let Some(open) = &mut self.open {
            open.index = (open.index + len - 1) % len;
        }
    }

    /// Handle a global key press. Returns whether the key was consumed; keys
    /// are ignored while closed.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<LightboxImage> {
        (0..n)
            .map(|i| LightboxImage::new(format!("/img/{i}.jpg"), format!("image {i}")))
            .collect()
    }

    fn lightbox(n: usize) -> (Lightbox, Viewport) {
        let viewport = Viewport::new();
        (Lightbox::new(images(n), viewport.clone()), viewport)
    }

    #[test]
    fn next_n_times_is_identity() {
        for n in 1..=7 {
            for start in 0..n {
                let (mut lb, _) = lightbox(n);
                lb.open(start);
                for _ in 0..n {
                    lb.next();
                }
                assert_eq!(lb.open_index(), Some(start), "n={n} start={start}");
            }
        }
    }

    #[test]
    fn prev_n_times_is_identity() {
        for n in 1..=7 {
            for start in 0..n {
                let (mut lb, _) = lightbox(n);
                lb.open(start);
                for _ in 0..n {
                    lb.prev();
                }
                assert_eq!(lb.open_index(), Some(start), "n={n} start={start}");
            }
        }
    }

    #[test]
    fn next_then_prev_is_identity() {
        for n in 1..=7 {
            for start in 0..n {
                let (mut lb, _) = lightbox(n);
                lb.open(start);
                lb.next();
                lb.prev();
                assert_eq!(lb.open_index(), Some(start));
                lb.prev();
                lb.next();
                assert_eq!(lb.open_index(), Some(start));
            }
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        let (mut lb, _) = lightbox(3);
        lb.open(2);
        lb.next();
        assert_eq!(lb.open_index(), Some(0));
        lb.prev();
        assert_eq!(lb.open_index(), Some(2));
    }

    #[test]
    fn open_on_empty_stays_closed() {
        let (mut lb, viewport) = lightbox(0);
        assert!(!lb.open(0));
        assert!(!lb.is_open());
        assert_eq!(lb.current(), None);
        assert!(!viewport.scroll_suppressed());
        assert_eq!(viewport.key_listeners(), 0);
    }

    #[test]
    fn open_clamps_out_of_range_index() {
        let (mut lb, _) = lightbox(3);
        lb.open(10);
        assert_eq!(lb.open_index(), Some(2));
        assert_eq!(lb.current().unwrap().src, "/img/2.jpg");
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let (mut lb, _) = lightbox(3);
        lb.next();
        lb.prev();
        assert!(!lb.is_open());
    }

    #[test]
    fn keys_drive_navigation_only_while_open() {
        let (mut lb, _) = lightbox(3);
        assert!(!lb.handle_key(&Key::ArrowRight));
        lb.open(0);
        assert!(lb.handle_key(&Key::ArrowRight));
        assert_eq!(lb.open_index(), Some(1));
        assert!(lb.handle_key(&Key::ArrowLeft));
        assert!(lb.handle_key(&Key::ArrowLeft));
        assert_eq!(lb.open_index(), Some(2));
        assert!(!lb.handle_key(&Key::Enter));
        assert!(lb.handle_key(&Key::Escape));
        assert!(!lb.is_open());
    }

    #[test]
    fn open_close_cycles_do_not_leak() {
        let (mut lb, viewport) = lightbox(4);
        for i in 0..5 {
            lb.open(i);
            lb.open(i + 1);
            assert_eq!(viewport.key_listeners(), 1);
            assert!(viewport.scroll_suppressed());
            lb.close();
            lb.close();
            assert_eq!(viewport.key_listeners(), 0);
            assert!(!viewport.scroll_suppressed());
        }
    }

    #[test]
    fn dropping_open_lightbox_restores_scroll() {
        let (mut lb, viewport) = lightbox(2);
        lb.open(1);
        assert!(viewport.scroll_suppressed());
        drop(lb);
        assert!(!viewport.scroll_suppressed());
        assert_eq!(viewport.key_listeners(), 0);
    }

    #[test]
    fn two_lightboxes_share_the_viewport() {
        let viewport = Viewport::new();
        let mut a = Lightbox::new(images(2), viewport.clone());
        let mut b = Lightbox::new(images(2), viewport.clone());
        a.open(0);
        b.open(0);
        a.close();
        assert!(viewport.scroll_suppressed());
        b.close();
        assert!(!viewport.scroll_suppressed());
    }
}
