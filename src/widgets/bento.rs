//! Bento grid: position-based tile spans plus a lightbox trigger per tile.
//!
//! Spans come from a fixed repeating pattern list, never from the image:
//! tile `i` gets pattern `i mod N`. With the default list a gallery renders
//! as
//!
//! ```text
//! ┌───────┬───┬───┐
//! │ 2×2   │1×1│1×2│
//! │       ├───┤   │
//! │       │1×1│   │
//! ├───┬───┴───┼───┤
//! │1×1│  2×1  │…  │
//! ```

use super::Key;
use super::lightbox::{Lightbox, LightboxImage};
use super::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// A grid tile footprint: `columns × rows`.
///
/// Serialized as a `[columns, rows]` pair so config files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct SpanPattern {
    pub columns: u8,
    pub rows: u8,
}

impl SpanPattern {
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self { columns, rows }
    }

    /// Inline CSS placing the tile on the grid.
    pub fn to_css(self) -> String {
        format!(
            "grid-column: span {}; grid-row: span {};",
            self.columns, self.rows
        )
    }
}

impl From<(u8, u8)> for SpanPattern {
    fn from((columns, rows): (u8, u8)) -> Self {
        Self { columns, rows }
    }
}

impl From<SpanPattern> for (u8, u8) {
    fn from(span: SpanPattern) -> Self {
        (span.columns, span.rows)
    }
}

pub const DEFAULT_SPANS: [SpanPattern; 6] = [
    SpanPattern::new(2, 2),
    SpanPattern::new(1, 1),
    SpanPattern::new(1, 2),
    SpanPattern::new(1, 1),
    SpanPattern::new(1, 1),
    SpanPattern::new(2, 1),
];

/// A non-empty repeating list of span patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BentoLayout {
    patterns: Vec<SpanPattern>,
}

impl Default for BentoLayout {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_SPANS.to_vec(),
        }
    }
}

impl BentoLayout {
    /// `None` when the list is empty or any span is zero.
    pub fn new(patterns: Vec<SpanPattern>) -> Option<Self> {
        if patterns.is_empty() || patterns.iter().any(|p| p.columns == 0 || p.rows == 0) {
            return None;
        }
        Some(Self { patterns })
    }

    pub fn period(&self) -> usize {
        self.patterns.len()
    }

    pub fn span_for(&self, position: usize) -> SpanPattern {
        self.patterns[position % self.patterns.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BentoTile {
    pub index: usize,
    pub span: SpanPattern,
    pub image: LightboxImage,
}

/// A bento grid composed with a [`Lightbox`] over the same images.
#[derive(Debug)]
pub struct BentoGallery {
    tiles: Vec<BentoTile>,
    lightbox: Lightbox,
}

impl BentoGallery {
    pub fn new(images: Vec<LightboxImage>, layout: &BentoLayout, viewport: Viewport) -> Self {
        let tiles = images
            .iter()
            .enumerate()
            .map(|(index, image)| BentoTile {
                index,
                span: layout.span_for(index),
                image: image.clone(),
            })
            .collect();
        Self {
            tiles,
            lightbox: Lightbox::new(images, viewport),
        }
    }

    pub fn tiles(&self) -> &[BentoTile] {
        &self.tiles
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// Pointer activation of tile `index`.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tiles.len() {
            return false;
        }
        self.lightbox.open(index)
    }

    /// Key press while tile `index` has focus. Enter and Space activate.
    pub fn handle_tile_key(&mut self, index: usize, key: &Key) -> bool {
        match key {
            Key::Enter | Key::Space => self.activate(index),
            _ => false,
        }
    }

    /// Global key press, routed to the lightbox.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        self.lightbox.handle_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<LightboxImage> {
        (0..n)
            .map(|i| LightboxImage::new(format!("/g/{i}.jpg"), format!("alt {i}")))
            .collect()
    }

    #[test]
    fn spans_repeat_with_period() {
        let layout = BentoLayout::default();
        let p = layout.period();
        for i in 0..(3 * p) {
            assert_eq!(layout.span_for(i), layout.span_for(i + p), "i={i}");
        }
    }

    #[test]
    fn custom_pattern_is_used_in_order() {
        let layout =
            BentoLayout::new(vec![SpanPattern::new(2, 1), SpanPattern::new(1, 3)]).unwrap();
        let gallery = BentoGallery::new(images(5), &layout, Viewport::new());
        let spans: Vec<(u8, u8)> = gallery.tiles().iter().map(|t| t.span.into()).collect();
        assert_eq!(spans, vec![(2, 1), (1, 3), (2, 1), (1, 3), (2, 1)]);
    }

    #[test]
    fn layout_rejects_empty_or_zero_spans() {
        assert!(BentoLayout::new(Vec::new()).is_none());
        assert!(BentoLayout::new(vec![SpanPattern::new(0, 1)]).is_none());
    }

    #[test]
    fn span_css() {
        assert_eq!(
            SpanPattern::new(2, 1).to_css(),
            "grid-column: span 2; grid-row: span 1;"
        );
    }

    #[test]
    fn span_pattern_serializes_as_pair() {
        let json = serde_json::to_string(&SpanPattern::new(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
        let back: SpanPattern = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(back, SpanPattern::new(1, 2));
    }

    #[test]
    fn click_opens_lightbox_at_tile() {
        let mut gallery = BentoGallery::new(images(4), &BentoLayout::default(), Viewport::new());
        assert!(gallery.activate(2));
        assert_eq!(gallery.lightbox().open_index(), Some(2));
        assert_eq!(gallery.lightbox().current().unwrap().src, "/g/2.jpg");
    }

    #[test]
    fn enter_and_space_activate_tiles() {
        let mut gallery = BentoGallery::new(images(4), &BentoLayout::default(), Viewport::new());
        assert!(!gallery.handle_tile_key(1, &Key::Other("a".into())));
        assert!(!gallery.lightbox().is_open());
        assert!(gallery.handle_tile_key(1, &Key::Enter));
        assert_eq!(gallery.lightbox().open_index(), Some(1));
        gallery.handle_key(&Key::Escape);
        assert!(gallery.handle_tile_key(3, &Key::Space));
        assert_eq!(gallery.lightbox().open_index(), Some(3));
    }

    #[test]
    fn global_keys_navigate_composed_lightbox() {
        let viewport = Viewport::new();
        let mut gallery = BentoGallery::new(images(3), &BentoLayout::default(), viewport.clone());
        gallery.activate(2);
        gallery.handle_key(&Key::ArrowRight);
        assert_eq!(gallery.lightbox().open_index(), Some(0));
        gallery.handle_key(&Key::Escape);
        assert_eq!(viewport.key_listeners(), 0);
    }

    #[test]
    fn activating_missing_tile_is_noop() {
        let mut gallery = BentoGallery::new(images(2), &BentoLayout::default(), Viewport::new());
        assert!(!gallery.activate(5));
        assert!(!gallery.lightbox().is_open());

        let mut empty = BentoGallery::new(Vec::new(), &BentoLayout::default(), Viewport::new());
        assert!(!empty.activate(0));
    }
}
