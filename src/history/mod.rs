//! Per-pixel change tracking and the undo/redo stroke log.
//!
//! Edits are recorded as [`Stroke`]s: ordered lists of the pixels an
//! operation actually altered, each carrying the color the pixel held
//! before the write. Replaying a stroke restores those colors; inverting
//! one re-diffs against the live buffer so repeated undo/redo cycles stay
//! pixel-exact.

use crate::canvas::PixelBuffer;
use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub x: u32,
    pub y: u32,
    pub color: Color,
}

impl PixelChange {
    pub const fn new(x: u32, y: u32, color: Color) -> Self {
        Self { x, y, color }
    }

    /// Reads the buffer at `(x, y)` and records the current color iff it
    /// differs from `new_color`. The caller is responsible for writing
    /// `new_color` afterwards; no-op writes are never recorded.
    pub fn record_if_different<B: PixelBuffer>(
        buffer: &B,
        x: u32,
        y: u32,
        new_color: Color,
    ) -> Option<Self> {
        let old = buffer.pixel(x, y);
        if old == new_color {
            None
        } else {
            Some(Self::new(x, y, old))
        }
    }
}

/// One atomic edit: the changes a single paint or fill operation made.
///
/// Coordinates are distinct within a stroke; insertion order is preserved
/// for reproducibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stroke {
    changes: Vec<PixelChange>,
}

impl Stroke {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: PixelChange) {
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[PixelChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Writes every recorded color back into the buffer.
    pub fn apply<B: PixelBuffer>(&self, buffer: &mut B) {
        for change in &self.changes {
            buffer.set_pixel(change.x, change.y, change.color);
        }
    }

    /// Builds the counter-stroke that reverses this one, diffed against the
    /// buffer's *current* state rather than by swapping stored values.
    /// Pixels that already hold the recorded color are skipped, so the
    /// inverse is itself no-op-free.
    pub fn invert<B: PixelBuffer>(&self, buffer: &B) -> Stroke {
        let mut inverse = Stroke::new();
        for change in &self.changes {
            if let Some(counter) =
                PixelChange::record_if_different(buffer, change.x, change.y, change.color)
            {
                inverse.push(counter);
            }
        }
        inverse
    }
}

/// LIFO stack of strokes. The undo and redo histories are two independent
/// instances.
#[derive(Debug, Default)]
pub struct HistoryStack {
    strokes: Vec<Stroke>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn push(&mut self, stroke: Stroke) {
        debug_assert!(!stroke.is_empty(), "empty strokes are never recorded");
        self.strokes.push(stroke);
    }

    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        if !self.strokes.is_empty() {
            tracing::debug!(discarded = self.strokes.len(), "history stack cleared");
        }
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasImage;

    fn small_canvas() -> CanvasImage {
        CanvasImage::new(3, 3, Color::WHITE).expect("test canvas should build")
    }

    #[test]
    fn record_if_different_skips_pixels_already_holding_the_new_color() {
        let canvas = small_canvas();
        assert_eq!(
            PixelChange::record_if_different(&canvas, 1, 1, Color::WHITE),
            None
        );
    }

    #[test]
    fn record_if_different_captures_the_old_color_not_the_new_one() {
        let mut canvas = small_canvas();
        canvas.set_pixel(2, 0, Color::new(5, 6, 7));

        let change = PixelChange::record_if_different(&canvas, 2, 0, Color::BLACK)
            .expect("differing pixel should record");
        assert_eq!(change, PixelChange::new(2, 0, Color::new(5, 6, 7)));
    }

    #[test]
    fn apply_writes_every_recorded_change() {
        let mut canvas = small_canvas();
        let mut stroke = Stroke::new();
        stroke.push(PixelChange::new(0, 0, Color::new(1, 1, 1)));
        stroke.push(PixelChange::new(2, 2, Color::new(2, 2, 2)));

        stroke.apply(&mut canvas);

        assert_eq!(canvas.pixel(0, 0), Color::new(1, 1, 1));
        assert_eq!(canvas.pixel(2, 2), Color::new(2, 2, 2));
        assert_eq!(canvas.pixel(1, 1), Color::WHITE);
    }

    #[test]
    fn invert_reads_the_live_buffer_for_counter_changes() {
        let mut canvas = small_canvas();
        canvas.set_pixel(0, 0, Color::BLACK);
        canvas.set_pixel(1, 0, Color::BLACK);

        // Forward stroke says both pixels were white before the edit.
        let mut stroke = Stroke::new();
        stroke.push(PixelChange::new(0, 0, Color::WHITE));
        stroke.push(PixelChange::new(1, 0, Color::WHITE));

        let inverse = stroke.invert(&canvas);
        assert_eq!(
            inverse.changes(),
            &[
                PixelChange::new(0, 0, Color::BLACK),
                PixelChange::new(1, 0, Color::BLACK),
            ]
        );
    }

    #[test]
    fn invert_drops_pixels_that_already_match_the_recorded_color() {
        let mut canvas = small_canvas();
        canvas.set_pixel(0, 0, Color::BLACK);
        // (1, 0) stays white, identical to its recorded value.

        let mut stroke = Stroke::new();
        stroke.push(PixelChange::new(0, 0, Color::WHITE));
        stroke.push(PixelChange::new(1, 0, Color::WHITE));

        let inverse = stroke.invert(&canvas);
        assert_eq!(inverse.changes(), &[PixelChange::new(0, 0, Color::BLACK)]);
    }

    #[test]
    fn invert_then_apply_round_trips_the_buffer() {
        let mut canvas = small_canvas();
        canvas.set_pixel(1, 1, Color::new(9, 9, 9));
        canvas.set_pixel(2, 1, Color::new(9, 9, 9));
        let painted = canvas.clone();

        let mut stroke = Stroke::new();
        stroke.push(PixelChange::new(1, 1, Color::WHITE));
        stroke.push(PixelChange::new(2, 1, Color::WHITE));

        let inverse = stroke.invert(&canvas);
        stroke.apply(&mut canvas);
        assert_eq!(canvas.pixel(1, 1), Color::WHITE);
        assert_eq!(canvas.pixel(2, 1), Color::WHITE);

        inverse.apply(&mut canvas);
        assert_eq!(canvas, painted);
    }

    #[test]
    fn history_stack_pops_in_reverse_push_order() {
        let mut stack = HistoryStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);

        let mut first = Stroke::new();
        first.push(PixelChange::new(0, 0, Color::BLACK));
        let mut second = Stroke::new();
        second.push(PixelChange::new(1, 1, Color::WHITE));

        stack.push(first.clone());
        stack.push(second.clone());
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop(), Some(second));
        assert_eq!(stack.pop(), Some(first));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn history_stack_clear_discards_all_strokes() {
        let mut stack = HistoryStack::new();
        let mut stroke = Stroke::new();
        stroke.push(PixelChange::new(0, 0, Color::BLACK));
        stack.push(stroke);

        stack.clear();
        assert!(stack.is_empty());
    }
}
