//! Canvas session: one owned surface, two brushes, and the undo/redo
//! coordination over the stroke log.

use crate::brush::{BrushBinding, BrushSet};
use crate::canvas::{CanvasImage, PixelBuffer};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::geometry::{CanvasPoint, Color};
use crate::history::{HistoryStack, PixelChange, Stroke};

#[derive(Debug)]
pub struct CanvasSession<B: PixelBuffer> {
    buffer: B,
    brushes: BrushSet,
    undo_stack: HistoryStack,
    redo_stack: HistoryStack,
}

impl CanvasSession<CanvasImage> {
    /// Builds a white canvas session from configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let bounds = config.canvas_bounds();
        let buffer = CanvasImage::new(bounds.width, bounds.height, Color::WHITE)?;
        Ok(Self::with_brushes(buffer, config.brush_set()))
    }
}

impl<B: PixelBuffer> CanvasSession<B> {
    pub fn new(buffer: B) -> Self {
        Self::with_brushes(buffer, BrushSet::default())
    }

    pub fn with_brushes(buffer: B, brushes: BrushSet) -> Self {
        Self {
            buffer,
            brushes,
            undo_stack: HistoryStack::new(),
            redo_stack: HistoryStack::new(),
        }
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    pub fn brushes(&self) -> &BrushSet {
        &self.brushes
    }

    pub fn brushes_mut(&mut self) -> &mut BrushSet {
        &mut self.brushes
    }

    /// Paints one dab of the bound brush at `at`. Returns the number of
    /// pixels that changed; zero when the dab was off-canvas or a no-op.
    pub fn paint(&mut self, binding: BrushBinding, at: CanvasPoint) -> usize {
        let brush = self.brushes.brush(binding);
        let stroke = brush.paint(&mut self.buffer, at);
        tracing::debug!(?binding, x = at.x, y = at.y, changed = stroke.len(), "paint");
        self.commit(stroke)
    }

    /// Recolors the whole canvas in row-major order as one atomic stroke.
    /// Pixels already holding `color` are not recorded, so filling with the
    /// current color changes nothing and records nothing.
    pub fn fill(&mut self, color: Color) -> usize {
        let bounds = self.buffer.bounds();
        let mut stroke = Stroke::new();
        for y in 0..bounds.height {
            for x in 0..bounds.width {
                if let Some(change) = PixelChange::record_if_different(&self.buffer, x, y, color) {
                    stroke.push(change);
                    self.buffer.set_pixel(x, y, color);
                }
            }
        }
        tracing::debug!(?color, changed = stroke.len(), "fill");
        self.commit(stroke)
    }

    /// Fills with white, the canvas background.
    pub fn clear(&mut self) -> usize {
        self.fill(Color::WHITE)
    }

    pub fn undo(&mut self) -> bool {
        let applied = replay(&mut self.undo_stack, &mut self.redo_stack, &mut self.buffer);
        tracing::debug!(applied, "undo");
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = replay(&mut self.redo_stack, &mut self.undo_stack, &mut self.buffer);
        tracing::debug!(applied, "redo");
        applied
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Records a completed edit. Empty strokes never reach a history stack,
    /// and a recorded edit invalidates any remaining redo history.
    fn commit(&mut self, stroke: Stroke) -> usize {
        if stroke.is_empty() {
            return 0;
        }

        let changed = stroke.len();
        self.undo_stack.push(stroke);
        self.redo_stack.clear();
        changed
    }
}

/// Pops one stroke from `source`, pushes its live-state inverse onto
/// `target`, then applies the popped stroke to the buffer. Undo and redo
/// are the two orientations of this move.
fn replay<B: PixelBuffer>(
    source: &mut HistoryStack,
    target: &mut HistoryStack,
    buffer: &mut B,
) -> bool {
    let stroke = match source.pop() {
        Some(stroke) => stroke,
        None => return false,
    };

    let inverse = stroke.invert(buffer);
    if !inverse.is_empty() {
        target.push(inverse);
    }
    stroke.apply(buffer);
    true
}
