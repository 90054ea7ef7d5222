//! Brush model and the footprint paint engine.

use crate::canvas::PixelBuffer;
use crate::geometry::{CanvasPoint, Color};
use crate::history::{PixelChange, Stroke};

pub const MIN_BRUSH_RADIUS: i32 = 1;
pub const DEFAULT_BRUSH_RADIUS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushFootprint {
    Circle,
    Square,
}

impl BrushFootprint {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Circle => Self::Square,
            Self::Square => Self::Circle,
        }
    }

    /// Whether the offset `(dx, dy)` falls inside a footprint of the given
    /// radius. The circle test is an inclusive Euclidean disc; the square
    /// is the whole bounding box.
    const fn covers(self, dx: i32, dy: i32, radius: i32) -> bool {
        match self {
            Self::Square => true,
            Self::Circle => {
                let (dx, dy, radius) = (dx as i64, dy as i64, radius as i64);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub color: Color,
    pub footprint: BrushFootprint,
    pub radius: i32,
}

impl Brush {
    pub const fn new(color: Color, radius: i32) -> Self {
        Self {
            color,
            footprint: BrushFootprint::Circle,
            radius,
        }
    }

    /// Paints one dab of this brush centered at `at`, writing into the
    /// buffer and returning the stroke of pixels that actually changed.
    ///
    /// An anchor outside the canvas paints nothing. Offsets landing outside
    /// the canvas are skipped, each surviving coordinate is read then
    /// written exactly once, and unchanged pixels are never recorded.
    pub fn paint<B: PixelBuffer>(&self, buffer: &mut B, at: CanvasPoint) -> Stroke {
        let mut stroke = Stroke::new();

        let bounds = buffer.bounds();
        if !bounds.contains(at.x, at.y) {
            return stroke;
        }

        let radius = self.radius.max(MIN_BRUSH_RADIUS);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let x = at.x + dx;
                let y = at.y + dy;

                if !bounds.contains(x, y) {
                    continue;
                }
                if !self.footprint.covers(dx, dy, radius) {
                    continue;
                }

                let (x, y) = (x as u32, y as u32);
                if let Some(change) = PixelChange::record_if_different(buffer, x, y, self.color) {
                    stroke.push(change);
                    buffer.set_pixel(x, y, self.color);
                }
            }
        }

        stroke
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushBinding {
    Primary,
    Secondary,
}

/// The two pointer-bound brushes. Color is selected per brush; radius and
/// footprint are shared controls that always mutate both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushSet {
    primary: Brush,
    secondary: Brush,
}

impl Default for BrushSet {
    fn default() -> Self {
        Self::new(
            Brush::new(Color::BLACK, DEFAULT_BRUSH_RADIUS),
            Brush::new(Color::WHITE, DEFAULT_BRUSH_RADIUS),
        )
    }
}

impl BrushSet {
    pub fn new(primary: Brush, secondary: Brush) -> Self {
        let mut set = Self { primary, secondary };
        set.set_radius(primary.radius);
        set.secondary.footprint = set.primary.footprint;
        set
    }

    pub fn brush(&self, binding: BrushBinding) -> Brush {
        match binding {
            BrushBinding::Primary => self.primary,
            BrushBinding::Secondary => self.secondary,
        }
    }

    pub fn select_color(&mut self, binding: BrushBinding, color: Color) {
        match binding {
            BrushBinding::Primary => self.primary.color = color,
            BrushBinding::Secondary => self.secondary.color = color,
        }
    }

    pub fn radius(&self) -> i32 {
        self.primary.radius
    }

    pub fn set_radius(&mut self, radius: i32) {
        let radius = radius.max(MIN_BRUSH_RADIUS);
        self.primary.radius = radius;
        self.secondary.radius = radius;
    }

    pub fn step_radius(&mut self, delta: i32) {
        self.set_radius(self.radius().saturating_add(delta));
    }

    pub fn footprint(&self) -> BrushFootprint {
        self.primary.footprint
    }

    pub fn toggle_footprint(&mut self) {
        let footprint = self.primary.footprint.toggled();
        self.primary.footprint = footprint;
        self.secondary.footprint = footprint;
    }
}
