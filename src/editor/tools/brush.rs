use super::{PixelPoint, Rgba, SurfacePoint};
use crate::surface::PixelSurface;

pub const DEFAULT_BRUSH_WIDTH: f32 = 30.0;
pub const MIN_BRUSH_WIDTH: f32 = 1.0;
pub const MAX_BRUSH_WIDTH: f32 = 512.0;

pub(crate) fn clamp_brush_width(width: f32) -> f32 {
    if width.is_nan() {
        DEFAULT_BRUSH_WIDTH
    } else {
        width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushState {
    Idle,
    Drawing,
}

/// Freehand stroke state. Segments are painted as soon as the pointer moves;
/// there is no pending stage.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushStroke {
    state: BrushState,
    last_point: Option<SurfacePoint>,
    segments: usize,
}

impl Default for BrushStroke {
    fn default() -> Self {
        Self::new()
    }
}

impl BrushStroke {
    pub const fn new() -> Self {
        Self {
            state: BrushState::Idle,
            last_point: None,
            segments: 0,
        }
    }

    pub const fn state(&self) -> BrushState {
        self.state
    }

    pub const fn is_drawing(&self) -> bool {
        matches!(self.state, BrushState::Drawing)
    }

    /// Segments painted since the current path began.
    pub const fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn begin(&mut self, start: SurfacePoint) {
        self.state = BrushState::Drawing;
        self.last_point = Some(start);
        self.segments = 0;
    }

    /// Extends the path to `point`, painting the new segment. Ignored while idle.
    pub fn extend(
        &mut self,
        point: SurfacePoint,
        paint: &mut PixelSurface,
        color: Rgba,
        width: f32,
    ) -> bool {
        let Some(from) = self.last_point.filter(|_| self.is_drawing()) else {
            return false;
        };
        stroke_segment(paint, from, point, width, color);
        self.last_point = Some(point);
        self.segments += 1;
        true
    }

    /// Closes the path. Returns whether a path was open.
    pub fn finish(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.state = BrushState::Idle;
        self.last_point = None;
        was_drawing
    }
}

/// Paints a round-capped line: every pixel whose center lies within half the
/// width of the segment. Consecutive segments share endpoints, which yields
/// round joins. Pixels outside the surface are clipped.
pub fn stroke_segment(
    paint: &mut PixelSurface,
    from: SurfacePoint,
    to: SurfacePoint,
    width: f32,
    color: Rgba,
) {
    let radius = clamp_brush_width(width) / 2.0;
    if paint.size().is_empty()
        || ![from.x, from.y, to.x, to.y].iter().all(|value| value.is_finite())
    {
        return;
    }

    let max_x = paint.width() as f32 - 1.0;
    let max_y = paint.height() as f32 - 1.0;
    let left = (from.x.min(to.x) - radius).floor().max(0.0);
    let right = (from.x.max(to.x) + radius).ceil().min(max_x);
    let top = (from.y.min(to.y) - radius).floor().max(0.0);
    let bottom = (from.y.max(to.y) + radius).ceil().min(max_y);
    if left > right || top > bottom {
        return;
    }

    let radius_sq = radius * radius;
    for y in top as u32..=bottom as u32 {
        for x in left as u32..=right as u32 {
            let center = SurfacePoint::new(x as f32 + 0.5, y as f32 + 0.5);
            if distance_sq_to_segment(center, from, to) <= radius_sq {
                paint.put(PixelPoint::new(x, y), color);
            }
        }
    }
}

fn distance_sq_to_segment(point: SurfacePoint, a: SurfacePoint, b: SurfacePoint) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (point.x - a.x, point.y - a.y);
    let length_sq = abx * abx + aby * aby;
    let t = if length_sq > 0.0 {
        ((apx * abx + apy * aby) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = apx - abx * t;
    let dy = apy - aby * t;
    dx * dx + dy * dy
}
