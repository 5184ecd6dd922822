mod brush;
mod compositor;
mod overlay;
mod wand;

pub use crate::geometry::{PixelPoint, Rgba, SurfacePoint};
pub use brush::{
    stroke_segment, BrushState, BrushStroke, DEFAULT_BRUSH_WIDTH, MAX_BRUSH_WIDTH,
    MIN_BRUSH_WIDTH,
};
pub use compositor::{apply_selection, multiply_blend};
pub use overlay::{render_selection, DEFAULT_HIGHLIGHT};
pub use wand::{grow_region, SelectionMask, Tolerance, MAX_TOLERANCE};

pub const DEFAULT_TOLERANCE: u16 = 32;
/// First swatch of the built-in catalog ("Cloud White").
pub const DEFAULT_PAINT_COLOR: Rgba = Rgba::opaque(0xF8, 0xF4, 0xF0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOptionVisibility {
    pub has_color: bool,
    pub has_tolerance: bool,
    pub has_stroke_width: bool,
}

impl ToolOptionVisibility {
    pub const fn has_any(&self) -> bool {
        let Self {
            has_color,
            has_tolerance,
            has_stroke_width,
        } = *self;
        has_color || has_tolerance || has_stroke_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Wand,
    Brush,
}

impl ToolKind {
    pub const fn option_visibility(self) -> ToolOptionVisibility {
        match self {
            Self::Wand => ToolOptionVisibility {
                has_color: true,
                has_tolerance: true,
                has_stroke_width: false,
            },
            Self::Brush => ToolOptionVisibility {
                has_color: true,
                has_tolerance: false,
                has_stroke_width: true,
            },
        }
    }
}

/// Parameters shared by the wand and brush tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolOptions {
    pub color: Rgba,
    pub tolerance: Tolerance,
    pub brush_width: f32,
    pub highlight: Rgba,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_PAINT_COLOR,
            tolerance: Tolerance::new(DEFAULT_TOLERANCE),
            brush_width: DEFAULT_BRUSH_WIDTH,
            highlight: DEFAULT_HIGHLIGHT,
        }
    }
}

impl ToolOptions {
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn set_tolerance(&mut self, tolerance: u16) {
        self.tolerance = Tolerance::new(tolerance);
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.brush_width = brush::clamp_brush_width(width);
    }

    pub fn set_highlight(&mut self, highlight: Rgba) {
        self.highlight = highlight;
    }
}
