//! Edit session: the photo, selection overlay and paint layers plus tool state.

pub mod tools;

use std::io::Cursor;

use image::{imageops, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::geometry::SurfaceSize;
use crate::surface::{PixelSurface, SurfaceError};
use crate::swatch::{Swatch, SwatchError};

pub use tools::{
    BrushState, BrushStroke, PixelPoint, Rgba, SelectionMask, SurfacePoint, Tolerance, ToolKind,
    ToolOptions,
};

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("photo has no pixels ({width}x{height})")]
    EmptyPhoto { width: u32, height: u32 },
    #[error("no photo loaded; nothing to export")]
    UnsupportedExport,
    #[error("failed to encode flattened image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type EditResult<T> = std::result::Result<T, EditError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied { pixels: usize },
    NoSelection,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    photo: Option<PixelSurface>,
    selection_overlay: PixelSurface,
    paint: PixelSurface,
    pending: Option<SelectionMask>,
    options: ToolOptions,
    active_tool: ToolKind,
    brush: BrushStroke,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_options(ToolOptions::default())
    }

    pub fn with_options(options: ToolOptions) -> Self {
        Self {
            photo: None,
            selection_overlay: PixelSurface::empty(),
            paint: PixelSurface::empty(),
            pending: None,
            options,
            active_tool: ToolKind::default(),
            brush: BrushStroke::new(),
        }
    }

    /// Replaces the photo and resets the overlay and paint layers to match it.
    pub fn load_photo(&mut self, image: RgbaImage) -> EditResult<SurfaceSize> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "rejected empty photo");
            return Err(EditError::EmptyPhoto { width, height });
        }

        let photo = PixelSurface::from_image(image);
        let size = photo.size();
        self.photo = Some(photo);
        self.selection_overlay = PixelSurface::new(width, height);
        self.paint = PixelSurface::new(width, height);
        self.pending = None;
        self.brush.finish();

        tracing::debug!(width, height, "photo loaded");
        Ok(size)
    }

    /// Loads a decoded row-major RGBA buffer.
    pub fn load_photo_raw(
        &mut self,
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    ) -> EditResult<SurfaceSize> {
        let photo = PixelSurface::from_raw(width, height, bytes).inspect_err(|err| {
            tracing::warn!(%err, "rejected photo buffer");
        })?;
        self.load_photo(photo.into_image())
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn size(&self) -> SurfaceSize {
        self.photo
            .as_ref()
            .map_or(SurfaceSize::new(0, 0), PixelSurface::size)
    }

    pub fn photo(&self) -> Option<&PixelSurface> {
        self.photo.as_ref()
    }

    pub fn selection_surface(&self) -> &PixelSurface {
        &self.selection_overlay
    }

    pub fn paint_surface(&self) -> &PixelSurface {
        &self.paint
    }

    pub fn selection(&self) -> Option<&SelectionMask> {
        self.pending.as_ref()
    }

    pub fn has_pending_selection(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|selection| !selection.is_empty())
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn brush_state(&self) -> BrushState {
        self.brush.state()
    }

    /// Switching tools closes any open brush path.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.active_tool != tool {
            self.brush.finish();
            self.active_tool = tool;
        }
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.options.set_color(color);
    }

    pub fn set_tolerance(&mut self, tolerance: u16) {
        self.options.set_tolerance(tolerance);
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.options.set_brush_width(width);
    }

    pub fn set_active_swatch(&mut self, swatch: &Swatch) -> Result<(), SwatchError> {
        let color = swatch.color()?;
        tracing::debug!(name = %swatch.name, hex = %swatch.hex, "active swatch changed");
        self.options.set_color(color);
        Ok(())
    }

    /// Selects the region around the clicked point and highlights it. The
    /// previous selection is replaced only if the new one succeeds.
    pub fn on_wand_click(&mut self, x: f32, y: f32) -> EditResult<usize> {
        let size = self.size();
        let seed = SurfacePoint::new(x, y)
            .to_pixel()
            .filter(|seed| size.contains(seed.x, seed.y))
            .ok_or_else(|| {
                tracing::warn!(x, y, "wand click outside photo");
                SurfaceError::OutOfBounds {
                    x: floor_to_i64(x),
                    y: floor_to_i64(y),
                    width: size.width,
                    height: size.height,
                }
            })?;
        let photo = self.photo.as_ref().ok_or(SurfaceError::OutOfBounds {
            x: i64::from(seed.x),
            y: i64::from(seed.y),
            width: 0,
            height: 0,
        })?;

        let selection = tools::grow_region(photo.snapshot(), seed, self.options.tolerance)?;
        tools::render_selection(
            &mut self.selection_overlay,
            &selection,
            self.options.highlight,
        )?;

        let selected = selection.len();
        tracing::debug!(
            x = seed.x,
            y = seed.y,
            tolerance = self.options.tolerance.value(),
            selected,
            "wand selection"
        );
        self.pending = Some(selection);
        Ok(selected)
    }

    /// Blends the active color into the paint layer under the pending
    /// selection, then consumes the selection.
    pub fn on_commit(&mut self) -> EditResult<CommitOutcome> {
        let Some(selection) = self.pending.take().filter(|selection| !selection.is_empty())
        else {
            tracing::debug!("commit without pending selection ignored");
            return Ok(CommitOutcome::NoSelection);
        };
        let Some(photo) = self.photo.as_ref() else {
            return Ok(CommitOutcome::NoSelection);
        };

        let painted = match tools::apply_selection(
            photo.snapshot(),
            &mut self.paint,
            &selection,
            self.options.color,
        ) {
            Ok(painted) => painted,
            Err(err) => {
                tracing::warn!(%err, "commit rejected");
                self.pending = Some(selection);
                return Err(err.into());
            }
        };
        self.selection_overlay.clear();

        tracing::debug!(painted, color = %self.options.color.to_hex(), "selection committed");
        Ok(CommitOutcome::Applied { pixels: painted })
    }

    /// Drops the pending selection without painting. Returns whether one existed.
    pub fn on_deselect(&mut self) -> bool {
        self.selection_overlay.clear();
        self.pending.take().is_some()
    }

    /// Erases every committed edit and brush stroke.
    pub fn on_clear_paint(&mut self) {
        self.paint.clear();
        tracing::debug!("paint layer cleared");
    }

    pub fn on_brush_down(&mut self, point: SurfacePoint) {
        self.brush.begin(point);
        tracing::trace!(x = point.x, y = point.y, "brush path started");
    }

    /// Paints the segment to `point` when a path is open.
    pub fn on_brush_move(&mut self, point: SurfacePoint) -> bool {
        self.brush.extend(
            point,
            &mut self.paint,
            self.options.color,
            self.options.brush_width,
        )
    }

    pub fn on_brush_up(&mut self) -> bool {
        let closed = self.brush.finish();
        if closed {
            tracing::trace!("brush path closed");
        }
        closed
    }

    pub fn on_brush_leave(&mut self) -> bool {
        self.on_brush_up()
    }

    /// Photo with the paint layer composited on top; the overlay is excluded.
    pub fn flatten(&self) -> EditResult<RgbaImage> {
        let photo = self.photo.as_ref().ok_or(EditError::UnsupportedExport)?;

        let mut output = photo.as_image().clone();
        imageops::overlay(&mut output, self.paint.as_image(), 0, 0);
        Ok(output)
    }

    pub fn export_png(&self) -> EditResult<Vec<u8>> {
        let flattened = self.flatten()?;
        let mut encoded = Cursor::new(Vec::new());
        flattened.write_to(&mut encoded, ImageFormat::Png)?;
        Ok(encoded.into_inner())
    }
}

fn floor_to_i64(value: f32) -> i64 {
    if value.is_finite() {
        value.floor() as i64
    } else {
        i64::MIN
    }
}
