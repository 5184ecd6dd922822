use super::{Rgba, SelectionMask};
use crate::surface::{PixelSurface, SurfaceResult};

/// Translucent red drawn over selected pixels.
pub const DEFAULT_HIGHLIGHT: Rgba = Rgba::new(255, 0, 0, 70);

/// Replaces whatever the overlay showed with a highlight of `selection`.
pub fn render_selection(
    overlay: &mut PixelSurface,
    selection: &SelectionMask,
    highlight: Rgba,
) -> SurfaceResult<()> {
    overlay.ensure_size(selection.size())?;
    overlay.clear();
    for point in selection.points() {
        overlay.put(point, highlight);
    }
    Ok(())
}
