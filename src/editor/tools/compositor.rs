use super::{Rgba, SelectionMask};
use crate::surface::{PixelSnapshot, PixelSurface, SurfaceResult};

/// Per-channel multiply: `base * tint / 255`, rounded to nearest. Alpha is
/// multiplied like the color channels, so an opaque tint keeps the base alpha.
pub fn multiply_blend(base: Rgba, tint: Rgba) -> Rgba {
    let channel = |b: u8, t: u8| ((u16::from(b) * u16::from(t) + 127) / 255) as u8;
    Rgba::new(
        channel(base.r, tint.r),
        channel(base.g, tint.g),
        channel(base.b, tint.b),
        channel(base.a, tint.a),
    )
}

/// Writes `multiply(photo, color)` into the paint layer at every selected pixel.
/// The photo is always the base, so recoloring replaces earlier paint instead
/// of darkening it. Returns the number of pixels painted.
pub fn apply_selection(
    photo: PixelSnapshot<'_>,
    paint: &mut PixelSurface,
    selection: &SelectionMask,
    color: Rgba,
) -> SurfaceResult<usize> {
    paint.ensure_size(photo.size())?;
    paint.ensure_size(selection.size())?;

    let mut painted = 0;
    for point in selection.points() {
        let base = photo.color_at(point.x, point.y);
        paint.put(point, multiply_blend(base, color));
        painted += 1;
    }
    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tools::{grow_region, PixelPoint, Tolerance};

    #[test]
    fn multiply_blend_tints_without_erasing_shading() {
        assert_eq!(
            multiply_blend(Rgba::opaque(0, 255, 0), Rgba::opaque(0, 0, 255)),
            Rgba::opaque(0, 0, 0)
        );
        assert_eq!(
            multiply_blend(Rgba::opaque(255, 255, 255), Rgba::opaque(220, 238, 243)),
            Rgba::opaque(220, 238, 243)
        );
        assert_eq!(
            multiply_blend(Rgba::opaque(128, 64, 200), Rgba::opaque(255, 128, 0)),
            Rgba::opaque(128, 32, 0)
        );
    }

    #[test]
    fn multiply_blend_keeps_base_alpha_under_opaque_tint() {
        assert_eq!(
            multiply_blend(Rgba::new(255, 255, 255, 90), Rgba::opaque(255, 255, 255)),
            Rgba::new(255, 255, 255, 90)
        );
    }

    #[test]
    fn apply_selection_paints_only_selected_pixels_from_photo_base() {
        let mut photo = PixelSurface::new(2, 1);
        photo
            .write_pixel(0, 0, Rgba::opaque(200, 200, 200))
            .expect("in bounds");
        photo
            .write_pixel(1, 0, Rgba::opaque(10, 10, 10))
            .expect("in bounds");
        let selection =
            grow_region(photo.snapshot(), PixelPoint::new(0, 0), Tolerance::new(5)).expect("seed");
        let mut paint = PixelSurface::new(2, 1);
        paint
            .write_pixel(0, 0, Rgba::opaque(1, 2, 3))
            .expect("in bounds");

        let painted = apply_selection(
            photo.snapshot(),
            &mut paint,
            &selection,
            Rgba::opaque(255, 0, 0),
        )
        .expect("sizes agree");

        assert_eq!(painted, 1);
        assert_eq!(paint.read_pixel(0, 0), Ok(Rgba::opaque(200, 0, 0)));
        assert_eq!(paint.read_pixel(1, 0), Ok(Rgba::TRANSPARENT));
    }

    #[test]
    fn apply_selection_rejects_mismatched_paint_layer() {
        let photo = PixelSurface::new(2, 2);
        let selection =
            grow_region(photo.snapshot(), PixelPoint::new(0, 0), Tolerance::EXACT).expect("seed");
        let mut paint = PixelSurface::new(1, 2);

        assert!(apply_selection(photo.snapshot(), &mut paint, &selection, Rgba::opaque(1, 1, 1))
            .is_err());
        assert!(paint.is_clear());
    }
}
