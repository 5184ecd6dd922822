use std::collections::VecDeque;

use super::{PixelPoint, Rgba};
use crate::geometry::SurfaceSize;
use crate::surface::{PixelSnapshot, SurfaceError, SurfaceResult};

/// Upper bound past which every channel delta matches.
pub const MAX_TOLERANCE: u16 = 256;

/// Bound on the per-channel distance between the seed and a candidate color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tolerance(u16);

impl Tolerance {
    pub const EXACT: Self = Self(0);

    pub const fn new(value: u16) -> Self {
        if value > MAX_TOLERANCE {
            Self(MAX_TOLERANCE)
        } else {
            Self(value)
        }
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Per-channel policy: each of R, G, B and A must differ by strictly less
    /// than the tolerance. Identical channels always match, so a tolerance of
    /// zero selects exact matches only.
    pub fn matches(self, seed: Rgba, candidate: Rgba) -> bool {
        seed.channels()
            .into_iter()
            .zip(candidate.channels())
            .all(|(a, b)| {
                let delta = u16::from(a.abs_diff(b));
                delta == 0 || delta < self.0
            })
    }
}

impl From<u16> for Tolerance {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

/// Pixels chosen by one wand click, stored as a mask sized to the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    size: SurfaceSize,
    mask: Vec<bool>,
    count: usize,
}

impl SelectionMask {
    pub fn empty(size: SurfaceSize) -> Self {
        Self {
            size,
            mask: vec![false; size.pixel_count()],
            count: 0,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        self.size.contains(point.x, point.y)
            && self.mask[point.y as usize * self.size.width as usize + point.x as usize]
    }

    fn insert(&mut self, index: usize) {
        if !self.mask[index] {
            self.mask[index] = true;
            self.count += 1;
        }
    }

    /// Selected coordinates in row-major order.
    pub fn points(&self) -> impl Iterator<Item = PixelPoint> + '_ {
        let width = self.size.width.max(1) as usize;
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(move |(index, _)| PixelPoint::new((index % width) as u32, (index / width) as u32))
    }

    pub fn is_subset_of(&self, other: &SelectionMask) -> bool {
        self.size == other.size
            && self
                .mask
                .iter()
                .zip(&other.mask)
                .all(|(mine, theirs)| !*mine || *theirs)
    }
}

/// Grows a 4-connected region from `seed`, comparing every candidate against
/// the seed's own color.
pub fn grow_region(
    photo: PixelSnapshot<'_>,
    seed: PixelPoint,
    tolerance: Tolerance,
) -> SurfaceResult<SelectionMask> {
    let size = photo.size();
    if !size.contains(seed.x, seed.y) {
        return Err(SurfaceError::OutOfBounds {
            x: i64::from(seed.x),
            y: i64::from(seed.y),
            width: size.width,
            height: size.height,
        });
    }

    let seed_color = photo.color_at(seed.x, seed.y);
    let mut selection = SelectionMask::empty(size);
    let mut visited = vec![0_u8; size.pixel_count()];
    let mut queue = VecDeque::new();

    visited[photo.index(seed.x, seed.y)] = 1;
    queue.push_back(seed);

    while let Some(PixelPoint { x, y }) = queue.pop_front() {
        selection.insert(photo.index(x, y));

        let neighbors = [
            x.checked_add(1).map(|nx| (nx, y)),
            x.checked_sub(1).map(|nx| (nx, y)),
            y.checked_add(1).map(|ny| (x, ny)),
            y.checked_sub(1).map(|ny| (x, ny)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            if !size.contains(nx, ny) {
                continue;
            }
            let index = photo.index(nx, ny);
            if visited[index] != 0 {
                continue;
            }
            // Marked before matching so rejected pixels are never retested.
            visited[index] = 1;
            if tolerance.matches(seed_color, photo.color_at(nx, ny)) {
                queue.push_back(PixelPoint::new(nx, ny));
            }
        }
    }

    tracing::trace!(
        seed_x = seed.x,
        seed_y = seed.y,
        tolerance = tolerance.value(),
        selected = selection.len(),
        "region grown"
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    fn surface_from(width: u32, height: u32, pixels: &[Rgba]) -> PixelSurface {
        let bytes = pixels.iter().flat_map(|color| color.channels()).collect();
        PixelSurface::from_raw(width, height, bytes).expect("pixel count matches size")
    }

    fn gradient(width: u32) -> PixelSurface {
        let pixels = (0..width)
            .map(|x| {
                let level = (x * 7).min(255) as u8;
                Rgba::opaque(level, level, level)
            })
            .collect::<Vec<_>>();
        surface_from(width, 1, &pixels)
    }

    fn checkerboard(size: u32) -> PixelSurface {
        let pixels = (0..size * size)
            .map(|index| {
                if (index % size + index / size) % 2 == 0 {
                    WHITE
                } else {
                    BLACK
                }
            })
            .collect::<Vec<_>>();
        surface_from(size, size, &pixels)
    }

    #[test]
    fn tolerance_comparison_is_strict_per_channel() {
        let seed = Rgba::opaque(100, 100, 100);
        assert!(Tolerance::new(11).matches(seed, Rgba::opaque(110, 90, 100)));
        assert!(!Tolerance::new(10).matches(seed, Rgba::opaque(110, 100, 100)));
        assert!(!Tolerance::new(10).matches(seed, Rgba::new(100, 100, 100, 200)));
    }

    #[test]
    fn zero_tolerance_matches_only_identical_colors() {
        assert!(Tolerance::EXACT.matches(RED, RED));
        assert!(!Tolerance::EXACT.matches(RED, Rgba::opaque(254, 0, 0)));
    }

    #[test]
    fn tolerance_is_clamped_to_maximum() {
        assert_eq!(Tolerance::new(9_000).value(), MAX_TOLERANCE);
        assert!(Tolerance::new(MAX_TOLERANCE).matches(BLACK, Rgba::TRANSPARENT));
    }

    #[test]
    fn grow_region_selects_uniform_image_entirely_even_at_zero_tolerance() {
        let photo = surface_from(4, 4, &[WHITE; 16]);
        let selection =
            grow_region(photo.snapshot(), PixelPoint::new(2, 3), Tolerance::EXACT).expect("seed");
        assert_eq!(selection.len(), 16);
    }

    #[test]
    fn grow_region_does_not_bleed_diagonally_on_checkerboard() {
        let photo = checkerboard(5);
        let seed = PixelPoint::new(2, 2);
        let selection = grow_region(photo.snapshot(), seed, Tolerance::EXACT).expect("seed");
        assert_eq!(selection.points().collect::<Vec<_>>(), vec![seed]);
    }

    #[test]
    fn grow_region_excludes_pixels_far_from_seed_color() {
        let photo = surface_from(2, 2, &[RED, GREEN, GREEN, GREEN]);
        let selection =
            grow_region(photo.snapshot(), PixelPoint::new(1, 0), Tolerance::new(5)).expect("seed");
        assert_eq!(
            selection.points().collect::<Vec<_>>(),
            vec![
                PixelPoint::new(1, 0),
                PixelPoint::new(0, 1),
                PixelPoint::new(1, 1)
            ]
        );
        assert!(!selection.contains(PixelPoint::new(0, 0)));
    }

    #[test]
    fn grow_region_compares_against_seed_rather_than_neighbor() {
        // Each step differs by 7 from its neighbor, so a chained comparison
        // would walk the whole strip.
        let photo = gradient(20);
        let selection =
            grow_region(photo.snapshot(), PixelPoint::new(0, 0), Tolerance::new(15)).expect("seed");
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn grow_region_is_monotonic_in_tolerance() {
        let photo = gradient(40);
        let seed = PixelPoint::new(17, 0);
        let mut previous: Option<SelectionMask> = None;
        for tolerance in [0, 1, 5, 8, 20, 60, 120, 256] {
            let selection =
                grow_region(photo.snapshot(), seed, Tolerance::new(tolerance)).expect("seed");
            assert!(selection.contains(seed));
            if let Some(smaller) = &previous {
                assert!(smaller.is_subset_of(&selection), "tolerance {tolerance}");
            }
            previous = Some(selection);
        }
    }

    #[test]
    fn grow_region_never_leaves_surface_bounds() {
        let photo = checkerboard(6);
        for tolerance in [0, 256] {
            let selection =
                grow_region(photo.snapshot(), PixelPoint::new(5, 5), Tolerance::new(tolerance))
                    .expect("seed");
            assert!(selection.points().all(|point| point.x < 6 && point.y < 6));
        }
    }

    #[test]
    fn grow_region_rejects_seed_outside_surface() {
        let photo = PixelSurface::new(3, 3);
        let error = grow_region(photo.snapshot(), PixelPoint::new(3, 1), Tolerance::new(10))
            .unwrap_err();
        assert!(matches!(error, SurfaceError::OutOfBounds { x: 3, y: 1, .. }));
    }
}
