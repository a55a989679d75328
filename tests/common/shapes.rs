//! Synthetic line drawings used by the integration tests.
use pixel_graph::{Pixel, PixelGrid};
use std::sync::Arc;

/// Axis-aligned cross centred in a square grid with `pad` background pixels
/// on every side. Arms reach `arm` pixels from the centre and are `width`
/// pixels thick (odd widths stay symmetric).
pub fn plus(arm: usize, width: usize, pad: usize) -> Arc<PixelGrid> {
    assert!(width % 2 == 1, "plus width must be odd");
    let size = 2 * (arm + pad) + 1;
    let c = (size / 2) as i64;
    let (arm, half) = (arm as i64, (width / 2) as i64);
    let grid = PixelGrid::from_fn(size, size, |x, y| {
        let (dx, dy) = ((x as i64 - c).abs(), (y as i64 - c).abs());
        (dx <= half && dy <= arm) || (dy <= half && dx <= arm)
    })
    .expect("non-empty grid");
    Arc::new(grid)
}

/// Filled disc ring: pixels whose squared distance from the centre of a
/// `size`x`size` grid lies in `[inner^2, outer^2]`.
pub fn annulus(size: usize, inner: i64, outer: i64) -> Arc<PixelGrid> {
    let c = (size / 2) as i64;
    let grid = PixelGrid::from_fn(size, size, |x, y| {
        let d2 = (x as i64 - c).pow(2) + (y as i64 - c).pow(2);
        (inner * inner..=outer * outer).contains(&d2)
    })
    .expect("non-empty grid");
    Arc::new(grid)
}

/// Midpoint circle, one pixel thick and 8-connected, in row-major order.
pub fn circle(cx: i32, cy: i32, r: i32) -> Vec<Pixel> {
    let mut out = Vec::new();
    let (mut x, mut y, mut err) = (r, 0, 1 - r);
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            out.push(Pixel::new(cx + dx, cy + dy));
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// Concentric one-pixel circles around the centre of a `size`x`size` grid.
pub fn concentric(size: usize, radii: &[i32]) -> (Arc<PixelGrid>, Vec<Vec<Pixel>>) {
    let c = (size / 2) as i32;
    let circles: Vec<Vec<Pixel>> = radii.iter().map(|&r| circle(c, c, r)).collect();
    let grid = PixelGrid::from_pixels(size, size, Pixel::new(0, 0), circles.iter().flatten().copied())
        .expect("circles fit the grid");
    (Arc::new(grid), circles)
}

pub fn ascii(rows: &[&str]) -> Arc<PixelGrid> {
    Arc::new(PixelGrid::from_ascii(rows).expect("valid picture"))
}
