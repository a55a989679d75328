use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Integer pixel coordinate. Ordering is row-major (`y` first, then `x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }

    /// Nearest pixel to a real-valued point (halves round away from zero).
    pub fn from_point(p: &Point2<f64>) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }

    pub fn distance_sq(self, other: Pixel) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Pixel) -> f64 {
        nalgebra::distance(&self.to_point(), &other.to_point())
    }

    /// True when `other` is one of the 8 surrounding pixels.
    pub fn touches(self, other: Pixel) -> bool {
        self != other
            && (i64::from(self.x) - i64::from(other.x)).abs() <= 1
            && (i64::from(self.y) - i64::from(other.y)).abs() <= 1
    }

    pub fn coord(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn with_coord(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
        }
    }
}

impl Ord for Pixel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Pixel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Coordinate axis selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Inclusive pixel bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelBounds {
    pub fn of(pixels: impl IntoIterator<Item = Pixel>) -> Option<Self> {
        let mut iter = pixels.into_iter();
        let first = iter.next()?;
        let mut b = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    pub fn origin(&self) -> Pixel {
        Pixel::new(self.min_x, self.min_y)
    }

    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
