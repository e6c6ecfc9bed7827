use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "region width/height must be finite and positive (x: {x}, y: {y}, width: {width}, height: {height})"
)]
pub struct InvalidRegionError {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Touching counts as intersecting.
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let reach = self.radius + other.radius;
        dx * dx + dy * dy <= reach * reach
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner and y grows
/// downward, matching the unit world the renderer draws into.
///
/// Stored as extents so that `quarter` hands out children whose shared edges
/// are the exact same float.
///
/// Only the size has to be positive. The origin may be negative, so a viewport
/// can hang over the top-left edge of the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, InvalidRegionError> {
        let err = InvalidRegionError {
            x,
            y,
            width,
            height,
        };
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(err);
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(err);
        }
        let max_x = x + width;
        let max_y = y + height;
        // Width can vanish when added to a huge coordinate.
        if !(max_x > x && max_y > y) {
            return Err(err);
        }
        Ok(Self {
            min_x: x,
            min_y: y,
            max_x,
            max_y,
        })
    }

    pub fn x(&self) -> f32 {
        self.min_x
    }

    pub fn y(&self) -> f32 {
        self.min_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn left(&self) -> f32 {
        self.min_x
    }

    pub fn right(&self) -> f32 {
        self.max_x
    }

    pub fn top(&self) -> f32 {
        self.min_y
    }

    pub fn bottom(&self) -> f32 {
        self.max_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.min_x + (self.max_x - self.min_x) * 0.5,
            self.min_y + (self.max_y - self.min_y) * 0.5,
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn distance_sq_to_point(&self, x: f32, y: f32) -> f32 {
        let dx = if x < self.min_x {
            self.min_x - x
        } else if x > self.max_x {
            x - self.max_x
        } else {
            0.0
        };
        let dy = if y < self.min_y {
            self.min_y - y
        } else if y > self.max_y {
            y - self.max_y
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        self.distance_sq_to_point(circle.x, circle.y) <= circle.radius * circle.radius
    }

    pub fn intersects_region(&self, other: &Region) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Splits into NW, NE, SW, SE.
    pub fn quarter(&self) -> [Region; 4] {
        let (mid_x, mid_y) = self.center();
        [
            Region {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: mid_x,
                max_y: mid_y,
            },
            Region {
                min_x: mid_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: mid_y,
            },
            Region {
                min_x: self.min_x,
                min_y: mid_y,
                max_x: mid_x,
                max_y: self.max_y,
            },
            Region {
                min_x: mid_x,
                min_y: mid_y,
                max_x: self.max_x,
                max_y: self.max_y,
            },
        ]
    }

    pub fn random_point_inside<R: Rng>(&self, margin: f32, rng: &mut R) -> (f32, f32) {
        (
            safe_rand_f32(rng, self.min_x + margin, self.max_x - margin),
            safe_rand_f32(rng, self.min_y + margin, self.max_y - margin),
        )
    }
}

fn safe_rand_f32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min + (max - min) * 0.5;
    }
    rng.gen_range(min..=max)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeEnum {
    Circle(Circle),
    Region(Region),
}

impl ShapeEnum {
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        match self {
            ShapeEnum::Circle(query) => query.intersects_circle(circle),
            ShapeEnum::Region(query) => query.intersects_circle(circle),
        }
    }
}
