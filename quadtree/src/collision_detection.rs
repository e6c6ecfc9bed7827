use crate::quadtree::RectExtent;
use common::shapes::{Circle, Region, ShapeEnum};

// Extents may carry infinite sides; the comparisons below never subtract an
// infinity, so no NaN can come out of them.

pub(crate) fn extent_circle(extent: &RectExtent, circle: &Circle) -> bool {
    let dx = if circle.x < extent.min_x {
        extent.min_x - circle.x
    } else if circle.x > extent.max_x {
        circle.x - extent.max_x
    } else {
        0.0
    };
    let dy = if circle.y < extent.min_y {
        extent.min_y - circle.y
    } else if circle.y > extent.max_y {
        circle.y - extent.max_y
    } else {
        0.0
    };
    dx * dx + dy * dy <= circle.radius * circle.radius
}

pub(crate) fn extent_region(extent: &RectExtent, region: &Region) -> bool {
    extent.min_x <= region.right()
        && extent.max_x >= region.left()
        && extent.min_y <= region.bottom()
        && extent.max_y >= region.top()
}

pub(crate) fn extent_shape(extent: &RectExtent, shape: &ShapeEnum) -> bool {
    match shape {
        ShapeEnum::Circle(circle) => extent_circle(extent, circle),
        ShapeEnum::Region(region) => extent_region(extent, region),
    }
}
