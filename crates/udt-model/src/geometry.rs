//! Geometry primitives and connector endpoint computation.
//!
//! The endpoint algorithm reproduces the historical canvas renderer:
//! a connector end attaches where the segment from the shape's center
//! toward its aim point crosses the shape's bounding box. The box is
//! centered on `position + size / 2` with integer halves, and crossing
//! coordinates are rounded half to even. Serialized endpoint values
//! depend on this exact arithmetic, so everything here stays in
//! integer rationals rather than floats.

/// A point on the diagram canvas.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct UmlPosition {
    pub x: i32,
    pub y: i32,
}

impl UmlPosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a shape.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct UmlDimensions {
    pub width: i32,
    pub height: i32,
}

impl UmlDimensions {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Offset of an association label relative to its link.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DeltaXy {
    pub delta_x: i32,
    pub delta_y: i32,
}

/// The two attachment points of a connector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EndPoints {
    pub from_position: UmlPosition,
    pub to_position: UmlPosition,
}

/// Axis-aligned footprint of a shape, as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRect {
    pub position: UmlPosition,
    pub size: UmlDimensions,
}

impl ShapeRect {
    #[must_use]
    pub const fn new(position: UmlPosition, size: UmlDimensions) -> Self {
        Self { position, size }
    }

    /// Center of the shape, with integer halves.
    #[must_use]
    pub const fn center(&self) -> UmlPosition {
        UmlPosition::new(
            self.position.x + self.size.width / 2,
            self.position.y + self.size.height / 2,
        )
    }
}

/// Compute fresh endpoints for a connector between two shapes.
///
/// Each end aims at the adjacent interior control point when any exist,
/// otherwise at the peer shape's center.
#[must_use]
pub fn line_end_points(
    source: ShapeRect,
    destination: ShapeRect,
    interior: &[UmlPosition],
) -> EndPoints {
    let from_target = interior
        .first()
        .copied()
        .unwrap_or_else(|| destination.center());
    let to_target = interior.last().copied().unwrap_or_else(|| source.center());

    EndPoints {
        from_position: perimeter_point(source, from_target),
        to_position: perimeter_point(destination, to_target),
    }
}

/// Fraction along the center-to-target segment, `0 < num/den <= 1`.
#[derive(Clone, Copy)]
struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    const ONE: Self = Self { num: 1, den: 1 };

    fn less_than(self, other: Self) -> bool {
        // both denominators positive
        self.num * other.den < other.num * self.den
    }
}

/// Point where the segment from `rect`'s center to `target` leaves the
/// shape's bounding box. Falls back to `target` if the segment never
/// crosses the box (the target lies inside it).
#[must_use]
pub fn perimeter_point(rect: ShapeRect, target: UmlPosition) -> UmlPosition {
    let center = rect.center();
    let dx = i64::from(target.x) - i64::from(center.x);
    let dy = i64::from(target.y) - i64::from(center.y);
    let half_width = i64::from(rect.size.width / 2);
    let half_height = i64::from(rect.size.height / 2);

    let mut best = Ratio::ONE;

    // Vertical edges at center.x ± half_width.
    if dx != 0 {
        for offset in [-half_width, half_width] {
            let ratio = normalized(offset, dx);
            let within_span = (ratio.num * dy).abs() <= half_height * ratio.den;
            if ratio.num > 0 && ratio.num < ratio.den && within_span && ratio.less_than(best) {
                best = ratio;
            }
        }
    }
    // Horizontal edges at center.y ± half_height.
    if dy != 0 {
        for offset in [-half_height, half_height] {
            let ratio = normalized(offset, dy);
            let within_span = (ratio.num * dx).abs() <= half_width * ratio.den;
            if ratio.num > 0 && ratio.num < ratio.den && within_span && ratio.less_than(best) {
                best = ratio;
            }
        }
    }

    UmlPosition::new(
        round_rational(i64::from(center.x) * best.den + best.num * dx, best.den),
        round_rational(i64::from(center.y) * best.den + best.num * dy, best.den),
    )
}

/// Build `offset / delta` with a positive denominator.
fn normalized(offset: i64, delta: i64) -> Ratio {
    if delta < 0 {
        Ratio {
            num: -offset,
            den: -delta,
        }
    } else {
        Ratio {
            num: offset,
            den: delta,
        }
    }
}

/// Round `num / den` (with `den > 0`) half to even.
fn round_rational(num: i64, den: i64) -> i32 {
    let quotient = num.div_euclid(den);
    let remainder = num.rem_euclid(den);
    let rounded = match (2 * remainder).cmp(&den) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => {
            if quotient % 2 == 0 {
                quotient
            } else {
                quotient + 1
            }
        }
    };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_rect(x: i32, y: i32) -> ShapeRect {
        ShapeRect::new(UmlPosition::new(x, y), UmlDimensions::new(150, 75))
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_rational(387, 2), 194); // 193.5
        assert_eq!(round_rational(513, 2), 256); // 256.5
        assert_eq!(round_rational(599, 2), 300); // 299.5
        assert_eq!(round_rational(349, 2), 174); // 174.5
        assert_eq!(round_rational(-3, 2), -2); // -1.5
        assert_eq!(round_rational(925, 63), 15); // 14.68...
    }

    #[test]
    fn endpoints_aim_at_peer_centers_without_interior_points() {
        let end_points = line_end_points(class_rect(100, 100), class_rect(200, 300), &[]);

        assert_eq!(end_points.from_position, UmlPosition::new(194, 174));
        assert_eq!(end_points.to_position, UmlPosition::new(256, 300));
    }

    #[test]
    fn endpoints_aim_at_adjacent_interior_points() {
        let interior = [UmlPosition::new(100, 100), UmlPosition::new(200, 200)];
        let end_points = line_end_points(class_rect(200, 300), class_rect(100, 100), &interior);

        assert_eq!(end_points.from_position, UmlPosition::new(248, 300));
        assert_eq!(end_points.to_position, UmlPosition::new(190, 174));
    }

    #[test]
    fn vertical_connector_attaches_to_facing_edges() {
        let note = ShapeRect::new(UmlPosition::new(300, 200), UmlDimensions::new(150, 50));
        let class = class_rect(300, 100);
        let end_points = line_end_points(note, class, &[]);

        assert_eq!(end_points.from_position, UmlPosition::new(375, 200));
        assert_eq!(end_points.to_position, UmlPosition::new(375, 174));
    }

    #[test]
    fn distant_interior_point_still_attaches_on_the_box() {
        let implementor = class_rect(4444, 4444);
        let interface = class_rect(3333, 3333);
        let interior = [UmlPosition::new(372, 433), UmlPosition::new(400, 433)];
        let end_points = line_end_points(implementor, interface, &interior);

        assert_eq!(end_points.from_position, UmlPosition::new(4481, 4444));
        assert_eq!(end_points.to_position, UmlPosition::new(3370, 3333));
    }

    #[test]
    fn target_inside_box_returns_target() {
        let rect = class_rect(100, 100);
        let inside = UmlPosition::new(120, 120);
        assert_eq!(perimeter_point(rect, inside), inside);
    }
}
