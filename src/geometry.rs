/// Geometry primitives for the simulation: world-space rectangles and
/// direction-aware intersection.
///
/// Collision resolution is axis-separated: the caller reports which directions
/// the mover travelled this tick, and `intersect` computes the push-out
/// distance along those axes only. When both axes produce a correction, the
/// one with the larger magnitude survives and the other is zeroed, with
/// vertical winning an exact tie.

/// Axis-aligned rectangle in world units. Edges are stored directly rather
/// than as position + size because the collision math reads all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from a top-left corner and a size.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(x, y, x + width, y + height)
    }

    /// Returns a copy shifted vertically by `dy`.
    pub fn offset_y(&self, dy: f32) -> Self {
        Rect::new(self.left, self.top + dy, self.right, self.bottom + dy)
    }
}

/// Set of directions an actor moved in during one tick.
///
/// LEFT/RIGHT come from horizontal input, UP/DOWN from the sign of the
/// vertical velocity, so UP and DOWN are never both set (same for LEFT and
/// RIGHT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement(u8);

impl Movement {
    pub const NONE: Movement = Movement(0);
    pub const LEFT: Movement = Movement(0x1);
    pub const RIGHT: Movement = Movement(0x2);
    pub const UP: Movement = Movement(0x4);
    pub const DOWN: Movement = Movement(0x8);

    pub fn has_left(self) -> bool {
        self.0 & Self::LEFT.0 != 0
    }

    pub fn has_right(self) -> bool {
        self.0 & Self::RIGHT.0 != 0
    }

    pub fn has_up(self) -> bool {
        self.0 & Self::UP.0 != 0
    }

    pub fn has_down(self) -> bool {
        self.0 & Self::DOWN.0 != 0
    }
}

impl std::ops::BitOr for Movement {
    type Output = Movement;

    fn bitor(self, rhs: Movement) -> Movement {
        Movement(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Movement {
    fn bitor_assign(&mut self, rhs: Movement) {
        self.0 |= rhs.0;
    }
}

/// Push-out distances for an overlapping pair of rectangles. At most one of
/// the two fields is nonzero; adding them to the mover's position separates
/// the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub vertical: f32,
    pub horizontal: f32,
}

/// Tests `mover` against `obstacle` and, if they overlap, computes the
/// directional adjustment that pushes the mover out.
///
/// The overlap test is open-interval: rectangles that merely share an edge do
/// not collide. Adjustments are only computed along axes present in
/// `movement`; an overlap with no movement on either axis yields a contact
/// with both fields zero.
pub fn intersect(mover: &Rect, obstacle: &Rect, movement: Movement) -> Option<Contact> {
    if mover.right <= obstacle.left
        || mover.left >= obstacle.right
        || mover.bottom <= obstacle.top
        || mover.top >= obstacle.bottom
    {
        return None;
    }

    let mut vertical = 0.0;
    let mut has_vertical = false;

    if movement.has_down() {
        vertical = obstacle.top - mover.bottom;
        has_vertical = true;
    } else if movement.has_up() {
        vertical = obstacle.bottom - mover.top;
        has_vertical = true;
    }

    let mut horizontal = 0.0;
    let mut has_horizontal = false;

    if movement.has_left() {
        horizontal = obstacle.right - mover.left;
        has_horizontal = true;
    } else if movement.has_right() {
        horizontal = obstacle.left - mover.right;
        has_horizontal = true;
    }

    // Both axes corrected: keep the larger magnitude, vertical wins ties.
    if has_vertical && has_horizontal {
        if horizontal.abs() > vertical.abs() {
            vertical = 0.0;
        } else {
            horizontal = 0.0;
        }
    }

    Some(Contact {
        vertical,
        horizontal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_rects_never_intersect() {
        let mover = Rect::from_size(0.0, 0.0, 10.0, 10.0);
        let all_masks = [
            Movement::NONE,
            Movement::LEFT,
            Movement::RIGHT | Movement::DOWN,
            Movement::LEFT | Movement::UP,
        ];

        // One rectangle fully beyond each of the four disjointness conditions.
        let separated = [
            Rect::from_size(20.0, 0.0, 10.0, 10.0),  // to the right
            Rect::from_size(-20.0, 0.0, 10.0, 10.0), // to the left
            Rect::from_size(0.0, 20.0, 10.0, 10.0),  // below
            Rect::from_size(0.0, -20.0, 10.0, 10.0), // above
        ];

        for obstacle in &separated {
            for mask in all_masks {
                assert!(intersect(&mover, obstacle, mask).is_none());
            }
        }
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let mover = Rect::from_size(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::from_size(10.0, 0.0, 10.0, 10.0);

        assert!(intersect(&mover, &touching, Movement::RIGHT).is_none());
    }

    #[test]
    fn test_downward_adjustment_pushes_out_of_floor() {
        // Mover's bottom penetrates 2 units into the obstacle.
        let mover = Rect::from_size(0.0, 0.0, 10.0, 10.0);
        let floor = Rect::from_size(0.0, 8.0, 10.0, 10.0);

        let contact = intersect(&mover, &floor, Movement::DOWN).unwrap();
        assert_eq!(contact.vertical, -2.0);
        assert_eq!(contact.horizontal, 0.0);
    }

    #[test]
    fn test_upward_adjustment_pushes_out_of_ceiling() {
        let mover = Rect::from_size(0.0, 8.0, 10.0, 10.0);
        let ceiling = Rect::from_size(0.0, 0.0, 10.0, 10.0);

        let contact = intersect(&mover, &ceiling, Movement::UP).unwrap();
        assert_eq!(contact.vertical, 2.0);
        assert_eq!(contact.horizontal, 0.0);
    }

    #[test]
    fn test_horizontal_adjustments() {
        let mover = Rect::from_size(8.0, 0.0, 10.0, 10.0);
        let wall = Rect::from_size(10.0, 0.0, 10.0, 10.0);

        let contact = intersect(&mover, &wall, Movement::RIGHT).unwrap();
        assert_eq!(contact.horizontal, -8.0);

        let mover = Rect::from_size(12.0, 0.0, 10.0, 10.0);
        let contact = intersect(&mover, &wall, Movement::LEFT).unwrap();
        assert_eq!(contact.horizontal, 8.0);
    }

    #[test]
    fn test_overlap_without_movement_yields_zero_contact() {
        let mover = Rect::from_size(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::from_size(5.0, 5.0, 10.0, 10.0);

        let contact = intersect(&mover, &obstacle, Movement::NONE).unwrap();
        assert_eq!(contact.vertical, 0.0);
        assert_eq!(contact.horizontal, 0.0);
    }

    #[test]
    fn test_both_axes_keep_larger_magnitude() {
        // Moving down-right into a corner: 2 units of vertical penetration,
        // 6 units of horizontal. Horizontal is larger and survives.
        let mover = Rect::from_size(4.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::from_size(8.0, 8.0, 10.0, 10.0);

        let contact = intersect(&mover, &obstacle, Movement::RIGHT | Movement::DOWN).unwrap();
        assert_eq!(contact.vertical, 0.0);
        assert_eq!(contact.horizontal, -6.0);

        // Deeper horizontally than vertically: vertical survives.
        let mover = Rect::from_size(7.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::from_size(8.0, 2.0, 10.0, 10.0);

        let contact = intersect(&mover, &obstacle, Movement::RIGHT | Movement::DOWN).unwrap();
        assert_eq!(contact.vertical, -8.0);
        assert_eq!(contact.horizontal, 0.0);
    }

    #[test]
    fn test_equal_magnitudes_resolve_to_vertical() {
        // 5 units of penetration on each axis.
        let mover = Rect::from_size(5.0, 5.0, 10.0, 10.0);
        let obstacle = Rect::from_size(10.0, 10.0, 10.0, 10.0);

        let contact = intersect(&mover, &obstacle, Movement::RIGHT | Movement::DOWN).unwrap();
        assert_eq!(contact.vertical, -5.0);
        assert_eq!(contact.horizontal, 0.0);
    }

    #[test]
    fn test_movement_flags() {
        let mut movement = Movement::NONE;
        assert!(!movement.has_left());

        movement |= Movement::LEFT;
        movement |= Movement::DOWN;
        assert!(movement.has_left());
        assert!(movement.has_down());
        assert!(!movement.has_right());
        assert!(!movement.has_up());
    }
}
