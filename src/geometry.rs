/// Axis-aligned rectangles on the integer world grid, and the one collision
/// query the whole game is built on.

use glam::Vec2;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// A rectangle whose top-left corner is a continuous position, truncated
    /// onto the grid.
    pub fn at_point(pos: Vec2, w: i32, h: i32) -> Self {
        Rect::new(pos.x as i32, pos.y as i32, w, h)
    }

    /// The full play surface.
    pub const fn play_area() -> Self {
        Rect::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Integer centre, rounded towards the top-left.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn center_vec(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32, cy as f32)
    }

    /// True when the two rectangles share a region of positive area.
    /// Rectangles that merely touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (px, py) = (point.x as i32, point.y as i32);
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Move (never resize) this rectangle so it lies inside `bounds`.
    /// A rectangle larger than `bounds` on an axis is centred on that axis.
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        let y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
        Rect { x, y, ..*self }
    }
}

fn clamp_axis(pos: i32, len: i32, lo: i32, span: i32) -> i32 {
    if len >= span {
        lo + span / 2 - len / 2
    } else if pos < lo {
        lo
    } else if pos + len > lo + span {
        lo + span - len
    } else {
        pos
    }
}

/// True iff `rect` intersects any wall. Always false for an empty wall set.
pub fn collides(rect: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| rect.intersects(wall))
}
