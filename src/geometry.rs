use std::ops;

use cgmath::Vector2;

// World units are the physics engine's, with y pointing up.
pub type Vec2 = Vector2<f32>;

#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vector2::new(x, y)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// An axis-aligned box. (x, y) is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Rect {
        Rect {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    // Touching edges count, the same way sprite overlap checks do.
    pub fn intersects(&self, other: Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.top() < other.bottom()
            || self.bottom() > other.top())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    // Clamps a point into this box.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        vec2(
            point.x.max(self.left()).min(self.right()),
            point.y.max(self.bottom()).min(self.top()),
        )
    }
}

impl ops::Add<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, rhs: Vec2) -> Self::Output {
        Rect {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_getters() {
        let r = Rect {
            x: 10.0,
            y: 20.0,
            w: 3.0,
            h: 4.0,
        };
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.bottom(), 20.0);
        assert_eq!(r.right(), 13.0);
        assert_eq!(r.top(), 24.0);
        assert_eq!(r.center(), vec2(11.5, 22.0));
    }

    #[test]
    fn rect_from_center() {
        let r = Rect::from_center(vec2(100.0, 50.0), 20.0, 10.0);
        assert_eq!(r.x, 90.0);
        assert_eq!(r.y, 45.0);
        assert_eq!(r.center(), vec2(100.0, 50.0));
    }

    #[test]
    fn rect_add_point() {
        let r = Rect {
            x: 10.0,
            y: 20.0,
            w: 3.0,
            h: 4.0,
        };
        let r = r + vec2(100.0, 200.0);
        assert_eq!(r.x, 110.0);
        assert_eq!(r.y, 220.0);
        assert_eq!(r.w, 3.0);
        assert_eq!(r.h, 4.0);
    }

    #[test]
    fn rect_intersections() {
        let a = Rect {
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 10.0,
        };
        let overlapping = a + vec2(5.0, 5.0);
        let touching = a + vec2(10.0, 0.0);
        let apart = a + vec2(10.5, 0.0);
        assert!(a.intersects(overlapping));
        assert!(a.intersects(touching));
        assert!(!a.intersects(apart));
        assert!(!apart.intersects(a));
    }

    #[test]
    fn rect_clamp() {
        let r = Rect::from_center(vec2(0.0, 0.0), 200.0, 150.0);
        assert_eq!(r.clamp(vec2(0.0, 0.0)), vec2(0.0, 0.0));
        assert_eq!(r.clamp(vec2(500.0, -500.0)), vec2(100.0, -75.0));
        assert!(r.contains(vec2(100.0, 75.0)));
        assert!(!r.contains(vec2(100.1, 75.0)));
    }

    #[test]
    fn lerp_math() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(10.0, 10.0, 0.22), 10.0);
    }
}
