// Region tracking helpers

use std::cmp::PartialOrd;
use std::ops::{Add, Sub};

/// A rectangular region
///
/// This is used for window bounds, client areas, cursor clip regions
/// and monitor work areas. It is determined by the corners of a rectangle:
///   r_pos:  the upper left corner's position on the desktop
///   r_size: the distance from the left to the lower right
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[repr(C)]
pub struct Rect<T: PartialOrd + Copy + Add + Add<Output = T>> {
    pub r_pos: (T, T),
    pub r_size: (T, T),
}

impl<T: PartialOrd + Copy + Add + Add<Output = T>> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Rect<T> {
        Rect {
            r_pos: (x, y),
            r_size: (width, height),
        }
    }

    pub fn left(&self) -> T {
        self.r_pos.0
    }

    pub fn top(&self) -> T {
        self.r_pos.1
    }

    pub fn right(&self) -> T {
        self.r_pos.0 + self.r_size.0
    }

    pub fn bottom(&self) -> T {
        self.r_pos.1 + self.r_size.1
    }

    pub fn width(&self) -> T {
        self.r_size.0
    }

    pub fn height(&self) -> T {
        self.r_size.1
    }
}

impl<T: PartialOrd + Copy + Add + Add<Output = T> + Sub<Output = T>> Rect<T> {
    /// Build a rectangle from its edges, the way native APIs (RECT) store it.
    pub fn from_edges(left: T, top: T, right: T, bottom: T) -> Rect<T> {
        Rect {
            r_pos: (left, top),
            r_size: (right - left, bottom - top),
        }
    }

    /// Shrink every edge inward by `(dx, dy)`
    pub fn inset(&self, dx: T, dy: T) -> Rect<T> {
        Rect::from_edges(
            self.left() + dx,
            self.top() + dy,
            self.right() - dx,
            self.bottom() - dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_round_trip_through_size() {
        let r = Rect::from_edges(-10, 20, 30, 60);
        assert_eq!(r.r_pos, (-10, 20));
        assert_eq!(r.r_size, (40, 40));
        assert_eq!(r.right(), 30);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn inset_trims_all_edges() {
        let r = Rect::new(0, 0, 100, 50).inset(8, 4);
        assert_eq!(r, Rect::new(8, 4, 84, 42));
        assert_eq!(r.right(), 92);
        assert_eq!(r.bottom(), 46);
    }
}
