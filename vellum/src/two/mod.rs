mod atlas;
mod image;
mod shadow;
mod tint;

use glam::IVec2;
use serde::{Deserialize, Serialize};

pub use atlas::*;
pub use image::*;
pub use shadow::*;
pub use tint::*;

/// Integer pixel rectangle. Widgets position and hit-test in whole pixels.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct IRect {
    pub position: IVec2,
    pub size: IVec2,
}

impl IRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        IRect {
            position: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }
    pub fn from_position_size(position: IVec2, size: IVec2) -> Self {
        IRect { position, size }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }
    pub fn y(&self) -> i32 {
        self.position.y
    }
    pub fn width(&self) -> i32 {
        self.size.x
    }
    pub fn height(&self) -> i32 {
        self.size.y
    }
    /// One past the last column.
    pub fn right(&self) -> i32 {
        self.position.x + self.size.x
    }
    /// One past the last row.
    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.y
    }
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    pub fn contains(&self, point: IVec2) -> bool {
        self.position.x <= point.x
            && self.position.y <= point.y
            && self.right() > point.x
            && self.bottom() > point.y
    }

    pub fn intersect(&self, other: IRect) -> IRect {
        let min = self.position.max(other.position);
        let max = IVec2::new(self.right(), self.bottom())
            .min(IVec2::new(other.right(), other.bottom()));
        if max.x <= min.x || max.y <= min.y {
            IRect::from_position_size(min, IVec2::ZERO)
        } else {
            IRect::from_position_size(min, max - min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = IRect::new(10, 20, 30, 40);
        assert!(rect.contains(IVec2::new(10, 20)));
        assert!(rect.contains(IVec2::new(39, 59)));
        assert!(!rect.contains(IVec2::new(40, 20)));
        assert!(!rect.contains(IVec2::new(10, 60)));
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
    }

    #[test]
    fn intersect_clips_and_handles_disjoint() {
        let a = IRect::new(0, 0, 10, 10);
        assert_eq!(
            a.intersect(IRect::new(5, -5, 10, 10)),
            IRect::new(5, 0, 5, 5)
        );
        assert!(a.intersect(IRect::new(20, 20, 5, 5)).is_empty());
    }
}
