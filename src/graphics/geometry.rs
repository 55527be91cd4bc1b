//! Integer geometry shared by the surface and the primitives.

/// 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 2D extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub corner: Point,
    pub extent: Extent,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            corner: Point::new(x, y),
            extent: Extent::new(width, height),
        }
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn x2(&self) -> i32 {
        self.corner.x.saturating_add(self.extent.width)
    }

    pub fn y2(&self) -> i32 {
        self.corner.y.saturating_add(self.extent.height)
    }

    pub fn is_empty(&self) -> bool {
        self.extent.width <= 0 || self.extent.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.corner.x && x < self.x2() && y >= self.corner.y && y < self.y2()
    }

    /// Overlap of two rectangles; empty (zero extent) when they do not meet.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.corner.x.max(other.corner.x);
        let y1 = self.corner.y.max(other.corner.y);
        let x2 = self.x2().min(other.x2());
        let y2 = self.y2().min(other.y2());
        if x2 <= x1 || y2 <= y1 {
            return Rect::new(x1, y1, 0, 0);
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// Source-to-destination copy descriptor.
///
/// `dst` is where the top-left of `src` lands on the destination surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clip {
    pub dst: Point,
    pub src: Rect,
}

impl Clip {
    pub const fn new(dst_x: i32, dst_y: i32, src_x: i32, src_y: i32, w: i32, h: i32) -> Self {
        Self {
            dst: Point::new(dst_x, dst_y),
            src: Rect::new(src_x, src_y, w, h),
        }
    }

    /// Shrink the clip so both rectangles fit their surfaces.
    ///
    /// Returns `false` if nothing is left to copy.
    pub fn clip(&mut self, dst_extent: Extent, src_extent: Extent) -> bool {
        // Widened so origins near the i32 limits can be pulled in safely.
        let (mut dx, mut dy) = (self.dst.x as i64, self.dst.y as i64);
        let (mut sx, mut sy) = (self.src.corner.x as i64, self.src.corner.y as i64);
        let (mut w, mut h) = (self.src.extent.width as i64, self.src.extent.height as i64);

        // Negative source origin pushes the destination along with it.
        if sx < 0 {
            w += sx;
            dx -= sx;
            sx = 0;
        }
        if sy < 0 {
            h += sy;
            dy -= sy;
            sy = 0;
        }
        if dx < 0 {
            w += dx;
            sx -= dx;
            dx = 0;
        }
        if dy < 0 {
            h += dy;
            sy -= dy;
            dy = 0;
        }

        w = w.min(src_extent.width as i64 - sx).min(dst_extent.width as i64 - dx);
        h = h.min(src_extent.height as i64 - sy).min(dst_extent.height as i64 - dy);

        *self = Clip::new(
            narrow(dx),
            narrow(dy),
            narrow(sx),
            narrow(sy),
            narrow(w),
            narrow(h),
        );
        w > 0 && h > 0
    }
}

fn narrow(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -3, 10, 5);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 2));
        assert!(a.intersect(&Rect::new(20, 20, 3, 3)).is_empty());
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(1, 1, 2, 2);
        assert!(r.contains(1, 1));
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(0, 1));
    }

    #[test]
    fn test_clip_inside() {
        let mut clip = Clip::new(2, 2, 0, 0, 4, 4);
        assert!(clip.clip(Extent::new(10, 10), Extent::new(4, 4)));
        assert_eq!(clip, Clip::new(2, 2, 0, 0, 4, 4));
    }

    #[test]
    fn test_clip_negative_source() {
        let mut clip = Clip::new(0, 0, -2, -1, 4, 4);
        assert!(clip.clip(Extent::new(4, 4), Extent::new(8, 8)));
        assert_eq!(clip, Clip::new(2, 1, 0, 0, 2, 3));
    }

    #[test]
    fn test_clip_negative_destination() {
        let mut clip = Clip::new(-3, 0, 0, 0, 5, 5);
        assert!(clip.clip(Extent::new(10, 10), Extent::new(5, 5)));
        assert_eq!(clip, Clip::new(0, 0, 3, 0, 2, 5));
    }

    #[test]
    fn test_clip_overflowing_destination() {
        let mut clip = Clip::new(8, 8, 0, 0, 5, 5);
        assert!(clip.clip(Extent::new(10, 10), Extent::new(5, 5)));
        assert_eq!(clip.src.extent, Extent::new(2, 2));
    }

    #[test]
    fn test_clip_entirely_outside() {
        let mut clip = Clip::new(20, 0, 0, 0, 5, 5);
        assert!(!clip.clip(Extent::new(10, 10), Extent::new(5, 5)));

        let mut clip = Clip::new(0, 0, 9, 9, 5, 5);
        assert!(!clip.clip(Extent::new(10, 10), Extent::new(5, 5)));
    }

    #[test]
    fn test_rect_edges_saturate() {
        let r = Rect::new(i32::MAX - 1, i32::MIN, 10, i32::MAX);
        assert_eq!(r.x2(), i32::MAX);
        assert_eq!(r.y2(), -1);
        assert!(r.contains(i32::MAX - 1, -2));
        assert!(Rect::new(i32::MAX, 0, 10, 10).intersect(&Rect::new(0, 0, 4, 4)).is_empty());
        assert_eq!(
            Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).intersect(&Rect::new(-4, -4, 8, 8)),
            Rect::new(-4, -4, 3, 3)
        );
    }

    #[test]
    fn test_clip_extreme_origins() {
        let mut clip = Clip::new(i32::MAX, 0, i32::MIN, 0, 5, 5);
        assert!(!clip.clip(Extent::new(10, 10), Extent::new(5, 5)));

        let mut clip = Clip::new(i32::MIN, i32::MIN, 0, 0, i32::MAX, i32::MAX);
        assert!(!clip.clip(Extent::new(10, 10), Extent::new(5, 5)));

        // Oversized extent is trimmed to both surfaces.
        let mut clip = Clip::new(3, 0, -2, 0, i32::MAX, 2);
        assert!(clip.clip(Extent::new(10, 10), Extent::new(5, 5)));
        assert_eq!(clip, Clip::new(5, 0, 0, 0, 5, 2));
    }
}
