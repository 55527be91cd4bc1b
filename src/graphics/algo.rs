//! Format-agnostic curve stepping
//!
//! These routines know nothing about surfaces. They walk a curve in integer
//! steps and report each pixel (or each horizontal span, for fills) to a
//! caller-supplied closure. Coordinates passed to the closure are not clipped.
//!
//! The `_clipped` variants take the target bounds and only do the work that
//! can land inside them, so a shape millions of pixels across costs no more
//! than the visible part. They may still report points outside `bounds`.

use crate::graphics::geometry::Rect;

/// Boxes up to this size on both axes are walked whole with the midpoint
/// stepper. Larger ones are solved row by row.
const STEPPED_ELLIPSE_LIMIT: i64 = 1 << 12;

/// Inclusive window in widened coordinates.
#[derive(Debug, Clone, Copy)]
struct Window {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
}

impl Window {
    const UNBOUNDED: Window = Window {
        x1: i32::MIN as i64,
        y1: i32::MIN as i64,
        x2: i32::MAX as i64,
        y2: i32::MAX as i64,
    };
}

impl From<&Rect> for Window {
    fn from(rc: &Rect) -> Self {
        let x1 = rc.corner.x as i64;
        let y1 = rc.corner.y as i64;
        Window {
            x1,
            y1,
            x2: x1 + rc.extent.width as i64 - 1,
            y2: y1 + rc.extent.height as i64 - 1,
        }
    }
}

/// Bresenham line from `(x1, y1)` to `(x2, y2)`, both endpoints included.
pub fn algo_line<F>(x1: i32, y1: i32, x2: i32, y2: i32, proc: F)
where
    F: FnMut(i32, i32),
{
    step_line(x1, y1, x2, y2, Window::UNBOUNDED, proc);
}

/// [`algo_line`] limited to the steps whose major-axis coordinate falls
/// inside `bounds`. The points reported are exactly the ones the full walk
/// would report there.
pub fn algo_line_clipped<F>(x1: i32, y1: i32, x2: i32, y2: i32, bounds: &Rect, proc: F)
where
    F: FnMut(i32, i32),
{
    if bounds.is_empty() {
        return;
    }
    step_line(x1, y1, x2, y2, Window::from(bounds), proc);
}

fn step_line<F>(x1: i32, y1: i32, x2: i32, y2: i32, win: Window, mut proc: F)
where
    F: FnMut(i32, i32),
{
    // i64 keeps the error term from overflowing on extreme coordinates.
    let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    // The major axis advances on every step, so step k sits at
    // `start + k * sign` along it.
    let x_major = dx >= dy;
    let (d_major, d_minor, start, sign, lo, hi) = if x_major {
        (dx, dy, x1, sx, win.x1, win.x2)
    } else {
        (dy, dx, y1, sy, win.y1, win.y2)
    };
    let (first, last) = if sign > 0 {
        (lo - start, hi - start)
    } else {
        (start - hi, start - lo)
    };
    let first = first.max(0);
    let last = last.min(d_major);
    if first > last {
        return;
    }

    // Minor steps taken before step `first`, and the error term at that step.
    let k = first as i128;
    let minor = if d_major == 0 {
        0
    } else {
        (2 * k * d_minor as i128 + d_major as i128 - 1) / (2 * d_major as i128)
    };
    let (wdx, wdy) = (dx as i128, dy as i128);
    let (mut x, mut y, mut err) = if x_major {
        (
            x1 + sx * first,
            y1 + sy * minor as i64,
            (wdx - wdy - k * wdy + minor * wdx) as i64,
        )
    } else {
        (
            x1 + sx * minor as i64,
            y1 + sy * first,
            (wdx - wdy + k * wdx - minor * wdy) as i64,
        )
    };

    for _ in first..=last {
        proc(x as i32, y as i32);

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Shared midpoint stepper for the ellipse inscribed in a bounding box.
///
/// `visit` receives `(x0, y0, x1, y1, tip)`: the current left/right columns
/// and the lower/upper rows, mirrored around the center. `tip` is set for the
/// extra rows that finish very flat ellipses, where the caller paints one
/// column further out on each side.
///
/// Only used for boxes within [`STEPPED_ELLIPSE_LIMIT`], which keeps every
/// error term well inside i64.
fn step_ellipse<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut visit: F)
where
    F: FnMut(i64, i64, i64, i64, bool),
{
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let mut a = (x1 - x0).abs();
    let b = (y1 - y0).abs();
    let mut b1 = b & 1;
    let mut dx = 4 * (1 - a) * b * b;
    let mut dy = 4 * (b1 + 1) * a * a;
    let mut err = dx + dy + b1 * a * a;

    if x0 > x1 {
        x0 = x1;
        x1 += a;
    }
    if y0 > y1 {
        y0 = y1;
    }
    y0 += (b + 1) / 2;
    y1 = y0 - b1;
    a *= 8 * a;
    b1 = 8 * b * b;

    loop {
        visit(x0, y0, x1, y1, false);

        let e2 = 2 * err;
        if e2 <= dy {
            y0 += 1;
            y1 -= 1;
            dy += a;
            err += dy;
        }
        if e2 >= dx || 2 * err > dy {
            x0 += 1;
            x1 -= 1;
            dx += b1;
            err += dx;
        }
        if x0 > x1 {
            break;
        }
    }

    while y0 - y1 < b {
        visit(x0, y0, x1, y1, true);
        y0 += 1;
        y1 -= 1;
    }
}

/// Ellipse solved one row at a time, for boxes too large to walk.
///
/// In coordinates doubled around the box center, pixel `(x, y)` belongs to
/// the shape when `(X / (a + 1))^2 + (Y / (b + 1))^2 <= 1`, where `a` and `b`
/// are the box width and height minus one. Each row is an independent integer
/// square root, so clipping is just a matter of which rows get asked for.
#[derive(Debug, Clone, Copy)]
struct RowEllipse {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    a: i64,
    b: i64,
}

impl RowEllipse {
    fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x1, x2) = (x1.min(x2) as i64, x1.max(x2) as i64);
        let (y1, y2) = (y1.min(y2) as i64, y1.max(y2) as i64);
        Self {
            x1,
            y1,
            x2,
            y2,
            a: x2 - x1,
            b: y2 - y1,
        }
    }

    fn is_large(&self) -> bool {
        self.a.max(self.b) > STEPPED_ELLIPSE_LIMIT
    }

    /// Inclusive `(left, right)` columns of row `y`; `None` outside the box.
    fn span(&self, y: i64) -> Option<(i64, i64)> {
        if y < self.y1 || y > self.y2 {
            return None;
        }

        let row = (2 * y - self.y1 - self.y2).unsigned_abs() as u128;
        let a1 = (self.a + 1) as u128;
        let b1 = (self.b + 1) as u128;

        // Only the middle row of a full-range box reaches 2^128.
        let reach = match (a1 * a1).checked_mul(b1 * b1 - row * row) {
            Some(n) => n.isqrt() / b1,
            None => a1,
        } as i64;

        // Half-width must share the parity of `a` to land on pixel centers.
        let half = (reach - ((reach - self.a) & 1)).max(self.a & 1);
        let mid = self.x1 + self.x2;
        Some(((mid - half) / 2, (mid + half) / 2))
    }

    fn rows(&self, win: &Window) -> std::ops::RangeInclusive<i64> {
        self.y1.max(win.y1)..=self.y2.min(win.y2)
    }

    fn fill<F>(&self, win: Window, mut proc: F)
    where
        F: FnMut(i32, i32, i32),
    {
        for y in self.rows(&win) {
            if let Some((left, right)) = self.span(y) {
                proc(left as i32, y as i32, right as i32);
            }
        }
    }

    fn outline<F>(&self, win: Window, mut proc: F)
    where
        F: FnMut(i32, i32),
    {
        for y in self.rows(&win) {
            let Some((left, right)) = self.span(y) else {
                continue;
            };

            let mut run = |from: i64, to: i64| {
                for x in from.max(win.x1)..=to.min(win.x2) {
                    proc(x as i32, y as i32);
                }
            };

            // Each side runs inward until it meets the narrower neighbor row.
            // The top and bottom rows are solid.
            match (self.span(y - 1), self.span(y + 1)) {
                (Some(above), Some(below)) => {
                    run(left, left.max(above.0.max(below.0) - 1));
                    run(right.min(above.1.min(below.1) + 1), right);
                }
                _ => run(left, right),
            }
        }
    }
}

/// Outline of the ellipse inscribed in the box `(x1, y1)-(x2, y2)`.
pub fn algo_ellipse<F>(x1: i32, y1: i32, x2: i32, y2: i32, proc: F)
where
    F: FnMut(i32, i32),
{
    ellipse_outline(x1, y1, x2, y2, Window::UNBOUNDED, proc);
}

/// [`algo_ellipse`] that skips the rows and columns of large boxes falling
/// outside `bounds`.
pub fn algo_ellipse_clipped<F>(x1: i32, y1: i32, x2: i32, y2: i32, bounds: &Rect, proc: F)
where
    F: FnMut(i32, i32),
{
    if bounds.is_empty() {
        return;
    }
    ellipse_outline(x1, y1, x2, y2, Window::from(bounds), proc);
}

fn ellipse_outline<F>(x1: i32, y1: i32, x2: i32, y2: i32, win: Window, mut proc: F)
where
    F: FnMut(i32, i32),
{
    let ellipse = RowEllipse::new(x1, y1, x2, y2);
    if ellipse.is_large() {
        ellipse.outline(win, proc);
        return;
    }

    step_ellipse(x1, y1, x2, y2, |x0, y0, x1, y1, tip| {
        let (left, right) = if tip { (x0 - 1, x1 + 1) } else { (x0, x1) };
        proc(right as i32, y0 as i32);
        proc(left as i32, y0 as i32);
        proc(left as i32, y1 as i32);
        proc(right as i32, y1 as i32);
    });
}

/// Filled ellipse inscribed in the box `(x1, y1)-(x2, y2)`, reported as
/// horizontal spans `proc(x_left, y, x_right)`.
pub fn algo_ellipsefill<F>(x1: i32, y1: i32, x2: i32, y2: i32, proc: F)
where
    F: FnMut(i32, i32, i32),
{
    ellipse_fill(x1, y1, x2, y2, Window::UNBOUNDED, proc);
}

/// [`algo_ellipsefill`] that skips the rows of large boxes falling outside
/// `bounds`. Spans are not trimmed horizontally.
pub fn algo_ellipsefill_clipped<F>(x1: i32, y1: i32, x2: i32, y2: i32, bounds: &Rect, proc: F)
where
    F: FnMut(i32, i32, i32),
{
    if bounds.is_empty() {
        return;
    }
    ellipse_fill(x1, y1, x2, y2, Window::from(bounds), proc);
}

fn ellipse_fill<F>(x1: i32, y1: i32, x2: i32, y2: i32, win: Window, mut proc: F)
where
    F: FnMut(i32, i32, i32),
{
    let ellipse = RowEllipse::new(x1, y1, x2, y2);
    if ellipse.is_large() {
        ellipse.fill(win, proc);
        return;
    }

    step_ellipse(x1, y1, x2, y2, |x0, y0, x1, y1, tip| {
        let (left, right) = if tip { (x0 - 1, x1 + 1) } else { (x0, x1) };
        proc(left as i32, y0 as i32, right as i32);
        proc(left as i32, y1 as i32, right as i32);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const BOUNDS: Rect = Rect::new(0, 0, 4, 4);

    fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        algo_line(x1, y1, x2, y2, |x, y| points.push((x, y)));
        points
    }

    fn ellipse_points(x1: i32, y1: i32, x2: i32, y2: i32) -> BTreeSet<(i32, i32)> {
        let mut points = BTreeSet::new();
        algo_ellipse(x1, y1, x2, y2, |x, y| {
            points.insert((x, y));
        });
        points
    }

    fn ellipse_fill_points(x1: i32, y1: i32, x2: i32, y2: i32) -> BTreeSet<(i32, i32)> {
        let mut points = BTreeSet::new();
        algo_ellipsefill(x1, y1, x2, y2, |xa, y, xb| {
            for x in xa..=xb {
                points.insert((x, y));
            }
        });
        points
    }

    #[test]
    fn test_line_single_point() {
        assert_eq!(line_points(3, 4, 3, 4), vec![(3, 4)]);
    }

    #[test]
    fn test_line_horizontal_and_vertical() {
        assert_eq!(line_points(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line_points(1, 2, 1, -1), vec![(1, 2), (1, 1), (1, 0), (1, -1)]);
    }

    #[test]
    fn test_line_diagonal() {
        assert_eq!(line_points(0, 0, 3, 3), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_line_is_connected() {
        let points = line_points(-4, 7, 13, -2);
        assert_eq!(points.first(), Some(&(-4, 7)));
        assert_eq!(points.last(), Some(&(13, -2)));
        for pair in points.windows(2) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
        }
        // One pixel per step along the major axis.
        assert_eq!(points.len(), 18);
    }

    #[test]
    fn test_ellipse_circle_outline() {
        let expected: BTreeSet<(i32, i32)> = [
            (1, 0),
            (2, 0),
            (3, 0),
            (0, 1),
            (0, 2),
            (0, 3),
            (4, 1),
            (4, 2),
            (4, 3),
            (1, 4),
            (2, 4),
            (3, 4),
        ]
        .into_iter()
        .collect();
        assert_eq!(ellipse_points(0, 0, 4, 4), expected);
    }

    #[test]
    fn test_ellipse_argument_order_does_not_matter() {
        assert_eq!(ellipse_points(0, 0, 4, 4), ellipse_points(4, 4, 0, 0));
        assert_eq!(ellipse_points(2, 9, 11, 1), ellipse_points(11, 1, 2, 9));
    }

    #[test]
    fn test_ellipse_stays_inside_box() {
        let points = ellipse_points(3, 2, 17, 9);
        assert!(points.iter().all(|&(x, y)| (3..=17).contains(&x) && (2..=9).contains(&y)));
        assert!(points.iter().any(|&(x, _)| x == 3));
        assert!(points.iter().any(|&(x, _)| x == 17));
        assert!(points.iter().any(|&(_, y)| y == 2));
        assert!(points.iter().any(|&(_, y)| y == 9));
    }

    #[test]
    fn test_ellipse_single_pixel() {
        let points = ellipse_points(5, 5, 5, 5);
        assert_eq!(points.into_iter().collect::<Vec<_>>(), vec![(5, 5)]);
    }

    #[test]
    fn test_ellipse_fill_circle() {
        let points = ellipse_fill_points(0, 0, 4, 4);
        assert_eq!(points.len(), 21);
        for y in 1..=3 {
            for x in 0..=4 {
                assert!(points.contains(&(x, y)));
            }
        }
        assert!(!points.contains(&(0, 0)));
        assert!(!points.contains(&(4, 4)));
        assert!(points.contains(&(2, 0)));
    }

    #[test]
    fn test_ellipse_fill_covers_outline() {
        let outline = ellipse_points(1, 1, 12, 7);
        let filled = ellipse_fill_points(1, 1, 12, 7);
        assert!(outline.is_subset(&filled));
    }

    #[test]
    fn test_line_clipped_matches_full_walk() {
        let bounds = Rect::new(-3, 2, 9, 5);
        for (x1, y1, x2, y2) in [(-20, 15, 30, -4), (5, -40, -2, 44), (7, 7, 7, 7), (40, 3, -40, 3)] {
            let mut clipped = Vec::new();
            algo_line_clipped(x1, y1, x2, y2, &bounds, |x, y| clipped.push((x, y)));

            let visible = |&(x, y): &(i32, i32)| bounds.contains(x, y);
            let expected: Vec<_> = line_points(x1, y1, x2, y2).into_iter().filter(visible).collect();
            let got: Vec<_> = clipped.into_iter().filter(visible).collect();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_line_clipped_extreme_endpoints() {
        let mut points = Vec::new();
        algo_line_clipped(i32::MIN, i32::MIN, i32::MAX, i32::MAX, &BOUNDS, |x, y| {
            points.push((x, y))
        });
        assert_eq!(points, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

        let mut calls = 0;
        algo_line_clipped(0, i32::MIN, 3, i32::MAX, &BOUNDS, |x, _| {
            assert!((0..=3).contains(&x));
            calls += 1;
        });
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_line_clipped_empty_bounds() {
        let mut calls = 0;
        algo_line_clipped(0, 0, 10, 10, &Rect::new(0, 0, 0, 5), |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_huge_ellipse_visits_only_visible_rows() {
        let mut spans = Vec::new();
        algo_ellipsefill_clipped(-1_000_000, -1_000_000, 1_000_000, 1_000_000, &BOUNDS, |xa, y, xb| {
            spans.push((xa, y, xb))
        });
        assert_eq!(spans.len(), 4);
        assert!(spans.iter().all(|&(xa, _, xb)| xa < 0 && xb > 3));

        // The outline passes nowhere near the center.
        let mut calls = 0;
        algo_ellipse_clipped(-1_000_000, -1_000_000, 1_000_000, 1_000_000, &BOUNDS, |_, _| {
            calls += 1
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_full_range_ellipse_reaches_left_edge() {
        let mut points = BTreeSet::new();
        let edge = Rect::new(i32::MIN, -2, 1, 4);
        algo_ellipse_clipped(i32::MIN, i32::MIN, i32::MAX, i32::MAX, &edge, |x, y| {
            points.insert((x, y));
        });
        let expected: BTreeSet<_> = (-2..=1).map(|y| (i32::MIN, y)).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_large_ellipse_touches_box_edges() {
        let mut left = BTreeSet::new();
        algo_ellipse_clipped(0, 0, 10_000, 10_000, &Rect::new(0, 4990, 3, 21), |x, y| {
            left.insert((x, y));
        });
        assert!(left.contains(&(0, 5000)));
        assert!(left.iter().all(|&(x, _)| x == 0));

        let mut top = BTreeSet::new();
        algo_ellipse_clipped(0, 0, 10_000, 10_000, &Rect::new(4990, 0, 21, 1), |x, y| {
            top.insert((x, y));
        });
        assert!(top.contains(&(5000, 0)));
    }

    #[test]
    fn test_large_ellipse_fill_covers_outline() {
        let bounds = Rect::new(-5000, 0, 80, 12);
        let mut outline = BTreeSet::new();
        algo_ellipse_clipped(-5000, 3, 5000, 9, &bounds, |x, y| {
            outline.insert((x, y));
        });
        let mut filled = BTreeSet::new();
        algo_ellipsefill_clipped(-5000, 3, 5000, 9, &bounds, |xa, y, xb| {
            for x in xa.max(-5000)..=xb.min(-4921) {
                filled.insert((x, y));
            }
        });
        assert!(!outline.is_empty());
        assert!(outline.is_subset(&filled));
        assert!(filled.iter().all(|&(_, y)| (3..=9).contains(&y)));
    }
}
