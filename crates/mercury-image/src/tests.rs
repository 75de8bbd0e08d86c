use std::f64::consts::PI;

use super::*;

/// Builds a mask from rows of `#` (on) and `.` (off).
fn mkmask<const H: usize>(rows: [&str; H]) -> Mask {
    let width = rows[0].len() as u32;
    Mask::from_fn(width, H as u32, |x, y| {
        rows[y as usize].as_bytes()[x as usize] == b'#'
    })
}

#[test]
fn mask_get_set() {
    let mut mask = mkmask([
        "#..", //
        ".#.",
        "...",
    ]);
    assert!(mask.get(0, 0));
    assert!(mask.get(1, 1));
    assert!(!mask.get(2, 2));
    assert_eq!(mask.count_on(), 2);

    // Out of bounds reads are off, writes are ignored.
    assert!(!mask.get(-1, 0));
    assert!(!mask.get(0, 3));
    mask.set(3, 0, true);
    mask.set(-1, -1, true);
    assert_eq!(mask.count_on(), 2);

    mask.set(2, 2, true);
    assert!(mask.get(2, 2));
    assert_eq!(mask.as_gray().get_pixel(2, 2).0, [Mask::ON]);
}

#[test]
fn mask_from_raw() {
    let mask = Mask::from_raw(2, 2, vec![0, 255, 1, 0]).unwrap();
    assert!(!mask.get(0, 0));
    assert!(mask.get(1, 0));
    // Any non-zero value counts as on.
    assert!(mask.get(0, 1));
    assert_eq!(mask.resolution(), Resolution::new(2, 2));

    assert!(Mask::from_raw(2, 2, vec![0; 3]).is_none());
    assert!(Mask::from_raw(0, 2, Vec::new()).is_none());
}

#[test]
#[should_panic]
fn empty_mask_panics() {
    Mask::new(0, 10);
}

#[test]
fn view_out_of_bounds() {
    let mask = Mask::filled(4, 4);

    let view = mask.view(Rect::from_top_left(-2, -2, 4, 4));
    assert_eq!(view.rect(), Rect::from_top_left(0, 0, 4, 4));
    assert!(!view.get(0, 0));
    assert!(!view.get(1, 1));
    assert!(view.get(2, 2));
    assert!(view.get(3, 3));
    assert!(!view.get(4, 4));
    assert_eq!(view.count_on(), 4);

    let outside = mask.view(Rect::from_top_left(10, 10, 3, 3));
    assert_eq!(outside.count_on(), 0);
}

#[test]
fn view_at_end_of_coordinate_space() {
    let mask = Mask::filled(4, 4);
    let view = mask.view(Rect::from_top_left(i32::MAX - 2, i32::MAX - 2, 6, 6));
    assert!(!view.get(5, 5));
    assert!(!view.get(0, 5));
    assert_eq!(view.count_on(), 0);
}

#[test]
fn view_coordinates() {
    let mask = Mask::new(10, 10);
    let view = mask.view(Rect::from_center(5, 5, 5, 5));
    assert_eq!(view.mask_rect(), Rect::from_top_left(3, 3, 5, 5));
    assert_eq!(view.to_local(Point::new(5, 5)), Point::new(2, 2));
    assert_eq!(view.to_mask(Point::new(2, 2)), Point::new(5, 5));
    assert_eq!(view.to_mask(view.to_local(Point::new(-7, 12))), Point::new(-7, 12));
}

#[test]
fn disc_geometry() {
    let center = Point::new(3, -4);
    let dot = Disc::new(center, 0);
    assert!(dot.contains(center));
    assert!(dot.area() >= 1);

    let disc = Disc::new(center, 20);
    let bounds = Rect::from_center(center.x, center.y, disc.diameter(), disc.diameter());
    assert!(disc.points().all(|p| bounds.contains_point(p)));
    assert!(disc.points().all(|p| disc.contains(p)));
    assert!(disc.contains(center));
    assert!(!disc.contains(center + Point::new(21, 0)));

    // Symmetric around its center.
    let left = disc.points().filter(|p| p.x < center.x).count();
    let right = disc.points().filter(|p| p.x > center.x).count();
    assert_eq!(left, right);

    let expected = PI * 20.5 * 20.5;
    let area = disc.area() as f64;
    assert!((area - expected).abs() / expected < 0.1, "area={area}");
}

#[test]
fn fill_disc_clips() {
    let mut mask = Mask::new(20, 20);
    mask.fill_disc(Point::new(0, 0), 5);
    let disc = Disc::new(Point::new(0, 0), 5);
    let inside = disc
        .points()
        .filter(|p| p.x >= 0 && p.y >= 0)
        .count() as u64;
    assert_eq!(mask.count_on(), inside);
}

#[test]
fn fill_rect() {
    let mut mask = Mask::new(8, 8);
    mask.fill_rect(Rect::from_top_left(6, 6, 4, 4));
    assert_eq!(mask.count_on(), 4);
    mask.fill_rect(Rect::from_top_left(20, 20, 4, 4));
    assert_eq!(mask.count_on(), 4);
}

#[test]
fn point_arithmetic() {
    let a = Point::new(10, -4);
    let b = Point::new(4, 4);
    assert_eq!(a + b, Point::new(14, 0));
    assert_eq!(a - b, Point::new(6, -8));
    assert_eq!(a.midpoint(b), Point::new(7, 0));
    assert_eq!(Point::new(-3, 3) / 2, Point::new(-1, 1));
    assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
    assert_eq!(
        Point::from_vector_rounded(nalgebra::Vector2::new(1.5, -2.4)),
        Point::new(2, -2)
    );
    assert_eq!(Point::from_sentinel(Point::ORIGIN), None);
    assert_eq!(Point::or_sentinel(None), Point::ORIGIN);
    assert_eq!(Point::or_sentinel(Some(a)), a);
}
