use posecam_base::{Rect, Vec2};

#[test]
fn test_intersection_overlapping() {
    let a = Rect::new(Vec2::new(0.0f32, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(5.0f32, 5.0), Vec2::new(10.0, 10.0));

    let i = a.intersection(b).unwrap();
    assert_eq!(i.origin, Vec2::new(5.0, 5.0));
    assert_eq!(i.size, Vec2::new(5.0, 5.0));
    assert_eq!(i.area(), 25.0);
}

#[test]
fn test_intersection_touching_is_none() {
    let a = Rect::new(Vec2::new(0, 0), Vec2::new(10, 10));
    let b = Rect::new(Vec2::new(10, 0), Vec2::new(10, 10));
    assert!(a.intersection(b).is_none());
}

#[test]
fn test_vec2_ops_and_pixel_rounding() {
    let v = Vec2::new(1.5f32, 2.0) + Vec2::new(1.5, 2.0);
    assert_eq!(v, Vec2::new(3.0, 4.0));
    assert_eq!((v - Vec2::new(1.0, 1.0)) / 2.0, Vec2::new(1.0, 1.5));
    assert_eq!(Vec2::new(2.4f32, 2.6).to_pixel(), Vec2::new(2, 3));
}
