use posecam_base::{Tensor, TensorError};

#[test]
fn test_new_validates_element_count() {
    let err = Tensor::new(vec![2, 2, 3], vec![0u8; 11]).unwrap_err();
    assert_eq!(err, TensorError::ShapeMismatch { expected: 12, got: 11 });
}

#[test]
fn test_new_detects_overflow() {
    let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
    assert_eq!(err, TensorError::ShapeOverflow);
}

#[test]
fn test_hwc_accessor() {
    let t = Tensor::from_hwc(4, 6, 3, vec![0u8; 72]).unwrap();
    assert_eq!(t.hwc(), Some((4, 6, 3)));
    assert_eq!(t.ndim(), 3);

    let flat = Tensor::new(vec![72], vec![0u8; 72]).unwrap();
    assert_eq!(flat.hwc(), None);
}

#[test]
fn test_empty_image() {
    let t = Tensor::from_hwc(0, 0, 3, Vec::<u8>::new()).unwrap();
    assert!(t.is_empty());
    assert_eq!(t.len(), 0);
    assert_eq!(t.hwc(), Some((0, 0, 3)));
}

#[test]
fn test_debug_omits_pixel_data() {
    let t = Tensor::from_hwc(2, 2, 3, vec![7u8; 12]).unwrap();
    let s = format!("{:?}", t);
    assert!(s.contains("shape"));
    assert!(!s.contains("7, 7"));
}
