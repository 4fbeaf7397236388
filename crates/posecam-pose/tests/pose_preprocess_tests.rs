use posecam_base::Tensor;
use posecam_pose::{INPUT_SIZE, PoseError, preprocess};

const PLANE: usize = INPUT_SIZE * INPUT_SIZE;

#[test]
fn test_output_shape() {
    let image = Tensor::from_hwc(480, 640, 3, vec![0u8; 480 * 640 * 3]).unwrap();
    let (input, _) = preprocess(&image).unwrap();
    assert_eq!(input.shape, vec![1, 3, INPUT_SIZE, INPUT_SIZE]);
    assert_eq!(input.data.len(), 3 * PLANE);
}

#[test]
fn test_landscape_frame_is_padded_vertically() {
    // 640x480 keeps its size, 80 rows of padding above and below
    let image = Tensor::from_hwc(480, 640, 3, vec![255u8; 480 * 640 * 3]).unwrap();
    let (input, letterbox) = preprocess(&image).unwrap();

    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 80.0);

    let pad = 114.0 / 255.0;
    assert!((input.data[0] - pad).abs() < 1e-6);
    assert!((input.data[79 * INPUT_SIZE] - pad).abs() < 1e-6);
    assert_eq!(input.data[80 * INPUT_SIZE], 1.0);
    assert_eq!(input.data[559 * INPUT_SIZE + 639], 1.0);
    assert!((input.data[560 * INPUT_SIZE] - pad).abs() < 1e-6);
}

#[test]
fn test_small_frame_is_upscaled() {
    let image = Tensor::from_hwc(160, 320, 3, vec![0u8; 160 * 320 * 3]).unwrap();
    let (_, letterbox) = preprocess(&image).unwrap();
    assert_eq!(letterbox.scale, 2.0);
    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 160.0);
}

#[test]
fn test_channels_become_planes() {
    // single red pixel image fills the whole input
    let image = Tensor::from_hwc(1, 1, 3, vec![255u8, 0, 51]).unwrap();
    let (input, letterbox) = preprocess(&image).unwrap();
    assert_eq!(letterbox.scale, 640.0);

    let center = 320 * INPUT_SIZE + 320;
    assert_eq!(input.data[center], 1.0);
    assert_eq!(input.data[PLANE + center], 0.0);
    assert!((input.data[2 * PLANE + center] - 0.2).abs() < 1e-6);
}

#[test]
fn test_rejects_wrong_shapes() {
    let gray = Tensor::from_hwc(4, 4, 1, vec![0u8; 16]).unwrap();
    assert!(matches!(preprocess(&gray), Err(PoseError::Shape(_))));

    let flat = Tensor::new(vec![48], vec![0u8; 48]).unwrap();
    assert!(matches!(preprocess(&flat), Err(PoseError::Shape(_))));

    let empty = Tensor::from_hwc(0, 0, 3, Vec::<u8>::new()).unwrap();
    assert!(matches!(preprocess(&empty), Err(PoseError::Shape(_))));
}
