use posecam_base::{Rect, Tensor, Vec2};
use posecam_pose::{LetterboxInfo, PoseError, iou, postprocess};

const ROWS: usize = 56;

const IDENTITY: LetterboxInfo = LetterboxInfo {
    scale: 1.0,
    pad_x: 0.0,
    pad_y: 0.0,
};

/// Build a `[1, 56, N]` output from per-candidate (cx, cy, w, h, score) rows;
/// every keypoint sits at the box center with visibility 0.5.
fn model_output(candidates: &[[f32; 5]]) -> Tensor<f32> {
    let n = candidates.len();
    let mut data = vec![0.0; ROWS * n];
    for (i, c) in candidates.iter().enumerate() {
        for row in 0..5 {
            data[row * n + i] = c[row];
        }
        for k in 0..17 {
            let base = 5 + k * 3;
            data[base * n + i] = c[0];
            data[(base + 1) * n + i] = c[1];
            data[(base + 2) * n + i] = 0.5;
        }
    }
    Tensor::new(vec![1, ROWS, n], data).unwrap()
}

#[test]
fn test_iou() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0));
    let far = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
    let empty = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));

    assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    assert!((iou(&a, &b) - 50.0 / 150.0).abs() < 1e-6);
    assert_eq!(iou(&a, &far), 0.0);
    assert_eq!(iou(&a, &empty), 0.0);
}

#[test]
fn test_rejects_wrong_output_shape() {
    let bad = Tensor::new(vec![1, 10, 5], vec![0.0; 50]).unwrap();
    assert!(matches!(
        postprocess(&bad, &IDENTITY, 0.25, 0.45),
        Err(PoseError::Shape(_))
    ));

    let flat = Tensor::new(vec![56, 5], vec![0.0; 280]).unwrap();
    assert!(matches!(
        postprocess(&flat, &IDENTITY, 0.25, 0.45),
        Err(PoseError::Shape(_))
    ));
}

#[test]
fn test_no_candidates() {
    let output = Tensor::new(vec![1, ROWS, 0], Vec::new()).unwrap();
    assert!(postprocess(&output, &IDENTITY, 0.25, 0.45).unwrap().is_empty());
}

#[test]
fn test_confidence_filter_and_order() {
    let output = model_output(&[
        [100.0, 100.0, 20.0, 40.0, 0.4],
        [300.0, 300.0, 20.0, 40.0, 0.1],
        [500.0, 100.0, 20.0, 40.0, 0.9],
    ]);
    let detections = postprocess(&output, &IDENTITY, 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].confidence, 0.9);
    assert_eq!(detections[1].confidence, 0.4);
    assert_eq!(detections[0].bbox.origin, Vec2::new(490.0, 80.0));
    assert_eq!(detections[0].bbox.size, Vec2::new(20.0, 40.0));
}

#[test]
fn test_nms_suppresses_overlaps() {
    let output = model_output(&[
        [100.0, 100.0, 50.0, 50.0, 0.7],
        [102.0, 101.0, 50.0, 50.0, 0.8],
        [400.0, 400.0, 50.0, 50.0, 0.6],
    ]);
    let detections = postprocess(&output, &IDENTITY, 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].confidence, 0.8);
    assert_eq!(detections[1].confidence, 0.6);
}

#[test]
fn test_coordinates_are_mapped_to_frame() {
    // frame 1280x720 letterboxed with scale 0.5 and 140 rows of top padding
    let letterbox = LetterboxInfo {
        scale: 0.5,
        pad_x: 0.0,
        pad_y: 140.0,
    };
    let output = model_output(&[[320.0, 320.0, 100.0, 200.0, 0.9]]);
    let detections = postprocess(&output, &letterbox, 0.25, 0.45).unwrap();

    let person = &detections[0];
    assert_eq!(person.bbox.size, Vec2::new(200.0, 400.0));
    assert_eq!(person.bbox.origin, Vec2::new(540.0, 160.0));
    for keypoint in &person.keypoints {
        assert_eq!(keypoint.position, Vec2::new(640.0, 360.0));
        assert_eq!(keypoint.confidence, 0.5);
    }
}
