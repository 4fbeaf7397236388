use posecam_base::{Rect, Vec2};
use posecam_pose::{
    COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex, LetterboxInfo, PoseDetection, PoseResult,
};

fn detection_with_marked_wrist() -> PoseDetection {
    let mut keypoints = [Keypoint {
        position: Vec2::zero(),
        confidence: 0.0,
    }; COCO_KEYPOINT_COUNT];
    keypoints[KeypointIndex::LeftWrist as usize] = Keypoint {
        position: Vec2::new(12.0, 34.0),
        confidence: 0.9,
    };
    PoseDetection {
        bbox: Rect::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0)),
        confidence: 0.8,
        keypoints,
    }
}

#[test]
fn test_keypoint_index_round_trip() {
    for (i, index) in KeypointIndex::ALL.iter().enumerate() {
        assert_eq!(usize::from(*index), i);
        assert_eq!(KeypointIndex::try_from(i).unwrap(), *index);
    }
}

#[test]
fn test_keypoint_index_out_of_range() {
    let err = KeypointIndex::try_from(17).unwrap_err();
    assert!(err.contains("17"));
}

#[test]
fn test_detection_keypoint_lookup() {
    let detection = detection_with_marked_wrist();
    let wrist = detection.keypoint(KeypointIndex::LeftWrist);
    assert_eq!(wrist.position, Vec2::new(12.0, 34.0));
    assert_eq!(detection.keypoint(KeypointIndex::RightWrist).confidence, 0.0);
}

#[test]
fn test_pose_result_collection() {
    let result = PoseResult::default();
    assert!(result.is_empty());

    let result = PoseResult::new(vec![detection_with_marked_wrist(); 2]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.iter().count(), 2);
}

#[test]
fn test_letterbox_to_frame() {
    let letterbox = LetterboxInfo {
        scale: 0.5,
        pad_x: 0.0,
        pad_y: 140.0,
    };
    assert_eq!(
        letterbox.to_frame(Vec2::new(100.0, 240.0)),
        Vec2::new(200.0, 200.0)
    );
}
