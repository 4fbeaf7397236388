use posecam_base::{Rect, Vec2};

/// Number of keypoints in the COCO person layout.
pub const COCO_KEYPOINT_COUNT: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Position in frame pixels.
    pub position: Vec2<f32>,
    /// Continuous visibility score in [0, 1].
    pub confidence: f32,
}

/// COCO keypoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL
            .get(value)
            .copied()
            .ok_or_else(|| format!("invalid keypoint index {value}, expected 0..{COCO_KEYPOINT_COUNT}"))
    }
}

/// One detected person.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDetection {
    pub bbox: Rect<f32>,
    pub confidence: f32,
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PoseDetection {
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// All people found in one frame, highest confidence first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseResult {
    pub detections: Vec<PoseDetection>,
}

impl PoseResult {
    pub fn new(detections: Vec<PoseDetection>) -> Self {
        Self { detections }
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PoseDetection> {
        self.detections.iter()
    }
}

/// How a frame was scaled and padded into the model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl LetterboxInfo {
    /// Map a point from model input space back to frame pixels.
    pub fn to_frame(&self, point: Vec2<f32>) -> Vec2<f32> {
        (point - Vec2::new(self.pad_x, self.pad_y)) / self.scale
    }
}
