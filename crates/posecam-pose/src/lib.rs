//! Human pose estimation for pose-view.
//!
//! YOLO-pose style models: letterbox the frame to 640x640, run the model,
//! decode `[1, 56, N]` output into COCO keypoints in frame coordinates.
//! The ONNX Runtime backend is behind the `onnx` feature.

pub mod config;
pub mod draw;
pub mod error;
pub mod estimator;
pub mod postprocess;
pub mod preprocess;
pub mod types;

#[cfg(feature = "onnx")]
pub mod backends;

pub use config::{ModelComplexity, PoseConfig};
pub use draw::{Canvas, SKELETON, draw_skeleton};
pub use error::PoseError;
pub use estimator::PoseEstimator;
pub use postprocess::{iou, postprocess};
pub use preprocess::{INPUT_SIZE, preprocess};
pub use types::{
    COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex, LetterboxInfo, PoseDetection, PoseResult,
};

#[cfg(feature = "onnx")]
pub use backends::onnx::OnnxPoseEstimator;
