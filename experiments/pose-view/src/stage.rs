use posecam_pose::{Canvas, PoseEstimator, draw_skeleton};
use posecam_video::Frame;
use std::fmt;

/// A stage failed on a frame. Stage failures end the capture loop.
#[derive(Debug, Clone, PartialEq)]
pub struct StageError {
    pub stage: String,
    pub message: String,
}

impl StageError {
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage `{}` failed: {}", self.stage, self.message)
    }
}

impl std::error::Error for StageError {}

/// A per-frame transformation run between reading and display.
pub trait FrameStage {
    fn name(&self) -> &str;

    fn process(&mut self, frame: Frame) -> Result<Frame, StageError>;
}

/// Runs a pose estimator on each frame and draws the skeletons it finds.
pub struct PoseAnnotator<E> {
    estimator: E,
    keypoint_threshold: f32,
}

impl<E: PoseEstimator> PoseAnnotator<E> {
    pub fn new(estimator: E, keypoint_threshold: f32) -> Self {
        Self {
            estimator,
            keypoint_threshold,
        }
    }

    pub fn keypoint_threshold(&self) -> f32 {
        self.keypoint_threshold
    }
}

impl<E: PoseEstimator> FrameStage for PoseAnnotator<E> {
    fn name(&self) -> &str {
        "pose"
    }

    fn process(&mut self, mut frame: Frame) -> Result<Frame, StageError> {
        // estimate on a copy, draw on the frame that goes to the sink
        let snapshot = frame.pixels().clone();
        let poses = self
            .estimator
            .estimate(&snapshot)
            .map_err(|e| StageError::new(self.name(), e.to_string()))?;

        log::trace!("frame {}: {} people", frame.index(), poses.len());

        let (width, height) = (frame.width(), frame.height());
        let mut canvas = Canvas::new(frame.data_mut(), width, height).ok_or_else(|| {
            StageError::new("pose", format!("frame buffer does not match {width}x{height}"))
        })?;
        for detection in poses.iter() {
            draw_skeleton(&mut canvas, detection, self.keypoint_threshold);
        }

        Ok(frame)
    }
}
