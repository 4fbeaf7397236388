use crate::{PoseError, PoseResult};
use posecam_base::Tensor;

/// Finds people in an RGB frame.
///
/// `image` is HWC `[height, width, 3]` with values 0..=255. Keypoints in the
/// result are in the image's pixel coordinates.
pub trait PoseEstimator {
    fn estimate(&mut self, image: &Tensor<u8>) -> Result<PoseResult, PoseError>;
}

impl<E: PoseEstimator + ?Sized> PoseEstimator for Box<E> {
    fn estimate(&mut self, image: &Tensor<u8>) -> Result<PoseResult, PoseError> {
        (**self).estimate(image)
    }
}
