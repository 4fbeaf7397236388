use crate::{LetterboxInfo, PoseError};
use posecam_base::Tensor;

/// Side length of the square model input.
pub const INPUT_SIZE: usize = 640;

// gray border, already scaled to [0, 1]
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Letterbox an RGB frame into a `[1, 3, 640, 640]` input tensor.
///
/// The frame is scaled with nearest-neighbour sampling so its longer side
/// fills the input, centered, and the border is filled with gray. Values
/// are scaled from 0..=255 to [0, 1]. The returned `LetterboxInfo` maps
/// model coordinates back to frame pixels.
pub fn preprocess(image: &Tensor<u8>) -> Result<(Tensor<f32>, LetterboxInfo), PoseError> {
    let (h, w) = match image.hwc() {
        Some((h, w, 3)) if h > 0 && w > 0 => (h, w),
        _ => {
            return Err(PoseError::Shape(format!(
                "expected non-empty [H, W, 3] image, got {:?}",
                image.shape
            )));
        }
    };

    let scale = (INPUT_SIZE as f32 / w as f32).min(INPUT_SIZE as f32 / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, INPUT_SIZE);
    let new_h = ((h as f32 * scale) as usize).clamp(1, INPUT_SIZE);
    let pad_x = (INPUT_SIZE - new_w) / 2;
    let pad_y = (INPUT_SIZE - new_h) / 2;

    let plane = INPUT_SIZE * INPUT_SIZE;
    let mut data = vec![PAD_VALUE; 3 * plane];

    for y in 0..new_h {
        let src_y = ((y as f32 / scale) as usize).min(h - 1);
        let row = (y + pad_y) * INPUT_SIZE + pad_x;
        for x in 0..new_w {
            let src_x = ((x as f32 / scale) as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            for ch in 0..3 {
                data[ch * plane + row + x] = image.data[src + ch] as f32 / 255.0;
            }
        }
    }

    let input = Tensor::new(vec![1, 3, INPUT_SIZE, INPUT_SIZE], data)?;
    let letterbox = LetterboxInfo {
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
    };
    Ok((input, letterbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_value_is_gray() {
        assert!((PAD_VALUE * 255.0 - 114.0).abs() < 1e-4);
    }
}
