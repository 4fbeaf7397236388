use crate::{COCO_KEYPOINT_COUNT, Keypoint, LetterboxInfo, PoseDetection, PoseError};
use posecam_base::{Rect, Tensor, Vec2};

// cx, cy, w, h, score, then x/y/visibility per keypoint
const ROW_COUNT: usize = 5 + COCO_KEYPOINT_COUNT * 3;

/// Intersection over union of two boxes; 0 for empty boxes.
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return 0.0;
    }
    let overlap = a.intersection(*b).map(|r| r.area()).unwrap_or(0.0);
    let union = a.area() + b.area() - overlap;
    if union <= 0.0 { 0.0 } else { overlap / union }
}

/// Decode raw YOLO-pose output of shape `[1, 56, N]`.
///
/// Candidates below `conf_threshold` are dropped, boxes and keypoints are
/// mapped back to frame pixels, and overlapping boxes (IoU above
/// `iou_threshold`) are suppressed greedily. Result is sorted by confidence,
/// highest first.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, PoseError> {
    let n = match output.shape.as_slice() {
        &[1, ROW_COUNT, n] => n,
        other => {
            return Err(PoseError::Shape(format!(
                "expected model output [1, {ROW_COUNT}, N], got {other:?}"
            )));
        }
    };

    // column-major view: attribute `row` of candidate `i` lives at row * n + i
    let at = |row: usize, i: usize| output.data[row * n + i];

    let mut candidates: Vec<PoseDetection> = (0..n)
        .filter(|&i| at(4, i) >= conf_threshold)
        .map(|i| {
            let center = letterbox.to_frame(Vec2::new(at(0, i), at(1, i)));
            let size = Vec2::new(at(2, i), at(3, i)) / letterbox.scale;
            let keypoints = std::array::from_fn(|k| {
                let row = 5 + k * 3;
                Keypoint {
                    position: letterbox.to_frame(Vec2::new(at(row, i), at(row + 1, i))),
                    confidence: at(row + 2, i),
                }
            });
            PoseDetection {
                bbox: Rect::new(center - size / 2.0, size),
                confidence: at(4, i),
                keypoints,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<PoseDetection> = Vec::new();
    for candidate in candidates {
        if kept
            .iter()
            .all(|k| iou(&k.bbox, &candidate.bbox) <= iou_threshold)
        {
            kept.push(candidate);
        }
    }

    log::trace!("{} of {} candidates kept", kept.len(), n);
    Ok(kept)
}
