use crate::{KeypointIndex, PoseDetection};
use posecam_base::Vec2;

pub type Rgb = [u8; 3];

const FACE: Rgb = [0, 255, 255];
const TORSO: Rgb = [0, 255, 0];
const ARM: Rgb = [255, 255, 0];
const LEG: Rgb = [255, 0, 255];
const NECK: Rgb = [255, 255, 255];
const JOINT: Rgb = [255, 255, 255];
const JOINT_RADIUS: i32 = 3;

/// COCO bones and the color each one is drawn with.
pub const SKELETON: [(KeypointIndex, KeypointIndex, Rgb); 18] = {
    use KeypointIndex::*;
    [
        (Nose, LeftEye, FACE),
        (Nose, RightEye, FACE),
        (LeftEye, LeftEar, FACE),
        (RightEye, RightEar, FACE),
        (LeftShoulder, RightShoulder, TORSO),
        (LeftShoulder, LeftHip, TORSO),
        (RightShoulder, RightHip, TORSO),
        (LeftHip, RightHip, TORSO),
        (LeftShoulder, LeftElbow, ARM),
        (RightShoulder, RightElbow, ARM),
        (LeftElbow, LeftWrist, ARM),
        (RightElbow, RightWrist, ARM),
        (LeftHip, LeftKnee, LEG),
        (RightHip, RightKnee, LEG),
        (LeftKnee, LeftAnkle, LEG),
        (RightKnee, RightAnkle, LEG),
        (Nose, LeftShoulder, NECK),
        (Nose, RightShoulder, NECK),
    ]
};

/// A packed RGB raster to draw on. Everything drawn is clipped to the
/// raster bounds.
pub struct Canvas<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// `None` if `buf` is not exactly `width * height * 3` bytes.
    pub fn new(buf: &'a mut [u8], width: usize, height: usize) -> Option<Self> {
        if buf.len() != width * height * 3 {
            return None;
        }
        Some(Self { buf, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.buf[i], self.buf[i + 1], self.buf[i + 2]])
    }

    fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 3;
        self.buf[i..i + 3].copy_from_slice(&color);
    }

    /// Bresenham line between two pixel positions.
    pub fn line(&mut self, from: Vec2<i32>, to: Vec2<i32>, color: Rgb) {
        let Some((mut a, b)) = self.clip(from, to) else {
            return;
        };

        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let step_x = if a.x < b.x { 1 } else { -1 };
        let step_y = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(a.x, a.y, color);
            if a == b {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                a.x += step_x;
            }
            if e2 <= dx {
                err += dx;
                a.y += step_y;
            }
        }
    }

    pub fn filled_circle(&mut self, center: Vec2<i32>, radius: i32, color: Rgb) {
        let radius = radius.max(0);
        let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
        if cx + r < 0 || cy + r < 0 || cx - r >= self.width as i64 || cy - r >= self.height as i64 {
            return;
        }
        // center is within `radius` of the raster, so every offset fits in i32
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put(center.x + dx, center.y + dy, color);
                }
            }
        }
    }

    // Cohen-Sutherland: shrink the segment to the raster, None if fully outside
    fn clip(&self, a: Vec2<i32>, b: Vec2<i32>) -> Option<(Vec2<i32>, Vec2<i32>)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let (mut a, mut b) = ((a.x as i64, a.y as i64), (b.x as i64, b.y as i64));

        loop {
            let (code_a, code_b) = (self.outcode(a), self.outcode(b));
            if code_a | code_b == 0 {
                return Some((
                    Vec2::new(a.0 as i32, a.1 as i32),
                    Vec2::new(b.0 as i32, b.1 as i32),
                ));
            }
            if code_a & code_b != 0 {
                return None;
            }

            let code = if code_a != 0 { code_a } else { code_b };
            // the other endpoint is on the inner side of this edge, so the
            // divisor below is never zero
            let (dx, dy) = (b.0 - a.0, b.1 - a.1);
            let clipped = if code & ABOVE != 0 {
                (a.0 + scale(dx, -a.1, dy), 0)
            } else if code & BELOW != 0 {
                (a.0 + scale(dx, max_y - a.1, dy), max_y)
            } else if code & LEFT != 0 {
                (0, a.1 + scale(dy, -a.0, dx))
            } else {
                (max_x, a.1 + scale(dy, max_x - a.0, dx))
            };

            if code == code_a {
                a = clipped;
            } else {
                b = clipped;
            }
        }
    }

    fn outcode(&self, (x, y): (i64, i64)) -> u8 {
        let mut code = 0;
        if x < 0 {
            code |= LEFT;
        } else if x >= self.width as i64 {
            code |= RIGHT;
        }
        if y < 0 {
            code |= ABOVE;
        } else if y >= self.height as i64 {
            code |= BELOW;
        }
        code
    }
}

// `delta * num / den` without overflow; |num| <= |den| keeps the result within |delta|
fn scale(delta: i64, num: i64, den: i64) -> i64 {
    (delta as i128 * num as i128 / den as i128) as i64
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BELOW: u8 = 4;
const ABOVE: u8 = 8;

/// Draw the bones and joints of one person. Keypoints below
/// `keypoint_threshold` and bones touching them are skipped.
pub fn draw_skeleton(canvas: &mut Canvas<'_>, detection: &PoseDetection, keypoint_threshold: f32) {
    for (from, to, color) in &SKELETON {
        let (a, b) = (detection.keypoint(*from), detection.keypoint(*to));
        if a.confidence >= keypoint_threshold && b.confidence >= keypoint_threshold {
            canvas.line(a.position.to_pixel(), b.position.to_pixel(), *color);
        }
    }

    for keypoint in &detection.keypoints {
        if keypoint.confidence >= keypoint_threshold {
            canvas.filled_circle(keypoint.position.to_pixel(), JOINT_RADIUS, JOINT);
        }
    }
}
