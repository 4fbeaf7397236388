use crate::VideoError;
use posecam_base::Tensor;

/// Channels per pixel; frames are always packed RGB.
pub const CHANNELS: usize = 3;

/// One decoded RGB image, HWC layout `[height, width, 3]`.
///
/// `index` counts frames produced by a session, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: u64,
    pixels: Tensor<u8>,
}

impl Frame {
    pub fn new(index: u64, pixels: Tensor<u8>) -> Result<Self, VideoError> {
        match pixels.hwc() {
            Some((_, _, CHANNELS)) => Ok(Self { index, pixels }),
            _ => Err(VideoError::Stream(format!(
                "expected [H, W, 3] frame shape, got {:?}",
                pixels.shape
            ))),
        }
    }

    pub fn from_rgb(
        index: u64,
        width: usize,
        height: usize,
        data: Vec<u8>,
    ) -> Result<Self, VideoError> {
        Self::new(index, Tensor::from_hwc(height, width, CHANNELS, data)?)
    }

    /// A frame without pixels, produced when the decoder hands out an empty buffer.
    pub fn empty(index: u64) -> Self {
        Self {
            index,
            pixels: Tensor {
                shape: vec![0, 0, CHANNELS],
                data: Vec::new(),
            },
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn height(&self) -> usize {
        self.pixels.shape[0]
    }

    pub fn width(&self) -> usize {
        self.pixels.shape[1]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &Tensor<u8> {
        &self.pixels
    }

    /// Raw RGB bytes, row-major, for in-place drawing.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.pixels.data
    }

    pub fn into_pixels(self) -> Tensor<u8> {
        self.pixels
    }
}

/// Copy `height` rows of `width` RGB pixels out of a buffer whose rows are
/// `stride` bytes apart, dropping the row padding.
pub fn pack_rows(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
) -> Result<Vec<u8>, VideoError> {
    let row_bytes = width * CHANNELS;
    if stride < row_bytes {
        return Err(VideoError::Stream(format!(
            "row stride {stride} is smaller than {row_bytes} bytes per row"
        )));
    }
    if height > 0 && data.len() < stride * (height - 1) + row_bytes {
        return Err(VideoError::Stream(format!(
            "buffer of {} bytes too small for {width}x{height} with stride {stride}",
            data.len()
        )));
    }

    if stride == row_bytes {
        return Ok(data[..row_bytes * height].to_vec());
    }

    let mut packed = Vec::with_capacity(row_bytes * height);
    for row in data.chunks(stride).take(height) {
        packed.extend_from_slice(&row[..row_bytes]);
    }
    Ok(packed)
}
