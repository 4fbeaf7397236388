use crate::{Frame, VideoError};

/// Something that can be opened into a capture session.
pub trait VideoSource {
    type Session: CaptureSession;

    /// Human-readable description for diagnostics.
    fn describe(&self) -> String;

    /// Open the source.
    ///
    /// # Errors
    ///
    /// Returns `VideoError::SourceUnavailable` if the source cannot be opened.
    /// No session exists in that case.
    fn open(&self) -> Result<Self::Session, VideoError>;
}

/// An open source producing a finite, non-restartable sequence of frames.
#[allow(async_fn_in_trait)]
pub trait CaptureSession {
    /// Wait for the next frame. `Ok(None)` means end-of-stream.
    ///
    /// There is no timeout: a stalled source waits indefinitely.
    async fn next_frame(&mut self) -> Result<Option<Frame>, VideoError>;

    /// Release the underlying source. Calling it again is a no-op.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}
