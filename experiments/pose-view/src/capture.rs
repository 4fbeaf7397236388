use crate::{DisplayError, DisplaySink, FrameStage, StageError};
use posecam_video::{CaptureSession, Frame, VideoError, VideoSource};
use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// The source could not be opened; nothing was read or shown.
    SourceUnavailable(String),
    /// Reading from an open source failed.
    Stream(String),
    Stage(StageError),
    Display(DisplayError),
    /// `run` was called on a loop that already finished.
    Closed,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SourceUnavailable(msg) => write!(f, "source unavailable: {msg}"),
            CaptureError::Stream(msg) => write!(f, "stream error: {msg}"),
            CaptureError::Stage(err) => write!(f, "{err}"),
            CaptureError::Display(err) => write!(f, "display error: {err}"),
            CaptureError::Closed => write!(f, "capture loop already finished"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<VideoError> for CaptureError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::SourceUnavailable(msg) => CaptureError::SourceUnavailable(msg),
            VideoError::Stream(msg) | VideoError::Channel(msg) => CaptureError::Stream(msg),
        }
    }
}

impl From<StageError> for CaptureError {
    fn from(err: StageError) -> Self {
        CaptureError::Stage(err)
    }
}

impl From<DisplayError> for CaptureError {
    fn from(err: DisplayError) -> Self {
        CaptureError::Display(err)
    }
}

/// Where the loop is in its single pass over a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Unopened,
    Opened,
    Reading,
    Displaying,
    Closed,
}

/// Why a loop that opened its source stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The source ran out of frames or handed out an empty one.
    EmptyFrame,
    /// The sink asked to stop (key press or window closed).
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub frames_displayed: u64,
    pub exit: ExitReason,
}

/// Reads frames from a source, runs them through the configured stages and
/// hands them to a sink, one at a time.
///
/// A loop runs once. The capture session it opens is released on every
/// path out of `run`.
pub struct CaptureLoop<S, D> {
    source: S,
    sink: D,
    stages: Vec<Box<dyn FrameStage>>,
    state: LoopState,
}

impl<S: VideoSource, D: DisplaySink> CaptureLoop<S, D> {
    pub fn new(source: S, sink: D) -> Self {
        Self {
            source,
            sink,
            stages: Vec::new(),
            state: LoopState::Unopened,
        }
    }

    /// Append a stage; stages run in the order they were added.
    pub fn with_stage(mut self, stage: impl FrameStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    pub async fn run(&mut self) -> Result<LoopReport, CaptureError> {
        if self.state != LoopState::Unopened {
            return Err(CaptureError::Closed);
        }

        let mut session = match self.source.open() {
            Ok(session) => session,
            Err(e) => {
                self.state = LoopState::Closed;
                return Err(e.into());
            }
        };
        self.state = LoopState::Opened;
        log::info!("reading from {}", self.source.describe());

        let result = self.pump(&mut session).await;

        session.release();
        self.state = LoopState::Closed;

        match &result {
            Ok(report) => log::info!(
                "capture finished after {} frames ({:?})",
                report.frames_displayed,
                report.exit
            ),
            Err(e) => log::error!("capture aborted: {}", e),
        }
        result
    }

    async fn pump(&mut self, session: &mut S::Session) -> Result<LoopReport, CaptureError> {
        let mut frames_displayed = 0;

        loop {
            self.state = LoopState::Reading;
            let mut frame = match session.next_frame().await? {
                Some(frame) if !frame.is_empty() => frame,
                _ => {
                    log::info!("empty frame");
                    return Ok(LoopReport {
                        frames_displayed,
                        exit: ExitReason::EmptyFrame,
                    });
                }
            };

            frame = self.apply_stages(frame)?;

            self.state = LoopState::Displaying;
            self.sink.show(frame)?;
            frames_displayed += 1;

            if self.sink.stop_requested() {
                log::info!("stop requested");
                return Ok(LoopReport {
                    frames_displayed,
                    exit: ExitReason::StopRequested,
                });
            }
        }
    }

    fn apply_stages(&mut self, mut frame: Frame) -> Result<Frame, StageError> {
        for stage in &mut self.stages {
            frame = stage.process(frame)?;
        }
        Ok(frame)
    }
}
