//! pose-view: pull frames from a video source, optionally draw detected
//! poses on them, and show them in a window until the stream ends or the
//! user stops it.

pub mod capture;
pub mod config;
pub mod display;
pub mod stage;
pub mod worker;

pub use capture::{CaptureError, CaptureLoop, ExitReason, LoopReport, LoopState};
pub use config::{Args, ConfigError, ViewConfig};
pub use display::{DisplayConfig, DisplayError, DisplaySink, MinifbDisplay, parse_key, rgb_to_argb};
pub use stage::{FrameStage, PoseAnnotator, StageError};
pub use worker::{WORKER_FLAG, WorkerError, WorkerProcess};
