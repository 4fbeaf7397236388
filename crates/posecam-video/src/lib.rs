//! Video sources for pose-view.
//!
//! A `VideoSource` describes where frames come from; opening it yields a
//! `CaptureSession` that produces RGB frames until end-of-stream and must be
//! released exactly once. The GStreamer backend lives behind the `gst`
//! feature so the rest of the workspace builds without the native libraries.

pub mod config;
pub mod error;
pub mod frame;
pub mod source;
pub mod traits;

#[cfg(feature = "gst")]
pub mod gst;

pub use config::{MAX_OPEN_TIMEOUT, VideoConfig};
pub use error::{ParseSourceError, VideoError};
pub use frame::{Frame, pack_rows};
pub use source::{APPSINK_NAME, DEFAULT_H264_PAYLOAD, DEFAULT_RTP_PORT, SourceDescriptor};
pub use traits::{CaptureSession, VideoSource};

#[cfg(feature = "gst")]
pub use gst::{GstSession, GstSource};
