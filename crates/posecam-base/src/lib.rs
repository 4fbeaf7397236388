//! Shared building blocks for the pose-view workspace: logging, the HWC
//! raster tensor that carries frame pixels, and small geometry types.

pub mod logging;
pub mod rect;
pub mod tensor;
pub mod vec2;

pub use logging::{
    FileLogger, StdoutLogger, default_level, init_file_logger, init_stdout_logger,
};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use posecam_base::log::*
pub use log;
