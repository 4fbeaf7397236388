use std::time::Duration;

/// Longest accepted open timeout; larger values are clamped.
pub const MAX_OPEN_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration shared by all video sources.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoConfig {
    buffer_count: u32,
    open_timeout: Duration,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            buffer_count: 4,
            open_timeout: Duration::from_secs(5),
        }
    }
}

impl VideoConfig {
    /// Number of decoded frames that may queue between the decoder and the loop.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count.max(1);
        self
    }

    /// How long `open` waits for the pipeline to start playing.
    pub fn with_open_timeout(mut self, open_timeout: Duration) -> Self {
        self.open_timeout = open_timeout.min(MAX_OPEN_TIMEOUT);
        self
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn open_timeout(&self) -> Duration {
        self.open_timeout
    }
}
