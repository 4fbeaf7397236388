use crate::{DisplayConfig, parse_key};
use clap::Parser;
use log::LevelFilter;
use posecam_pose::{ModelComplexity, PoseConfig};
use posecam_video::{ParseSourceError, SourceDescriptor, VideoConfig};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Show a video stream with optional pose overlay.
#[derive(Parser, Debug, Clone)]
#[command(name = "pose-view", author, version, about, long_about = None)]
pub struct Args {
    /// Video source: `rtp:<port>[/<payload>]`, a file path, or a GStreamer
    /// launch line ending in `appsink name=sink`
    #[arg(env = "POSE_VIEW_SOURCE", default_value = "rtp:5000")]
    pub source: String,

    /// Frames buffered between the decoder and the display
    #[arg(long, env = "POSE_VIEW_BUFFER_COUNT", default_value_t = 4)]
    pub buffer_count: u32,

    /// Seconds to wait for the source to start playing
    #[arg(long, env = "POSE_VIEW_OPEN_TIMEOUT_SECS", default_value_t = 5)]
    pub open_timeout_secs: u64,

    /// Draw detected poses on each frame
    #[arg(long, env = "POSE_VIEW_POSE")]
    pub pose: bool,

    /// Pose model size: 0 (lite), 1 (full) or 2 (heavy)
    #[arg(long, env = "POSE_VIEW_MODEL_COMPLEXITY", default_value = "0")]
    pub model_complexity: ModelComplexity,

    /// Pose model file, overrides the complexity's default model
    #[arg(long, env = "POSE_VIEW_MODEL")]
    pub model: Option<PathBuf>,

    /// Minimum keypoint confidence to draw
    #[arg(long, env = "POSE_VIEW_KEYPOINT_THRESHOLD", default_value_t = 0.3)]
    pub keypoint_threshold: f32,

    /// Window title
    #[arg(long, env = "POSE_VIEW_TITLE", default_value = "receive")]
    pub title: String,

    #[arg(long, env = "POSE_VIEW_WINDOW_X", default_value_t = 0, allow_negative_numbers = true)]
    pub window_x: isize,

    #[arg(long, env = "POSE_VIEW_WINDOW_Y", default_value_t = 0, allow_negative_numbers = true)]
    pub window_y: isize,

    /// Do not keep the window above other windows
    #[arg(long, env = "POSE_VIEW_NO_TOPMOST")]
    pub no_topmost: bool,

    /// Key that stops playback (Escape always does)
    #[arg(long, env = "POSE_VIEW_STOP_KEY", default_value = "q")]
    pub stop_key: String,

    /// Limit the display rate
    #[arg(long, env = "POSE_VIEW_TARGET_FPS")]
    pub target_fps: Option<usize>,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "POSE_VIEW_LOG_LEVEL")]
    pub log_level: Option<LevelFilter>,

    /// Write logs to date-named files in this directory instead of stdout
    #[arg(long, env = "POSE_VIEW_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Run the capture loop in this process instead of a worker
    #[arg(long, env = "POSE_VIEW_IN_PROCESS")]
    pub in_process: bool,

    #[arg(long, hide = true)]
    pub worker: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Source(ParseSourceError),
    StopKey(String),
    KeypointThreshold(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Source(err) => write!(f, "{err}"),
            ConfigError::StopKey(key) => write!(f, "unknown stop key `{key}`"),
            ConfigError::KeypointThreshold(value) => {
                write!(f, "keypoint threshold must be within 0..=1, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParseSourceError> for ConfigError {
    fn from(err: ParseSourceError) -> Self {
        ConfigError::Source(err)
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub source: SourceDescriptor,
    pub video: VideoConfig,
    /// `None` when pose annotation is off.
    pub pose: Option<PoseConfig>,
    pub display: DisplayConfig,
    pub log_level: LevelFilter,
    pub log_dir: Option<PathBuf>,
    pub in_process: bool,
    pub worker: bool,
}

impl ViewConfig {
    /// Whether this process runs the capture loop itself.
    pub fn runs_capture(&self) -> bool {
        self.in_process || self.worker
    }

    /// Tag for log lines written by this process.
    pub fn log_tag(&self) -> &'static str {
        if self.worker { "worker" } else { "main" }
    }
}

impl TryFrom<&Args> for ViewConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let source: SourceDescriptor = args.source.parse()?;

        let video = VideoConfig::default()
            .with_buffer_count(args.buffer_count)
            .with_open_timeout(Duration::from_secs(args.open_timeout_secs));

        if !(0.0..=1.0).contains(&args.keypoint_threshold) {
            return Err(ConfigError::KeypointThreshold(args.keypoint_threshold));
        }
        let pose = args.pose.then(|| {
            let config = PoseConfig::default()
                .with_complexity(args.model_complexity)
                .with_keypoint_threshold(args.keypoint_threshold);
            match &args.model {
                Some(path) => config.with_model_path(path.clone()),
                None => config,
            }
        });

        let stop_key =
            parse_key(&args.stop_key).ok_or_else(|| ConfigError::StopKey(args.stop_key.clone()))?;
        let display = DisplayConfig::default()
            .with_title(args.title.clone())
            .with_position(args.window_x, args.window_y)
            .with_topmost(!args.no_topmost)
            .with_stop_key(stop_key)
            .with_target_fps(args.target_fps);

        Ok(Self {
            source,
            video,
            pose,
            display,
            log_level: args.log_level.unwrap_or_else(posecam_base::default_level),
            log_dir: args.log_dir.clone(),
            in_process: args.in_process,
            worker: args.worker,
        })
    }
}
