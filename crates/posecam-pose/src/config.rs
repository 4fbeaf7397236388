use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Model size / accuracy trade-off, `0` being the fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelComplexity {
    #[default]
    Lite = 0,
    Full = 1,
    Heavy = 2,
}

impl ModelComplexity {
    /// Model file used when no explicit path is configured.
    pub fn default_model_path(&self) -> PathBuf {
        let name = match self {
            ModelComplexity::Lite => "yolo11n-pose.onnx",
            ModelComplexity::Full => "yolo11s-pose.onnx",
            ModelComplexity::Heavy => "yolo11m-pose.onnx",
        };
        Path::new("models").join(name)
    }
}

impl TryFrom<u8> for ModelComplexity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ModelComplexity::Lite),
            1 => Ok(ModelComplexity::Full),
            2 => Ok(ModelComplexity::Heavy),
            _ => Err(format!("model complexity must be 0, 1 or 2, got {value}")),
        }
    }
}

impl FromStr for ModelComplexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lite" => Ok(ModelComplexity::Lite),
            "full" => Ok(ModelComplexity::Full),
            "heavy" => Ok(ModelComplexity::Heavy),
            other => other
                .parse::<u8>()
                .map_err(|_| format!("unknown model complexity `{other}`"))
                .and_then(ModelComplexity::try_from),
        }
    }
}

impl fmt::Display for ModelComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelComplexity::Lite => "lite",
            ModelComplexity::Full => "full",
            ModelComplexity::Heavy => "heavy",
        };
        write!(f, "{} ({})", *self as u8, name)
    }
}

/// Pose estimation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseConfig {
    complexity: ModelComplexity,
    model_path: Option<PathBuf>,
    conf_threshold: f32,
    iou_threshold: f32,
    keypoint_threshold: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            complexity: ModelComplexity::Lite,
            model_path: None,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            keypoint_threshold: 0.3,
        }
    }
}

impl PoseConfig {
    pub fn with_complexity(mut self, complexity: ModelComplexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_keypoint_threshold(mut self, threshold: f32) -> Self {
        self.keypoint_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn complexity(&self) -> ModelComplexity {
        self.complexity
    }

    /// Explicit model path, or the complexity's default file.
    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| self.complexity.default_model_path())
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }

    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    pub fn keypoint_threshold(&self) -> f32 {
        self.keypoint_threshold
    }
}
