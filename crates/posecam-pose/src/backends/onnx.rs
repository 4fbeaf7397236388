use crate::{PoseConfig, PoseError, PoseEstimator, PoseResult, postprocess, preprocess};
use ort::{inputs, session::Session, value::Tensor as OrtTensor};
use posecam_base::Tensor;
use std::path::Path;

/// YOLO-pose model run on the CPU through ONNX Runtime.
pub struct OnnxPoseEstimator {
    session: Session,
    input_name: String,
    output_name: String,
    conf_threshold: f32,
    iou_threshold: f32,
}

impl OnnxPoseEstimator {
    /// Load the model named by `config` (explicit path or the complexity's
    /// default file).
    pub fn new(config: &PoseConfig) -> Result<Self, PoseError> {
        let path = config.model_path();
        let mut estimator = Self::from_file(&path)?;
        estimator.conf_threshold = config.conf_threshold();
        estimator.iou_threshold = config.iou_threshold();
        log::info!(
            "loaded pose model {} (complexity {})",
            path.display(),
            config.complexity()
        );
        Ok(estimator)
    }

    pub fn from_file(path: &Path) -> Result<Self, PoseError> {
        if !path.exists() {
            return Err(PoseError::Model(format!(
                "model file {} not found",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| PoseError::Model(format!("failed to create session builder: {e}")))?
            .commit_from_file(path)
            .map_err(|e| PoseError::Model(format!("failed to load {}: {e}", path.display())))?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .ok_or_else(|| PoseError::Model("model has no inputs".to_string()))?;
        let output_name = session
            .outputs()
            .first()
            .map(|output| output.name().to_string())
            .ok_or_else(|| PoseError::Model("model has no outputs".to_string()))?;
        log::debug!("pose model input `{}`, output `{}`", input_name, output_name);

        let defaults = PoseConfig::default();
        Ok(Self {
            session,
            input_name,
            output_name,
            conf_threshold: defaults.conf_threshold(),
            iou_threshold: defaults.iou_threshold(),
        })
    }

    fn run(&mut self, input: Tensor<f32>) -> Result<Tensor<f32>, PoseError> {
        let shape: Vec<i64> = input.shape.iter().map(|&d| d as i64).collect();
        let input = OrtTensor::from_array((shape, input.data))
            .map_err(|e| PoseError::Runtime(format!("failed to create input tensor: {e}")))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => input])
            .map_err(|e| PoseError::Runtime(format!("inference failed: {e}")))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            PoseError::Runtime(format!("model produced no `{}` output", self.output_name))
        })?;
        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PoseError::Runtime(format!("failed to read output: {e}")))?;

        let shape = shape.iter().map(|&d| d.max(0) as usize).collect();
        Ok(Tensor::new(shape, data.to_vec())?)
    }
}

impl PoseEstimator for OnnxPoseEstimator {
    fn estimate(&mut self, image: &Tensor<u8>) -> Result<PoseResult, PoseError> {
        let (input, letterbox) = preprocess(image)?;
        let output = self.run(input)?;
        let detections = postprocess(&output, &letterbox, self.conf_threshold, self.iou_threshold)?;
        Ok(PoseResult::new(detections))
    }
}
