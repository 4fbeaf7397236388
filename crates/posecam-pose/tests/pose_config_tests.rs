use posecam_pose::{ModelComplexity, PoseConfig};
use std::path::PathBuf;

#[test]
fn test_model_complexity_parsing() {
    assert_eq!("0".parse::<ModelComplexity>().unwrap(), ModelComplexity::Lite);
    assert_eq!("1".parse::<ModelComplexity>().unwrap(), ModelComplexity::Full);
    assert_eq!("heavy".parse::<ModelComplexity>().unwrap(), ModelComplexity::Heavy);
    assert!("3".parse::<ModelComplexity>().is_err());
    assert!("fast".parse::<ModelComplexity>().is_err());
    assert!(ModelComplexity::try_from(9u8).is_err());
}

#[test]
fn test_model_complexity_default_models() {
    assert_eq!(ModelComplexity::default(), ModelComplexity::Lite);
    assert_eq!(
        ModelComplexity::Lite.default_model_path(),
        PathBuf::from("models/yolo11n-pose.onnx")
    );
    assert_ne!(
        ModelComplexity::Full.default_model_path(),
        ModelComplexity::Heavy.default_model_path()
    );
    assert_eq!(ModelComplexity::Full.to_string(), "1 (full)");
}

#[test]
fn test_pose_config_defaults() {
    let config = PoseConfig::default();
    assert_eq!(config.complexity(), ModelComplexity::Lite);
    assert_eq!(config.conf_threshold(), 0.25);
    assert_eq!(config.iou_threshold(), 0.45);
    assert_eq!(config.keypoint_threshold(), 0.3);
    assert_eq!(config.model_path(), PathBuf::from("models/yolo11n-pose.onnx"));
}

#[test]
fn test_pose_config_builder() {
    let config = PoseConfig::default()
        .with_complexity(ModelComplexity::Heavy)
        .with_conf_threshold(1.5)
        .with_keypoint_threshold(0.5);
    assert_eq!(config.model_path(), ModelComplexity::Heavy.default_model_path());
    assert_eq!(config.conf_threshold(), 1.0);
    assert_eq!(config.keypoint_threshold(), 0.5);

    let config = config.with_model_path("/opt/models/custom.onnx");
    assert_eq!(config.model_path(), PathBuf::from("/opt/models/custom.onnx"));
}
