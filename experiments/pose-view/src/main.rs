use clap::Parser;
use pose_view::{
    Args, CaptureError, CaptureLoop, MinifbDisplay, ViewConfig, WorkerProcess,
};
use posecam_base::{init_file_logger, init_stdout_logger, log_fatal};
use posecam_video::GstSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = match ViewConfig::try_from(&args) {
        Ok(config) => config,
        Err(error) => {
            init_stdout_logger("main", posecam_base::default_level());
            log_fatal!("invalid configuration: {}", error);
        }
    };

    match &config.log_dir {
        Some(dir) => init_file_logger(dir, config.log_tag(), config.log_level)?,
        None => init_stdout_logger(config.log_tag(), config.log_level),
    }

    if config.runs_capture() {
        run_capture(&config).await
    } else {
        supervise().await
    }
}

/// Run the capture loop in this process.
async fn run_capture(config: &ViewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = GstSource::new(config.source.clone(), config.video.clone());
    let display = MinifbDisplay::new(config.display.clone());
    let mut capture = CaptureLoop::new(source, display);

    if let Some(pose) = &config.pose {
        capture = with_pose_stage(capture, pose)?;
    }

    match capture.run().await {
        Ok(report) => {
            log::info!("displayed {} frames", report.frames_displayed);
            Ok(())
        }
        Err(CaptureError::SourceUnavailable(reason)) => {
            log_fatal!("send: VideoCapture not opened ({})", reason);
        }
        Err(error) => {
            log_fatal!("{}", error);
        }
    }
}

#[cfg(feature = "onnx")]
fn with_pose_stage(
    capture: CaptureLoop<GstSource, MinifbDisplay>,
    pose: &posecam_pose::PoseConfig,
) -> Result<CaptureLoop<GstSource, MinifbDisplay>, Box<dyn std::error::Error>> {
    let estimator = posecam_pose::OnnxPoseEstimator::new(pose)?;
    Ok(capture.with_stage(pose_view::PoseAnnotator::new(
        estimator,
        pose.keypoint_threshold(),
    )))
}

#[cfg(not(feature = "onnx"))]
fn with_pose_stage(
    _capture: CaptureLoop<GstSource, MinifbDisplay>,
    _pose: &posecam_pose::PoseConfig,
) -> Result<CaptureLoop<GstSource, MinifbDisplay>, Box<dyn std::error::Error>> {
    Err("pose estimation needs pose-view built with the `onnx` feature".into())
}

/// Start the capture loop in a worker process and wait for it.
async fn supervise() -> Result<(), Box<dyn std::error::Error>> {
    let mut worker = WorkerProcess::spawn_self(std::env::args_os().skip(1))?;
    log::info!("worker {} started", worker.pid());

    let code = tokio::select! {
        code = worker.wait() => code?,
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupted");
            worker.kill().await?;
            worker.wait().await?
        }
    };

    if code != 0 {
        log::error!("worker {} exited with status {}", worker.pid(), code);
        log::logger().flush();
        std::process::exit(code);
    }
    log::info!("worker {} finished", worker.pid());
    Ok(())
}
