use base::{LogTarget, log, log_fatal};
use bridge::{BridgeConfig, FrameBridge};
use inference::OnnxHandLandmarker;
use std::env;
use std::path::PathBuf;

const DEFAULT_MODEL_PATH: &str = "models/hand_landmark.onnx";

fn log_target() -> LogTarget {
    match env::var("HANDBRIDGE_LOG_DIR") {
        Ok(dir) => LogTarget::Directory(dir.into()),
        Err(_) => LogTarget::Stdout,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_logger(log_target(), base::default_level())?;

    // Config path from the first argument, then the environment
    let config_path = env::args().nth(1).or_else(|| env::var("HANDBRIDGE_CONFIG").ok());
    let mut config = match &config_path {
        Some(path) => match BridgeConfig::load(path) {
            Ok(config) => config,
            Err(e) => log_fatal!("failed to load {}: {}", path, e),
        },
        None => BridgeConfig::default(),
    };
    log::set_max_level(config.log_level()?);

    if let Ok(model) = env::var("HANDBRIDGE_MODEL_PATH") {
        let detector = config.detector().clone().with_model_path(model);
        *config.detector_mut() = detector;
    }
    let model_path: PathBuf = config
        .detector()
        .model_path()
        .map(PathBuf::from)
        .unwrap_or_else(|| DEFAULT_MODEL_PATH.into());

    log::info!("Hand landmark server");
    log::info!("Config: {}", config_path.as_deref().unwrap_or("(defaults)"));

    let detector =
        OnnxHandLandmarker::new(&model_path).with_logit_scores(config.detector().logit_scores());
    log::info!("Model: {}", detector.model_path().display());

    let bridge = match FrameBridge::bind(config, detector).await {
        Ok(bridge) => bridge,
        Err(e) => log_fatal!("failed to start bridge: {}", e),
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("cannot listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match bridge.run_until(shutdown).await {
        Ok(summary) => {
            log::info!(
                "Done: {} frames, {} errors, closed by {:?}",
                summary.frames,
                summary.errors,
                summary.close_reason
            );
            Ok(())
        }
        Err(e) => log_fatal!("bridge stopped: {}", e),
    }
}
