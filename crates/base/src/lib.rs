pub mod config;
pub mod logging;

pub use config::{ConfigError, load_toml, parse_toml};
pub use logging::{
    FileLogger, LogTarget, StdoutLogger, default_level, init_file_logger, init_logger,
    init_stdout_logger,
};

// Re-export log crate so downstream crates can use base::log::*
pub use log;
