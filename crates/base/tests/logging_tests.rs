use base::logging::{FileLogger, StdoutLogger, default_level};
use log::Log;
use std::fs;

fn record_with<'a>(args: std::fmt::Arguments<'a>, level: log::Level) -> log::Record<'a> {
    log::RecordBuilder::new()
        .level(level)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(args)
        .build()
}

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger;

    let metadata = log::MetadataBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .build();
    assert!(logger.enabled(&metadata));

    logger.log(&record_with(format_args!("listening on 127.0.0.1:12345"), log::Level::Info));
    logger.flush();
}

#[test]
fn test_file_logger_creates_directory() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested").join("logs");

    let _logger = FileLogger::new(&dir).expect("Failed to create FileLogger");

    assert!(dir.is_dir());
}

#[test]
fn test_file_logger_writes_formatted_line() {
    let dir = tempfile::tempdir().unwrap();
    let logger = FileLogger::new(dir.path()).expect("Failed to create FileLogger");

    logger.log(&record_with(format_args!("decode failed for frame 3"), log::Level::Warn));
    logger.flush();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let path = entries[0].as_ref().unwrap().path();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("log"));

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[WARN]"));
    assert!(content.contains("test.rs:42"));
    assert!(content.contains("decode failed for frame 3"));
    assert!(content.ends_with('\n'));
}

#[test]
fn test_file_logger_appends_multiple_lines() {
    let dir = tempfile::tempdir().unwrap();
    let logger = FileLogger::new(dir.path()).unwrap();

    for i in 0..3 {
        logger.log(&record_with(format_args!("line {}", i), log::Level::Info));
    }
    logger.flush();

    let path = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();
    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_default_level_matches_build_mode() {
    if cfg!(debug_assertions) {
        assert_eq!(default_level(), log::LevelFilter::Debug);
    } else {
        assert_eq!(default_level(), log::LevelFilter::Info);
    }
}
