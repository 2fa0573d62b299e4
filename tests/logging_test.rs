//! Integration tests for the logging infrastructure.
//!
//! Run with: RUST_LOG=debug cargo test --test logging_test -- --nocapture

mod common;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use common::{init_test_logging, test_phase};
use log::{Level, LevelFilter, Log};
use picker_values::logging::EngineLogger;
use picker_values::prelude::*;
use picker_values::zone::system_time_zone;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_logging_infrastructure_works() {
    init_test_logging();

    {
        let _setup = test_phase("setup");
        tracing::debug!("building config");
    }

    {
        let _execute = test_phase("execute");
        let config = EngineConfig::builder().time_zone("Nowhere/Special").build();
        assert_eq!(config.time_zone(), system_time_zone());
    }
}

#[test_log::test]
fn test_failed_parse_is_logged_not_raised() {
    let config = EngineConfig::default();
    assert!(parse("not a date", ValueKind::Date, &config).is_none());
    assert!(Color::parse("not a color").is_err());
}

#[test_log::test]
fn test_logger_lines_from_many_threads() {
    let buffer = SharedBuffer::default();
    let logger = Arc::new(
        EngineLogger::with_writer(buffer.clone())
            .level(LevelFilter::Debug)
            .show_time(false),
    );

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for step in 0..10 {
                    logger.log(
                        &log::Record::builder()
                            .args(format_args!("worker {worker} step {step}"))
                            .level(Level::Debug)
                            .target("picker_values::parse")
                            .build(),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush();

    let contents = buffer.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 40);
    assert!(
        lines
            .iter()
            .all(|line| line.starts_with("DEBUG picker_values::parse: worker "))
    );
}

#[cfg(feature = "tracing")]
#[test]
fn test_tracing_layer_writes_engine_format() {
    use picker_values::logging::EngineTracingLayer;
    use tracing_subscriber::layer::SubscriberExt;

    let buffer = SharedBuffer::default();
    let logger = EngineLogger::with_writer(buffer.clone()).show_time(false);
    let subscriber = tracing_subscriber::registry().with(EngineTracingLayer::with_logger(logger));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "picker_values::format", kind = "date", "formatted");
        tracing::debug!(target: "picker_values::format", "below the level");
    });

    assert_eq!(buffer.contents(), "INFO  picker_values::format: formatted kind=date\n");
}
