//! A small line logger for the `log` facade.
//!
//! The engines only emit through `log::debug!`/`trace!`/`warn!`; hosts that
//! have no logger of their own can install [`EngineLogger`] to see them.
//!
//! Optional tracing integration is available via `EngineTracingLayer` when
//! the `tracing` feature is enabled.
//!
//! ```no_run
//! use log::LevelFilter;
//! use picker_values::logging::EngineLogger;
//!
//! EngineLogger::new()
//!     .level(LevelFilter::Debug)
//!     .show_time(false)
//!     .init()
//!     .expect("logger already set");
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use crate::sync::lock_recover;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

const DEFAULT_TIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// Line-per-record logger writing to any `Write` sink.
///
/// # Thread Safety
///
/// The sink sits behind a mutex with poison recovery, so records from
/// different threads never interleave within a line.
pub struct EngineLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
    show_time: bool,
    show_level: bool,
    show_target: bool,
    time_format: OwnedFormatItem,
}

impl Default for EngineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLogger {
    /// Logger writing to stderr at `Info`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Logger writing to `writer`.
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        let time_format = time::format_description::parse_owned::<2>(DEFAULT_TIME_FORMAT)
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            sink: Mutex::new(Box::new(writer)),
            level: LevelFilter::Info,
            show_time: true,
            show_level: true,
            show_target: true,
            time_format,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Enable or disable the `target:` prefix.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Override the timestamp format (`time` format description syntax).
    /// Unparseable formats keep the current one.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format).unwrap_or_else(|_| now.to_string())
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();
        if self.show_time {
            line.push_str(&self.format_time());
            line.push(' ');
        }
        if self.show_level {
            line.push_str(&format!("{:<5} ", record.level()));
        }
        if self.show_target && !record.target().is_empty() {
            line.push_str(record.target());
            line.push_str(": ");
        }
        line.push_str(&record.args().to_string());
        line
    }

    fn write_line(&self, line: &str) {
        let mut sink = lock_recover(&self.sink);
        // A logger has nowhere to report its own I/O failures.
        let _ = writeln!(sink, "{line}");
    }
}

impl Log for EngineLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&self.format_record(record));
    }

    fn flush(&self) {
        let _ = lock_recover(&self.sink).flush();
    }
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use super::EngineLogger;
    use log::Level;
    use std::fmt::Debug;

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level as TracingLevel, Subscriber};
    use tracing_subscriber::{Layer, layer::Context};

    /// Tracing layer that writes events in `EngineLogger`'s line format.
    pub struct EngineTracingLayer {
        logger: EngineLogger,
    }

    impl EngineTracingLayer {
        /// Layer backed by a default `EngineLogger`.
        #[must_use]
        pub fn new() -> Self {
            Self {
                logger: EngineLogger::new(),
            }
        }

        /// Use an existing logger configuration.
        #[must_use]
        pub fn with_logger(logger: EngineLogger) -> Self {
            Self { logger }
        }

        /// Install as the global tracing subscriber.
        ///
        /// # Errors
        ///
        /// Fails if a global subscriber is already installed.
        pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
            use tracing_subscriber::prelude::*;

            let subscriber = tracing_subscriber::registry().with(self);
            tracing::subscriber::set_global_default(subscriber)
        }
    }

    impl Default for EngineTracingLayer {
        fn default() -> Self {
            Self::new()
        }
    }

    #[derive(Default)]
    struct EventVisitor {
        message: Option<String>,
        fields: Vec<(String, String)>,
    }

    impl Visit for EventVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            let rendered = format!("{value:?}");
            let rendered = strip_quotes(&rendered).to_string();
            if field.name() == "message" {
                self.message = Some(rendered);
            } else {
                self.fields.push((field.name().to_string(), rendered));
            }
        }
    }

    impl<S> Layer<S> for EngineTracingLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let level = map_tracing_level(*metadata.level());
            if level > self.logger.level {
                return;
            }
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);

            let mut message = visitor.message.unwrap_or_default();
            if !visitor.fields.is_empty() {
                let extra = visitor
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if message.is_empty() {
                    message = extra;
                } else {
                    message.push(' ');
                    message.push_str(&extra);
                }
            }

            let message_ref = message.as_str();
            let args = format_args!("{message_ref}");
            let record = log::Record::builder()
                .args(args)
                .level(level)
                .target(metadata.target())
                .file(metadata.file())
                .line(metadata.line())
                .module_path(metadata.module_path())
                .build();
            self.logger.write_line(&self.logger.format_record(&record));
        }
    }

    fn map_tracing_level(level: TracingLevel) -> Level {
        match level {
            TracingLevel::TRACE => Level::Trace,
            TracingLevel::DEBUG => Level::Debug,
            TracingLevel::INFO => Level::Info,
            TracingLevel::WARN => Level::Warn,
            TracingLevel::ERROR => Level::Error,
        }
    }

    fn strip_quotes(value: &str) -> &str {
        if value.len() >= 2 && value.starts_with('\"') && value.ends_with('\"') {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

}

#[cfg(feature = "tracing")]
pub use tracing_integration::EngineTracingLayer;

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::sync::Arc;

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
    fn test_defaults() {
        let logger = EngineLogger::new();
        assert_eq!(logger.level, LevelFilter::Info);
        assert!(logger.show_time);
        assert!(logger.show_level);
        assert!(logger.show_target);
    }

    #[test]
    fn test_level_filtering() {
        let logger = EngineLogger::new().level(LevelFilter::Info);
        let meta = |level| log::Metadata::builder().level(level).build();
        assert!(logger.enabled(&meta(Level::Error)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));
        assert!(!logger.enabled(&meta(Level::Trace)));
    }

    #[test]
    fn test_format_record() {
        let logger = EngineLogger::new().show_time(false);
        let record = log::Record::builder()
            .args(format_args!("unknown zone \"Mars/Base\""))
            .level(Level::Warn)
            .target("picker_values::zone")
            .build();
        assert_eq!(
            logger.format_record(&record),
            "WARN  picker_values::zone: unknown zone \"Mars/Base\""
        );
    }

    #[test]
    fn test_writes_lines_to_sink() {
        let buffer = SharedBuffer::default();
        let logger = EngineLogger::with_writer(buffer.clone())
            .level(LevelFilter::Debug)
            .show_time(false)
            .show_target(false);
        let record = log::Record::builder()
            .args(format_args!("first"))
            .level(Level::Debug)
            .build();
        logger.log(&record);
        let skipped = log::Record::builder()
            .args(format_args!("hidden"))
            .level(Level::Trace)
            .build();
        logger.log(&skipped);
        logger.flush();
        assert_eq!(buffer.contents(), "DEBUG first\n");
    }

    #[test]
    fn test_time_format_override() {
        let logger = EngineLogger::new().time_format("[hour]:[minute]");
        let stamp = logger.format_time();
        assert_eq!(stamp.len(), 5);
        assert_eq!(&stamp[2..3], ":");

        let unchanged = EngineLogger::new().time_format("[not a component]");
        assert!(unchanged.format_time().len() >= 19);
    }
}
