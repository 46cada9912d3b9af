//! Tracing subscriber setup: console formatter, run log file, and initialisation.
//!
//! The run log lives under the cache directory in `$HOME`, so it is only
//! opened for runs that are allowed to write there. Dry runs log to the
//! console alone.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};
use crate::tasks::RunOptions;

/// Tracing target for stage headers.
pub(super) const STAGE_TARGET: &str = "bootstrap::stage";
/// Tracing target for dry-run action messages.
pub(super) const DRY_RUN_TARGET: &str = "bootstrap::dry_run";
/// Tracing target for recorded step outcomes (log file only).
pub(super) const STEP_TARGET: &str = "bootstrap::step";

/// Collects the message and step fields of a [`tracing::Event`].
#[derive(Default)]
struct EventFields {
    message: String,
    status: Option<String>,
    detail: Option<String>,
}

impl EventFields {
    fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "status" => self.status = Some(value),
            "detail" if !value.is_empty() => self.detail = Some(value),
            _ => {}
        }
    }
}

impl tracing::field::Visit for EventFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.set(field.name(), value.to_string());
    }
}

/// Short flag list for the log header, e.g. `-v -e` or `none`.
fn flag_summary(opts: RunOptions) -> String {
    let flags: Vec<&str> = [
        (opts.verbose, "-v"),
        (opts.interactive, "-i"),
        (opts.exit_on_error, "-e"),
        (opts.dry_run, "-d"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    if flags.is_empty() {
        "none".to_string()
    } else {
        flags.join(" ")
    }
}

/// Where this run's log file goes, or `None` when the run must not write one.
pub(super) fn run_log_path(opts: RunOptions) -> Option<PathBuf> {
    (!opts.dry_run).then(log_file_path)
}

/// A [`tracing_subscriber::Layer`] that appends all events to the run log
/// with timestamps and ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the parent directory, truncate the log at `path`, write a run
    /// header naming the active flags, and return a layer that appends to it.
    ///
    /// Returns `None` if the file cannot be written.
    pub(super) fn new(path: &Path, opts: RunOptions) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version = option_env!("BOOTSTRAP_VERSION")
            .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             Bootstrap {version} {}\n\
             flags: {}\n\
             ==========================================\n",
            format_utc_datetime(),
            flag_summary(opts),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let fields = EventFields::of(event);
        let msg = strip_ansi(&fields.message);
        let ts = format_utc_time();

        let line = match (*metadata.level(), metadata.target()) {
            (_, STEP_TARGET) => {
                let status = fields.status.as_deref().unwrap_or("unknown");
                match fields.detail {
                    Some(detail) => format!("[{ts}]     [step] {msg}: {status} ({detail})"),
                    None => format!("[{ts}]     [step] {msg}: {status}"),
                }
            }
            (tracing::Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::INFO, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console formatter: `==>` stage headers, indented info lines, and
/// coloured warnings and errors. Step records are left to the log file.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let target = metadata.target();
        if target == STEP_TARGET {
            return Ok(());
        }
        let msg = EventFields::of(event).message;

        match *metadata.level() {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO if target == DRY_RUN_TARGET => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber for a run with `opts`.
///
/// Console output shows debug lines only when `opts.verbose`. Unless
/// `opts.dry_run` is set, every event is also written to
/// `$XDG_CACHE_HOME/dotfiles/bootstrap.log`. Returns the log file path when
/// one was opened. Must be called once at program startup, before any logging.
pub fn init_subscriber(opts: RunOptions) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if opts.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let (path, file_layer) = run_log_path(opts)
        .and_then(|path| FileLayer::new(&path, opts).map(|layer| (path, layer)))
        .unzip();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer.map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();

    path
}
