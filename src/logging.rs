//! Tracing setup: a daily rolling log file plus an in-process mirror of every line.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "grusin.log";

/// Keeps the file writer flushing. Dropping it stops file output.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    log_dir: PathBuf,
    lines: Option<Receiver<String>>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Formatted log lines, for an in-app log console. Yields the receiver once.
    pub fn take_lines(&mut self) -> Option<Receiver<String>> {
        self.lines.take()
    }
}

#[derive(Clone)]
struct Sink {
    file: NonBlocking,
    lines: Sender<String>,
}

impl<'a> MakeWriter<'a> for Sink {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            file: self.file.make_writer(),
            lines: self.lines.clone(),
            pending: Vec::new(),
        }
    }
}

/// Writes one formatted event to the file and mirrors each completed line to the channel.
struct EventWriter {
    file: NonBlocking,
    lines: Sender<String>,
    pending: Vec<u8>,
}

impl EventWriter {
    fn send_line(&self, bytes: &[u8]) {
        let line = String::from_utf8_lossy(bytes);
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            // Nobody listening is fine.
            let _ = self.lines.send(line.to_string());
        }
    }
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.file.write(buf)?;
        self.pending.extend_from_slice(&buf[..written]);
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let rest = self.pending.split_off(end + 1);
            let line = std::mem::replace(&mut self.pending, rest);
            self.send_line(&line[..end]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.send_line(&pending);
        }
    }
}

fn ensure_dir(dir: PathBuf) -> Option<PathBuf> {
    std::fs::create_dir_all(&dir).ok().map(|_| dir)
}

/// Installs the global subscriber writing to a daily file in `log_dir`, or a temp dir when that
/// cannot be created. `RUST_LOG` overrides `default_filter`. Returns `None` if a subscriber is
/// already set.
pub fn init(log_dir: Option<PathBuf>, default_filter: &str) -> Option<LoggingGuard> {
    let log_dir = log_dir
        .and_then(ensure_dir)
        .or_else(|| ensure_dir(std::env::temp_dir().join("grusin").join("logs")))?;

    let (file, worker) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, LOG_FILE));
    let (tx, rx) = mpsc::channel();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Sink { file, lines: tx })
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic");
    }));
    tracing::info!(log_dir = %log_dir.display(), filter = default_filter, "logging initialized");

    Some(LoggingGuard {
        _worker: worker,
        log_dir,
        lines: Some(rx),
    })
}
