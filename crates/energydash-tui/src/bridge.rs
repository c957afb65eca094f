//! Bridge from `tracing` output to TUI log messages.
//!
//! While the TUI owns the terminal, log lines cannot go to stderr. Install a
//! subscriber whose writer is a [`TuiLogWriter`] and each formatted event is
//! delivered to the log panel instead.

use std::io;

use crossbeam_channel::Sender;
use tracing_subscriber::fmt::MakeWriter;

use crate::messages::TuiMessage;

/// `tracing-subscriber` writer that forwards each line to the TUI channel.
#[derive(Clone)]
pub struct TuiLogWriter {
    tx: Sender<TuiMessage>,
}

impl TuiLogWriter {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl io::Write for TuiLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            // A full or disconnected channel drops the line.
            let _ = self.tx.try_send(TuiMessage::Log(line.trim_end().to_string()));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for TuiLogWriter {
    type Writer = TuiLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
