//! Toggle button fed from standard input.
//!
//! Every line read from stdin is one press. A press is reported as
//! `Pressed` for exactly one sample and `Released` on the next, so presses
//! queued faster than the poll interval are still seen one by one.
//!
//! Lines are read on a plain OS thread, outside the tokio blocking pool. A
//! read that never returns therefore cannot hold up runtime shutdown, and
//! Ctrl+C ends the process even while stdin is held open.

use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use sg_05_policy::{InputLevel, PolicyInput};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct StdinButton {
    pending: AtomicU32,
    held: AtomicBool,
}

impl StdinButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one press.
    pub fn press(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    /// Read stdin line by line, queuing a press per line, until EOF.
    pub fn spawn_reader(self: &Arc<Self>) -> std::io::Result<JoinHandle<()>> {
        self.spawn_line_reader(BufReader::new(std::io::stdin()))
    }

    /// Queue a press per line of `reader` on a detached thread, until EOF.
    pub fn spawn_line_reader<R>(self: &Arc<Self>, reader: R) -> std::io::Result<JoinHandle<()>>
    where
        R: BufRead + Send + 'static,
    {
        let button = Arc::clone(self);
        thread::Builder::new()
            .name("sg-button".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    if let Err(e) = line {
                        warn!(error = %e, "Stopped reading button input");
                        return;
                    }
                    debug!("Button press from stdin");
                    button.press();
                }
            })
    }
}

impl PolicyInput for StdinButton {
    fn read_level(&self) -> InputLevel {
        if self.held.swap(false, Ordering::SeqCst) {
            return InputLevel::Released;
        }

        let took = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if took {
            self.held.store(true, Ordering::SeqCst);
            InputLevel::Pressed
        } else {
            InputLevel::Released
        }
    }
}
