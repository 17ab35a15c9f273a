//! Background document loading
//!
//! Extraction can take seconds on long documents, so it runs on its own
//! thread. Starting a new load drops the receiver of the previous one, so
//! only the newest result is ever handed back. The worker wakes the UI
//! with `request_repaint` when it finishes.

use crate::extract::{self, Document, ExtractOptions, LoadError};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// What the UI gets back from a finished load
pub struct LoadOutcome {
    pub path: PathBuf,
    pub result: Result<Document, LoadError>,
}

struct Pending {
    ticket: u64,
    path: PathBuf,
    rx: Receiver<Result<Document, LoadError>>,
}

pub struct Loader {
    options: ExtractOptions,
    next_ticket: u64,
    pending: Option<Pending>,
}

impl Loader {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Start loading `path`. Supersedes any load already running.
    /// `wake` runs on the worker thread once the result is sent.
    pub fn start(&mut self, path: PathBuf, wake: impl FnOnce() + Send + 'static) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let (tx, rx) = mpsc::channel();
        let options = self.options;
        let worker_path = path.clone();

        tracing::debug!("load #{} started for {}", ticket, path.display());
        std::thread::spawn(move || {
            let result = extract::open_document(&worker_path, options);
            // The receiver is gone if a newer load replaced this one.
            let _ = tx.send(result);
            wake();
        });

        if let Some(old) = self.pending.replace(Pending { ticket, path, rx }) {
            tracing::debug!("load #{} superseded", old.ticket);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// File currently being loaded
    pub fn loading_path(&self) -> Option<&Path> {
        self.pending.as_ref().map(|p| p.path.as_path())
    }

    /// Non-blocking check for a finished load.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let result = match self.pending.as_ref()?.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::WorkerLost),
        };
        let pending = self.pending.take()?;
        tracing::debug!("load #{} finished", pending.ticket);
        Some(LoadOutcome {
            path: pending.path,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::time::{Duration, Instant};

    fn wait(loader: &mut Loader) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(30);
        loop {
            if let Some(outcome) = loader.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "load timed out");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_load_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "doc.pdf", 2, None);
        let mut loader = Loader::new(ExtractOptions::default());
        assert!(!loader.is_loading());

        loader.start(path.clone(), || {});
        assert!(loader.is_loading());
        assert_eq!(loader.loading_path(), Some(path.as_path()));

        let outcome = wait(&mut loader);
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.result.unwrap().page_count(), 2);
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_newer_load_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = fixtures::write_pdf(dir.path(), "first.pdf", 3, None);
        let second = fixtures::write_pdf(dir.path(), "second.pdf", 1, None);
        let mut loader = Loader::new(ExtractOptions::default());

        loader.start(first, || {});
        loader.start(second.clone(), || {});

        let outcome = wait(&mut loader);
        assert_eq!(outcome.path, second);
        assert_eq!(outcome.result.unwrap().page_count(), 1);
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(ExtractOptions::default());
        loader.start(dir.path().join("missing.pdf"), || {});
        let outcome = wait(&mut loader);
        assert!(matches!(outcome.result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_wake_is_called() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write_pdf(dir.path(), "doc.pdf", 1, None);
        let (tx, rx) = mpsc::channel();
        let mut loader = Loader::new(ExtractOptions::default());
        loader.start(path, move || {
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(30)).unwrap();
        assert!(wait(&mut loader).result.is_ok());
    }
}
