//! Background snapshot writer.
//!
//! Mutations hand full snapshots to a dedicated thread and return at once.
//! Snapshots are complete overwrites, so when several are queued only the
//! newest is written. Write failures are logged and dropped.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::error::ShinyResult;
use crate::storage::{ARCHIVE_KEY, CURRENT_KEY, KeyValueStore};

/// Both encoded blobs, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Encoded archive list.
    pub archive: String,
    /// Encoded current session.
    pub current: String,
}

enum Message {
    Write(Snapshot),
    Flush(Sender<()>),
}

/// Owns the writer thread. Dropping it drains the queue and joins.
pub struct SessionWriter {
    tx: Option<Sender<Message>>,
    handle: Option<JoinHandle<()>>,
}

impl SessionWriter {
    /// Start the writer thread, taking ownership of the backend.
    pub fn spawn(backend: Box<dyn KeyValueStore>) -> ShinyResult<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("shiny-writer".into())
            .spawn(move || run(backend, rx))?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a snapshot. Never blocks.
    pub fn submit(&self, snapshot: Snapshot) {
        let sent = self
            .tx
            .as_ref()
            .is_some_and(|tx| tx.send(Message::Write(snapshot)).is_ok());
        if !sent {
            tracing::warn!("writer thread is gone, snapshot dropped");
        }
    }

    /// Block until every snapshot queued so far has been attempted.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for SessionWriter {
    fn drop(&mut self) {
        drop(self.tx.take());
        let panicked = self
            .handle
            .take()
            .is_some_and(|handle| handle.join().is_err());
        if panicked {
            tracing::warn!("writer thread panicked");
        }
    }
}

fn run(mut backend: Box<dyn KeyValueStore>, rx: Receiver<Message>) {
    while let Ok(first) = rx.recv() {
        let mut latest = None;
        let mut acks = Vec::new();
        let mut next = Some(first);
        while let Some(message) = next {
            match message {
                Message::Write(snapshot) => latest = Some(snapshot),
                Message::Flush(ack) => {
                    acks.push(ack);
                    break;
                }
            }
            next = rx.try_recv().ok();
        }
        if let Some(snapshot) = latest {
            write(backend.as_mut(), &snapshot);
        }
        for ack in acks {
            let _ = ack.send(());
        }
    }
    tracing::debug!("writer thread finished");
}

// Current goes first: if the second write fails, a completed hunt is lost
// from the archive instead of surviving as both current and archived.
fn write(backend: &mut dyn KeyValueStore, snapshot: &Snapshot) {
    let result = backend
        .set(CURRENT_KEY, &snapshot.current)
        .and_then(|()| backend.set(ARCHIVE_KEY, &snapshot.archive));
    match result {
        Ok(()) => tracing::debug!("snapshot written"),
        Err(e) => tracing::warn!("dropping snapshot, write failed: {e}"),
    }
}
