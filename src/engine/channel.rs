use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

/// Unbounded FIFO handoff from fetch workers to one tab's poll loop.
///
/// `pending` counts handed-out senders whose message has not been taken yet. A sender
/// dropped without `put` (worker never started) releases its slot on drop.
pub struct ResultChannel<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    pending: Arc<AtomicUsize>,
}

impl<T> Default for ResultChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultChannel<T> {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A single-use producer handle for one fetch.
    pub fn sender(&self) -> ResultSender<T> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        ResultSender {
            tx: Some(self.tx.clone()),
            pending: Arc::clone(&self.pending),
        }
    }

    /// Non-blocking take of the oldest message.
    pub fn try_take(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(msg) => {
                self.pending.fetch_sub(1, Ordering::SeqCst);
                Some(msg)
            }
            // The channel keeps its own sender, so Disconnected cannot happen.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Results promised or queued but not yet taken.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

pub struct ResultSender<T> {
    tx: Option<Sender<T>>,
    pending: Arc<AtomicUsize>,
}

impl<T> ResultSender<T> {
    /// Hands `value` to the consumer. Never blocks; consumes the handle.
    pub fn put(mut self, value: T) {
        if let Some(tx) = self.tx.take() {
            if tx.send(value).is_err() {
                // Tab is gone, nobody is waiting.
                log::debug!("Result dropped: consumer no longer exists");
            }
        }
    }
}

impl<T> Drop for ResultSender<T> {
    fn drop(&mut self) {
        if self.tx.is_some() {
            log::warn!("Result sender dropped without a result");
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
