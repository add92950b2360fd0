//! Frame delivery: a bounded queue and a worker thread.
//!
//! The source side pushes frames through a [`FrameSender`]; when the worker
//! falls behind and the queue is full, the incoming frame is dropped rather
//! than blocking the source or growing the queue. The worker thread owns the
//! pipeline state and runs one callback per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError, TrySendError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::frame::Frame;

/// Default queue depth; deep enough to ride out a scheduling hiccup, shallow
/// enough that the pipeline never works on stale frames.
pub const DEFAULT_QUEUE_DEPTH: usize = 3;

// Poll delay when the queue is empty; the worker never parks on the queue,
// so the running flag is re-checked at this cadence.
const POLL_DELAY: Duration = Duration::from_millis(5);

/// Producer half of the frame queue.
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: SyncSender<Frame>,
}

impl FrameSender {
    /// Enqueue a frame. Returns `false` when the queue was full and the
    /// frame was dropped.
    pub fn send(&self, frame: Frame) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("frame queue full, dropping frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!("frame queue receiver gone, dropping frame");
                false
            }
        }
    }
}

/// Bounded frame queue of the given depth.
pub fn frame_queue(depth: usize) -> (FrameSender, Receiver<Frame>) {
    let (tx, rx) = sync_channel(depth);
    (FrameSender { tx }, rx)
}

/// A worker thread draining a frame queue into a callback. Stops on request
/// or when every sender is gone.
#[derive(Debug)]
pub struct Session {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Session {
    /// Spawn the worker. `on_frame` owns all per-frame pipeline state.
    pub fn spawn<F>(rx: Receiver<Frame>, mut on_frame: F) -> Self
    where
        F: FnMut(Frame) + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = std::thread::spawn(move || {
            tracing::debug!("frame worker started");
            while flag.load(Ordering::Relaxed) {
                match rx.try_recv() {
                    Ok(frame) => on_frame(frame),
                    Err(TryRecvError::Empty) => std::thread::sleep(POLL_DELAY),
                    Err(TryRecvError::Disconnected) => break,
                }
            }
            tracing::debug!("frame worker stopped");
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Ask the worker to stop and wait for it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            // A panic in the callback already tore the session down.
            let _ = handle.join();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
