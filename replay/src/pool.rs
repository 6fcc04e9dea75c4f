//! Fixed-size pool of worker threads for offline log processing
//!
//! Each worker owns a bounded queue. One producer hands out items round-robin
//! and blocks while the chosen queue is full. Stopping is cooperative: a
//! worker checks the stop flag between items, and whatever is still queued
//! when the pool shuts down is processed on the calling thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::ReplayError;

pub const QUEUE_CAPACITY: usize = 1000;

/// Cloneable handle that asks the workers to stop after their current item
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct WorkerPool<T: Send + 'static> {
    senders: Vec<mpsc::Sender<T>>,
    workers: Vec<JoinHandle<mpsc::Receiver<T>>>,
    work: Arc<dyn Fn(T) + Send + Sync>,
    next: usize,
    stop: StopSignal,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Start `threads` workers (at least one), each running `work` on the
    /// items it receives
    pub fn new<F>(threads: usize, work: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let threads = threads.max(1);
        let work: Arc<dyn Fn(T) + Send + Sync> = Arc::new(work);
        let stop = StopSignal::default();
        let mut senders = Vec::with_capacity(threads);
        let mut workers = Vec::with_capacity(threads);
        for index in 0..threads {
            let (sender, mut receiver) = mpsc::channel(QUEUE_CAPACITY);
            let work = Arc::clone(&work);
            let stop = stop.clone();
            workers.push(thread::spawn(move || {
                while !stop.is_stopped() {
                    match receiver.blocking_recv() {
                        Some(item) => work(item),
                        None => break,
                    }
                }
                // Wakes a producer blocked on this queue; queued items stay
                // readable for `finish`
                receiver.close();
                debug!("Worker {} finished", index);
                receiver
            }));
            senders.push(sender);
        }
        Self {
            senders,
            workers,
            work,
            next: 0,
            stop,
        }
    }

    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Queue `item` on the next worker, blocking while its queue is full.
    /// Fails once the pool has been told to stop.
    pub fn submit(&mut self, item: T) -> Result<(), ReplayError> {
        if self.stop.is_stopped() {
            return Err(ReplayError::PoolClosed);
        }
        let sender = &self.senders[self.next];
        self.next = (self.next + 1) % self.senders.len();
        sender.blocking_send(item).map_err(|_| ReplayError::PoolClosed)
    }

    /// Let the workers finish every queued item, then join them
    pub fn join(self) -> Result<(), ReplayError> {
        self.finish()
    }

    /// Stop the workers after their current item and process what is left in
    /// their queues on this thread
    pub fn shutdown(self) -> Result<(), ReplayError> {
        self.stop.stop();
        self.finish()
    }

    fn finish(self) -> Result<(), ReplayError> {
        let Self {
            senders,
            workers,
            work,
            ..
        } = self;
        // Closing the queues wakes workers waiting on an empty queue
        drop(senders);
        let mut panicked = false;
        let mut drained = 0;
        for worker in workers {
            match worker.join() {
                Ok(mut receiver) => {
                    while let Ok(item) = receiver.try_recv() {
                        work(item);
                        drained += 1;
                    }
                }
                Err(_) => panicked = true,
            }
        }
        if drained > 0 {
            debug!("Processed {} queued items after stopping", drained);
        }
        if panicked {
            warn!("A worker thread panicked");
            return Err(ReplayError::WorkerPanicked);
        }
        Ok(())
    }
}

/// Run `work` over every item on `threads` workers
pub fn for_each_parallel<T, I, F>(threads: usize, items: I, work: F) -> Result<(), ReplayError>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    F: Fn(T) + Send + Sync + 'static,
{
    let mut pool = WorkerPool::new(threads, work);
    for item in items {
        pool.submit(item)?;
    }
    pool.join()
}
