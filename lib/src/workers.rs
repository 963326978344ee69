//! The pool of worker threads for multithreaded generations.
//!
//! Every worker owns a fixed, contiguous range of cells. A generation goes
//! like this:
//!
//! 1. The driver posts the [`Signal`] of every worker.
//! 2. Each worker decides the next state of the cells in its range,
//!    without changing anything.
//! 3. The workers wait on the `prepared` barrier, so that every decision
//!    is based on the old neighbour counts.
//! 4. Each worker applies its own deltas to the world.
//! 5. The workers and the driver wait on the `finished` barrier.
//!
//! A panic in a worker is caught, so that it still reaches both barriers.
//! The driver then resumes the panic, as if it had happened in its own
//! thread.

use crate::{
    error::Error,
    game::{apply, decide},
    rules::GameRules,
    sync::{Barrier, Signal},
    world::World,
};
use log::{debug, error, trace};
use std::{
    any::Any,
    io,
    ops::Range,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

/// The body of a worker thread.
pub(crate) type Worker = Box<dyn FnOnce() + Send + 'static>;

/// Spawns a worker thread with the std thread builder.
pub(crate) fn spawn(builder: thread::Builder, worker: Worker) -> io::Result<JoinHandle<()>> {
    builder.spawn(worker)
}

/// State shared by the driver and all the workers.
struct Shared<R> {
    world: Arc<World>,
    rules: Arc<R>,
    /// One start signal for each worker.
    signals: Vec<Signal>,
    /// All workers have decided.
    prepared: Barrier,
    /// All workers have applied their deltas. The driver waits here too.
    finished: Barrier,
    /// Tells the workers to exit.
    stop: AtomicBool,
    /// How long a worker waits for its signal before checking `stop`.
    timeout: Duration,
    /// The first panic caught in the current generation.
    panicked: Mutex<Option<Box<dyn Any + Send>>>,
}

impl<R> Shared<R> {
    /// Runs `f`, and keeps its panic for the driver.
    fn catch<T: Default>(&self, f: impl FnOnce() -> T) -> T {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            self.panicked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(payload);
            T::default()
        })
    }
}

/// Splits `0..len` into `n` contiguous ranges of almost equal length.
///
/// The last ranges may be empty when `len` is small.
pub(crate) fn partitions(len: usize, n: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let chunk = (len + n - 1) / n;
    (0..n)
        .map(|i| (i * chunk).min(len)..((i + 1) * chunk).min(len))
        .collect()
}

/// A fixed set of long-lived worker threads.
pub(crate) struct WorkerPool<R: GameRules + 'static> {
    shared: Arc<Shared<R>>,
    handles: Vec<JoinHandle<()>>,
}

impl<R: GameRules + 'static> WorkerPool<R> {
    /// Starts `threads` workers for the given world, spawning each one
    /// with `spawn`.
    ///
    /// If some thread cannot be spawned, the ones already started are
    /// stopped and joined before returning the error.
    pub(crate) fn new<S>(
        world: Arc<World>,
        rules: Arc<R>,
        threads: usize,
        timeout: Duration,
        mut spawn: S,
    ) -> Result<Self, Error>
    where
        S: FnMut(thread::Builder, Worker) -> io::Result<JoinHandle<()>>,
    {
        let ranges = partitions(world.len(), threads);
        let shared = Arc::new(Shared {
            world,
            rules,
            signals: (0..threads).map(|_| Signal::new()).collect(),
            prepared: Barrier::new(threads),
            finished: Barrier::new(threads + 1),
            stop: AtomicBool::new(false),
            timeout,
            panicked: Mutex::new(None),
        });
        let mut pool = WorkerPool {
            shared,
            handles: Vec::with_capacity(threads),
        };
        for (id, range) in ranges.into_iter().enumerate() {
            let shared = Arc::clone(&pool.shared);
            let builder = thread::Builder::new().name(format!("rlifesim-worker-{}", id));
            let handle = spawn(builder, Box::new(move || work(&shared, id, range)))
                .map_err(|e| Error::ResourceExhausted(e.to_string()))?;
            pool.handles.push(handle);
        }
        debug!("started {} worker threads", threads);
        Ok(pool)
    }

    /// Number of worker threads.
    pub(crate) fn threads(&self) -> usize {
        self.handles.len()
    }

    /// Runs the decide and apply phases of one generation on all workers,
    /// and blocks until every worker is done.
    ///
    /// # Panics
    ///
    /// Resumes the first panic of a worker in this generation.
    pub(crate) fn run_generation(&self) {
        for signal in &self.shared.signals {
            signal.post();
        }
        self.shared.finished.arrive_and_wait();
        let payload = self
            .shared
            .panicked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(payload) = payload {
            error!("a worker panicked during the generation");
            panic::resume_unwind(payload);
        }
    }
}

impl<R: GameRules + 'static> Drop for WorkerPool<R> {
    fn drop(&mut self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().map(String::from);
            if handle.join().is_err() {
                error!("worker {:?} panicked", name);
            }
        }
        debug!("stopped all worker threads");
    }
}

/// The main loop of a worker.
fn work<R: GameRules>(shared: &Shared<R>, id: usize, range: Range<usize>) {
    trace!("worker {} owns cells {:?}", id, range);
    while !shared.stop.load(Ordering::SeqCst) {
        if !shared.signals[id].wait_timeout(shared.timeout) {
            continue;
        }
        let deltas = shared.catch(|| decide(&shared.world, shared.rules.as_ref(), range.clone()));
        shared.prepared.arrive_and_wait();
        shared.catch(|| apply(&shared.world, shared.rules.as_ref(), &deltas));
        shared.finished.arrive_and_wait();
    }
    trace!("worker {} exits", id);
}
