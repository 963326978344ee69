//! Synchronization between the driver and the worker threads.

use std::{
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct BarrierState {
    /// Number of parties that have arrived in the current round.
    arrived: usize,
    /// Number of completed rounds.
    round: u64,
}

/// A reusable barrier for a fixed number of parties.
///
/// Each round releases everyone once the last party arrives,
/// and then the barrier is ready for the next round.
#[derive(Debug)]
pub struct Barrier {
    parties: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

impl Barrier {
    /// Creates a barrier for `parties` parties.
    ///
    /// A barrier with zero parties never blocks.
    pub fn new(parties: usize) -> Self {
        Barrier {
            parties,
            state: Mutex::new(BarrierState::default()),
            cvar: Condvar::new(),
        }
    }

    /// Number of parties in each round.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Arrives at the barrier, and blocks until all the parties have arrived.
    ///
    /// Returns `true` for the last party to arrive.
    pub fn arrive_and_wait(&self) -> bool {
        let mut state = lock(&self.state);
        state.arrived += 1;
        if state.arrived >= self.parties {
            state.arrived = 0;
            state.round = state.round.wrapping_add(1);
            self.cvar.notify_all();
            return true;
        }
        let round = state.round;
        while state.round == round {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        false
    }
}

/// A binary semaphore.
///
/// The driver posts it to start one worker; the worker takes it.
#[derive(Debug, Default)]
pub struct Signal {
    posted: Mutex<bool>,
    cvar: Condvar,
}

impl Signal {
    /// Creates a signal that has not been posted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts the signal, waking up a waiting thread.
    pub fn post(&self) {
        *lock(&self.posted) = true;
        self.cvar.notify_one();
    }

    /// Waits for the signal for at most `timeout`, and takes it.
    ///
    /// Returns `false` if the signal was not posted in time.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let posted = lock(&self.posted);
        let (mut posted, _) = self
            .cvar
            .wait_timeout_while(posted, timeout, |posted| !*posted)
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *posted, false)
    }
}
