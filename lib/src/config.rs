//! Game configuration.

use crate::{error::Error, game::GameOfLife, rules::Rules};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether to compute the generations in worker threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Threading {
    /// Use worker threads when the world has more cells than
    /// the [`multithread_threshold`](Config#structfield.multithread_threshold).
    #[default]
    Auto,
    /// Never use worker threads.
    Single,
    /// Always use worker threads.
    Multi,
}

/// Game configuration.
///
/// The defaults describe a 5×10 world with Conway's rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub columns: usize,

    /// The rules of the game.
    pub rules: Rules,

    /// Whether to use worker threads.
    pub threading: Threading,

    /// With [`Threading::Auto`], worker threads are used when the world
    /// has more cells than this.
    pub multithread_threshold: usize,

    /// Number of worker threads.
    ///
    /// `None` means the available parallelism of the machine.
    pub threads: Option<usize>,

    /// Upper bound on the number of worker threads.
    pub max_threads: usize,

    /// How long an idle worker sleeps before checking whether the game has
    /// been dropped.
    pub wait_timeout: Duration,

    /// Seed for the random initial figures.
    ///
    /// `None` means a random seed.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(rows: usize, columns: usize) -> Self {
        Config {
            rows,
            columns,
            ..Config::default()
        }
    }

    /// Sets the rules.
    pub fn set_rules<T: Into<Rules>>(mut self, rules: T) -> Self {
        self.rules = rules.into();
        self
    }

    /// Sets whether to use worker threads.
    pub fn set_threading(mut self, threading: Threading) -> Self {
        self.threading = threading;
        self
    }

    /// Sets the threshold for [`Threading::Auto`].
    pub fn set_multithread_threshold(mut self, threshold: usize) -> Self {
        self.multithread_threshold = threshold;
        self
    }

    /// Sets the number of worker threads.
    pub fn set_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the upper bound on the number of worker threads.
    pub fn set_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Sets how long idle workers sleep between checks.
    pub fn set_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Sets the seed of the random initial figures.
    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.rows == 0 || self.columns == 0 || self.max_threads == 0 {
            return Err(Error::NonPositive);
        }
        if self.threads == Some(0) {
            return Err(Error::NonPositive);
        }
        if self.rows.checked_mul(self.columns).is_none() {
            return Err(Error::TooLarge(self.rows, self.columns));
        }
        Ok(())
    }

    /// Creates a new game from the configuration.
    pub fn game(&self) -> Result<GameOfLife, Error> {
        GameOfLife::with_rules(self, self.rules.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 5,
            columns: 10,
            rules: Rules::default(),
            threading: Threading::default(),
            multithread_threshold: 40,
            threads: None,
            max_threads: 100,
            wait_timeout: Duration::from_millis(1),
            seed: None,
        }
    }
}
