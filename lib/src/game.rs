//! The game: advancing the world one generation at a time.

use crate::{
    cells::Coord,
    config::{Config, Threading},
    error::Error,
    figure::{Figure, InitialFigure},
    render::Renderer,
    rules::{GameRules, Rules},
    workers::{self, Worker, WorkerPool},
    world::World,
};
use log::{debug, error, info, warn};
use rand::Rng;
use std::{
    io,
    ops::Range,
    sync::Arc,
    thread::{self, JoinHandle},
};

/// A cell that changes its state in the next generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighbourDelta {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub column: usize,
    /// The new state. `true` means alive.
    pub alive: bool,
}

/// Decides the next state of the cells with linear indices in `range`.
///
/// Only the cells whose state changes are returned.
/// Nothing in the world is modified.
pub(crate) fn decide<R: GameRules + ?Sized>(
    world: &World,
    rules: &R,
    range: Range<usize>,
) -> Vec<NeighbourDelta> {
    let columns = world.columns();
    range
        .filter_map(|index| {
            let cell = world.cell_by_index(index)?;
            let alive = rules.next_state(cell);
            (alive != cell.is_alive()).then(|| NeighbourDelta {
                row: index / columns,
                column: index % columns,
                alive,
            })
        })
        .collect()
}

/// Applies the deltas to the world.
pub(crate) fn apply<R: GameRules + ?Sized>(world: &World, rules: &R, deltas: &[NeighbourDelta]) {
    for delta in deltas {
        let result = if delta.alive {
            world.make_cell_alive(delta.row, delta.column, rules)
        } else {
            world.make_cell_died(delta.row, delta.column, rules)
        };
        if let Err(e) = result {
            error!("dropped {:?}: {}", delta, e);
        }
    }
}

/// The Game of Life.
///
/// It owns the world and the rules, and, for large worlds, a pool of
/// worker threads that lives as long as the game.
pub struct GameOfLife<R: GameRules + 'static = Rules> {
    world: Arc<World>,
    rules: Arc<R>,
    generations_count: u32,
    /// `None` means single-threaded.
    workers: Option<WorkerPool<R>>,
    /// Seed of the random initial figures. `None` means a random seed.
    seed: Option<u64>,
}

impl GameOfLife {
    /// Creates a `rows × columns` game with the default configuration.
    pub fn new(rows: usize, columns: usize) -> Result<Self, Error> {
        Config::new(rows, columns).game()
    }
}

impl<R: GameRules + 'static> GameOfLife<R> {
    /// Creates a game from a configuration, with the given rules instead of
    /// those in the configuration.
    ///
    /// If the worker threads cannot be started, the game runs in a single
    /// thread.
    pub fn with_rules(config: &Config, rules: R) -> Result<Self, Error> {
        Self::with_spawner(config, rules, workers::spawn)
    }

    /// Same as [`with_rules`](Self::with_rules), but worker threads are
    /// started by `spawn`.
    pub(crate) fn with_spawner<S>(config: &Config, rules: R, spawn: S) -> Result<Self, Error>
    where
        S: FnMut(thread::Builder, Worker) -> io::Result<JoinHandle<()>>,
    {
        config.validate()?;
        let world = Arc::new(World::new(config.rows, config.columns));
        let rules = Arc::new(rules);

        let cells = config.rows * config.columns;
        let multithread = match config.threading {
            Threading::Single => false,
            Threading::Multi => true,
            Threading::Auto => cells > config.multithread_threshold,
        };
        let workers = if multithread {
            match thread_count(config).and_then(|threads| {
                WorkerPool::new(
                    Arc::clone(&world),
                    Arc::clone(&rules),
                    threads,
                    config.wait_timeout,
                    spawn,
                )
            }) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("{}, falling back to a single thread", e);
                    None
                }
            }
        } else {
            None
        };

        info!(
            "new {}×{} game, {} worker threads",
            config.rows,
            config.columns,
            workers.as_ref().map_or(0, WorkerPool::threads)
        );

        Ok(GameOfLife {
            world,
            rules,
            generations_count: 0,
            workers,
            seed: config.seed,
        })
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The rules.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Number of generations computed so far.
    pub fn generations_count(&self) -> u32 {
        self.generations_count
    }

    /// Whether the generations are computed by worker threads.
    pub fn is_multithreaded(&self) -> bool {
        self.workers.is_some()
    }

    /// Number of worker threads, `0` when single-threaded.
    pub fn thread_count(&self) -> usize {
        self.workers.as_ref().map_or(0, WorkerPool::threads)
    }

    /// Makes the given cells alive and commits the initial fingerprint.
    pub fn set_initial_cells(&mut self, points: &[Coord]) -> Result<(), Error> {
        self.world.set_initial_cells(points, self.rules.as_ref())?;
        self.world.update_hash();
        Ok(())
    }

    /// Draws one of the initial figures into the world, and commits the
    /// initial fingerprint.
    pub fn fill_initial_picture(&mut self, figure: Figure) -> Result<(), Error> {
        let rows = self.world.rows();
        let columns = self.world.columns();
        let mut builder = match self.seed {
            Some(seed) => InitialFigure::with_seed(rows, columns, seed),
            None => InitialFigure::with_seed(rows, columns, rand::thread_rng().gen()),
        };
        builder.build(figure);
        debug!("initial figure {:?}: {:?}", figure, builder.points());
        self.set_initial_cells(builder.points())
    }

    /// Computes the next generation.
    pub fn execute_next_generation(&mut self) {
        match &self.workers {
            Some(workers) => workers.run_generation(),
            None => {
                let deltas = decide(&self.world, self.rules.as_ref(), 0..self.world.len());
                apply(&self.world, self.rules.as_ref(), &deltas);
            }
        }
        self.world.update_hash();
        self.generations_count += 1;
        debug!(
            "generation {}: {} alive, {} repeats",
            self.generations_count,
            self.world.alive_cell_count(),
            self.world.equal_world_count()
        );
    }

    /// Whether the game is over.
    pub fn is_game_over(&self) -> bool {
        self.rules.is_game_over(
            self.world.alive_cell_count(),
            self.world.equal_world_count(),
            self.generations_count,
        )
    }

    /// Draws the world.
    ///
    /// Errors of the renderer are logged, not returned.
    pub fn draw<D: Renderer + ?Sized>(&self, renderer: &mut D) {
        if let Err(e) = renderer.draw(&self.world.snapshot()) {
            error!("{}", e);
        }
    }
}

/// Number of worker threads for a configuration.
fn thread_count(config: &Config) -> Result<usize, Error> {
    let threads = match config.threads {
        Some(threads) => threads,
        None => thread::available_parallelism()
            .map_err(|e| Error::ResourceExhausted(e.to_string()))?
            .get(),
    };
    Ok(threads.clamp(1, config.max_threads))
}
