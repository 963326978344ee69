use rlifesim_lib::{
    rules::{Borders, Conway, GameLimits, LifeLike},
    Cell, Config, Coord, Error, Figure, GameOfLife, GameRules, PlaintextRenderer, Rules,
    Threading, World,
};
use std::{
    error::Error as StdError,
    panic::{self, AssertUnwindSafe},
    sync::mpsc,
    thread,
    time::Duration,
};

type TestResult = Result<(), Box<dyn StdError>>;

const NEIGHBOURS: [Coord; 20] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (2, 0),
    (2, 1),
    (2, 2),
    (1, 2),
    (3, 2),
    (1, 3),
    (1, 4),
    (2, 4),
    (3, 4),
    (3, 3),
    (4, 3),
    (5, 3),
    (5, 4),
    (5, 5),
    (4, 5),
    (3, 5),
];

fn neighbour_counts(world: &World) -> Result<Vec<u8>, Error> {
    NEIGHBOURS
        .iter()
        .map(|&(row, column)| Ok(world.cell_at(row, column)?.neighbour_count()))
        .collect()
}

/// Runs a game until it is over, and returns the number of generations.
fn play<R: GameRules + 'static>(game: &mut GameOfLife<R>) -> u32 {
    let mut generations = 0;
    while !game.is_game_over() {
        game.execute_next_generation();
        generations += 1;
    }
    generations
}

fn fast_config(rows: usize, columns: usize) -> Config {
    Config::new(rows, columns).set_wait_timeout(Duration::from_micros(200))
}

#[test]
fn non_square_world() -> TestResult {
    let world = World::new(6, 10);
    assert_eq!(world.rows(), 6);
    assert_eq!(world.columns(), 10);
    assert_eq!(world.alive_cell_count(), 0);
    assert_eq!(world.equal_world_count(), 0);

    let alive = [(1, 1), (2, 3), (4, 4)];
    world.set_initial_cells(&alive, &Conway)?;
    assert_eq!(world.alive_cell_count(), 3);
    assert_eq!(
        neighbour_counts(&world)?,
        [1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1]
    );
    assert_eq!(world.cell_at(2, 2)?.neighbour_count(), 2);
    assert_eq!(world.cell_at(0, 7)?.neighbour_count(), 0);
    assert_eq!(world.cell_at(5, 8)?.neighbour_count(), 0);

    for &(row, column) in &alive {
        world.make_cell_died(row, column, &Conway)?;
    }
    assert_eq!(world.alive_cell_count(), 0);
    assert!(neighbour_counts(&world)?.iter().all(|&n| n == 0));
    Ok(())
}

#[test]
fn square_world_with_equal_cells() -> TestResult {
    let world = World::new(10, 10);
    world.set_initial_cells(&[(4, 4), (2, 3), (4, 4)], &Conway)?;
    assert_eq!(world.alive_cell_count(), 2);
    assert_eq!(
        neighbour_counts(&world)?,
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1]
    );
    Ok(())
}

#[test]
fn idempotent() -> TestResult {
    let world = World::new(6, 10);
    world.make_cell_alive(3, 3, &Conway)?;
    let hash = world.hasher().hash();
    world.make_cell_alive(3, 3, &Conway)?;
    assert_eq!(world.alive_cell_count(), 1);
    assert_eq!(world.cell_at(2, 2)?.neighbour_count(), 1);
    assert_eq!(world.hasher().hash(), hash);

    world.make_cell_died(3, 3, &Conway)?;
    world.make_cell_died(3, 3, &Conway)?;
    assert_eq!(world.alive_cell_count(), 0);
    assert_eq!(world.cell_at(2, 2)?.neighbour_count(), 0);
    assert!(world.hasher().hash().iter().all(|&word| word == 0));
    Ok(())
}

#[test]
fn wraps_around_corners() -> TestResult {
    let world = World::new(6, 10);
    world.make_cell_alive(0, 0, &Conway)?;
    for coord in [(5, 9), (5, 0), (5, 1), (0, 9), (0, 1), (1, 9), (1, 0), (1, 1)] {
        assert_eq!(world.cell_at(coord.0, coord.1)?.neighbour_count(), 1);
    }
    assert_eq!(world.cell_at(0, 0)?.neighbour_count(), 0);
    Ok(())
}

#[test]
fn limited_borders() -> TestResult {
    let rule = LifeLike::new(&[3], &[2, 3]).set_borders(Borders::Limited);
    let world = World::new(6, 10);
    world.make_cell_alive(0, 0, &rule)?;
    assert_eq!(world.cell_at(1, 1)?.neighbour_count(), 1);
    assert_eq!(world.cell_at(5, 9)?.neighbour_count(), 0);
    assert_eq!(world.cell_at(0, 9)?.neighbour_count(), 0);
    assert_eq!(world.cell_at(5, 0)?.neighbour_count(), 0);
    Ok(())
}

#[test]
fn invalid_coordinates() {
    let world = World::new(6, 10);
    assert_eq!(world.cell_at(6, 0).err(), Some(Error::InvalidCoordinate(6, 0)));
    assert_eq!(world.cell_at(0, 10).err(), Some(Error::InvalidCoordinate(0, 10)));
    assert_eq!(
        world.make_cell_alive(6, 10, &Conway),
        Err(Error::InvalidCoordinate(6, 10))
    );
    assert_eq!(
        world.make_cell_died(7, 3, &Conway),
        Err(Error::InvalidCoordinate(7, 3))
    );
    assert_eq!(
        world.set_initial_cells(&[(1, 1), (9, 9), (2, 2)], &Conway),
        Err(Error::InvalidCoordinate(9, 9))
    );
    assert_eq!(world.alive_cell_count(), 1);

    let empty = World::new(0, 0);
    assert!(empty.is_empty());
    assert_eq!(empty.cell_at(0, 0).err(), Some(Error::InvalidCoordinate(0, 0)));
}

#[test]
fn world_hash() -> TestResult {
    let world = World::new(6, 10);
    let alive = [(1, 1), (2, 3), (4, 4)];

    world.set_initial_cells(&alive, &Conway)?;
    world.update_hash();
    assert_eq!(world.equal_world_count(), 0);

    for &(row, column) in &alive {
        world.make_cell_died(row, column, &Conway)?;
    }
    world.update_hash();
    assert_eq!(world.equal_world_count(), 0);

    world.set_initial_cells(&alive, &Conway)?;
    world.update_hash();
    assert_eq!(world.equal_world_count(), 1);

    world.update_hash();
    assert_eq!(world.equal_world_count(), 2);
    Ok(())
}

#[test]
fn line_big_scene() -> TestResult {
    let mut game = fast_config(100, 100).game()?;
    assert!(game.is_multithreaded());
    game.fill_initial_picture(Figure::CenterLine)?;
    assert_eq!(play(&mut game), 2);
    assert_eq!(game.world().alive_cell_count(), 3);
    Ok(())
}

#[test]
fn line_little_scene() -> TestResult {
    let mut game = GameOfLife::new(5, 5)?;
    assert!(!game.is_multithreaded());
    game.fill_initial_picture(Figure::CenterLine)?;
    assert_eq!(play(&mut game), 2);
    Ok(())
}

#[test]
fn point_big_scene() -> TestResult {
    let mut game = fast_config(100, 100).game()?;
    game.fill_initial_picture(Figure::CenterPoint)?;
    assert_eq!(game.world().alive_cell_count(), 1);
    assert_eq!(play(&mut game), 1);
    assert_eq!(game.world().alive_cell_count(), 0);
    Ok(())
}

#[test]
fn point_little_scene() -> TestResult {
    let mut game = GameOfLife::new(5, 5)?;
    game.fill_initial_picture(Figure::CenterPoint)?;
    assert!(!game.is_game_over());
    game.execute_next_generation();
    assert_eq!(game.world().alive_cell_count(), 0);
    assert!(game.is_game_over());
    Ok(())
}

#[test]
fn generation_limit() -> TestResult {
    // A block never changes, but the initial fingerprint is not committed
    // here, so only the second generation repeats.
    let mut game = GameOfLife::new(6, 6)?;
    game.world()
        .set_initial_cells(&[(1, 1), (1, 2), (2, 1), (2, 2)], game.rules())?;
    assert_eq!(play(&mut game), 2);
    assert_eq!(game.world().alive_cell_count(), 4);

    let rules = LifeLike::new(&[3], &[2, 3]).set_limits(GameLimits {
        max_equal_worlds: u32::MAX,
        ..GameLimits::default()
    });
    let mut game = GameOfLife::with_rules(&Config::new(6, 6), rules)?;
    game.set_initial_cells(&[(1, 1), (1, 2), (2, 1), (2, 2)])?;
    assert_eq!(play(&mut game), 21);
    Ok(())
}

fn glider(threading: Threading) -> TestResult {
    let rules = LifeLike::new(&[3], &[2, 3]).set_limits(GameLimits {
        max_generations: 1000,
        ..GameLimits::default()
    });
    let config = fast_config(8, 8)
        .set_threading(threading)
        .set_threads(Some(3));
    let mut game = GameOfLife::with_rules(&config, rules)?;
    game.set_initial_cells(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])?;
    assert_eq!(play(&mut game), 32);
    assert_eq!(game.world().alive_cell_count(), 5);
    assert_eq!(game.world().equal_world_count(), 1);
    Ok(())
}

#[test]
fn glider_single_thread() -> TestResult {
    glider(Threading::Single)
}

#[test]
fn glider_multithread() -> TestResult {
    glider(Threading::Multi)
}

#[test]
fn same_result_with_threads() -> TestResult {
    for seed in 0..3 {
        let config = fast_config(30, 30).set_seed(Some(seed));
        let mut single = config
            .clone()
            .set_threading(Threading::Single)
            .game()?;
        let mut multi = config
            .set_threading(Threading::Multi)
            .set_threads(Some(4))
            .game()?;
        assert_eq!(multi.thread_count(), 4);

        single.fill_initial_picture(Figure::Random)?;
        multi.fill_initial_picture(Figure::Random)?;
        assert_eq!(single.world().snapshot(), multi.world().snapshot());

        for _ in 0..10 {
            single.execute_next_generation();
            multi.execute_next_generation();
            assert_eq!(single.world().snapshot(), multi.world().snapshot());
            assert_eq!(single.world().hasher().hash(), multi.world().hasher().hash());
            assert_eq!(
                single.world().alive_cell_count(),
                multi.world().alive_cell_count()
            );
            assert_eq!(single.is_game_over(), multi.is_game_over());
        }
    }
    Ok(())
}

#[test]
fn neighbour_counts_stay_consistent() -> TestResult {
    let mut game = fast_config(20, 20)
        .set_seed(Some(11))
        .set_threads(Some(4))
        .game()?;
    game.fill_initial_picture(Figure::Random)?;
    for _ in 0..5 {
        game.execute_next_generation();
        let world = game.world();
        let grid = world.snapshot();
        let rows = grid.rows();
        let mut alive = 0;
        for row in 0..20 {
            for column in 0..20 {
                let expected = [
                    (19, 19),
                    (19, 0),
                    (19, 1),
                    (0, 19),
                    (0, 1),
                    (1, 19),
                    (1, 0),
                    (1, 1),
                ]
                .iter()
                .filter(|&&(dr, dc)| rows[(row + dr) % 20][(column + dc) % 20])
                .count();
                let cell = world.cell_at(row, column)?;
                assert_eq!(cell.neighbour_count() as usize, expected);
                alive += usize::from(cell.is_alive());
            }
        }
        assert_eq!(world.alive_cell_count(), alive as u64);
    }
    Ok(())
}

#[test]
fn workers_shut_down() -> TestResult {
    for _ in 0..5 {
        let mut game = fast_config(10, 10).set_threads(Some(8)).game()?;
        assert_eq!(game.thread_count(), 8);
        game.fill_initial_picture(Figure::Glider)?;
        game.execute_next_generation();
        drop(game);
    }
    Ok(())
}

#[test]
fn draw() -> TestResult {
    let mut game = GameOfLife::new(3, 4)?;
    game.set_initial_cells(&[(1, 0), (1, 1), (1, 2)])?;
    let mut renderer = PlaintextRenderer::new();
    game.draw(&mut renderer);
    assert_eq!(renderer.take(), "....\nooo.\n....\n");
    Ok(())
}

#[test]
fn rules_from_config() -> TestResult {
    let config = Config::new(6, 6).set_rules(LifeLike::new(&[1], &[]));
    assert!(matches!(config.rules, Rules::LifeLike(_)));
    let mut game = config.game()?;
    game.set_initial_cells(&[(2, 2)])?;
    game.execute_next_generation();
    assert_eq!(game.world().alive_cell_count(), 8);
    Ok(())
}

/// Conway's rules, except that evaluating a living cell panics.
struct Fragile;

impl GameRules for Fragile {
    fn next_state(&self, cell: &Cell) -> bool {
        assert!(!cell.is_alive(), "living cells are fragile");
        Conway.next_state(cell)
    }

    fn map_index(&self, index: isize, bound: usize) -> Option<usize> {
        Conway.map_index(index, bound)
    }

    fn is_game_over(&self, alive: u64, equal: u32, generations: u32) -> bool {
        Conway.is_game_over(alive, equal, generations)
    }
}

#[test]
fn rule_panic_reaches_the_caller() -> TestResult {
    for threading in [Threading::Single, Threading::Multi] {
        let config = fast_config(10, 10)
            .set_threading(threading)
            .set_threads(Some(2));
        let mut game = GameOfLife::with_rules(&config, Fragile)?;
        assert_eq!(game.is_multithreaded(), threading == Threading::Multi);
        game.set_initial_cells(&[(7, 7)])?;

        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| game.execute_next_generation()));
            let generations = game.generations_count();
            drop(game);
            let _ = sender.send((result.is_err(), generations));
        });
        let (panicked, generations) = receiver.recv_timeout(Duration::from_secs(10))?;
        assert!(panicked, "{:?}", threading);
        assert_eq!(generations, 0);
    }
    Ok(())
}
