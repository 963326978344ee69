mod args;
mod console;

use args::Args;
use console::ConsoleRenderer;
use log::error;
use rlifesim_lib::Error;
use std::{io, process, thread};
use tracing_subscriber::EnvFilter;

fn run(args: &Args) -> Result<(), Error> {
    let mut game = args.config.game()?;
    game.fill_initial_picture(args.figure)?;
    let mut renderer = ConsoleRenderer::new(io::stdout());

    while !game.is_game_over() {
        game.draw(&mut renderer);
        game.execute_next_generation();
        if !args.delay.is_zero() {
            thread::sleep(args.delay);
        }
    }

    println!("Game over");
    game.draw(&mut renderer);
    Ok(())
}

fn main() {
    // Logs go to stderr, so that they don't mix with the generations.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse().unwrap_or_else(|e| e.exit());
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
