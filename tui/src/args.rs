//! Parsing command-line arguments.

use clap::{value_parser, Arg, Command, Error as ClapError};
use rlifesim_lib::{Config, Figure, Threading};
use std::time::Duration;

fn positive(s: &str) -> Result<usize, String> {
    match s.parse() {
        Ok(0) | Err(_) => Err(String::from("must be a positive integer")),
        Ok(n) => Ok(n),
    }
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) figure: Figure,
    pub(crate) delay: Duration,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, ClapError> {
        Self::parse_from(std::env::args_os())
    }

    fn command() -> Command {
        Command::new(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .author(env!("CARGO_PKG_AUTHORS"))
            .about(env!("CARGO_PKG_DESCRIPTION"))
            .long_about(
                "A multithreaded Game of Life simulator on a bounded grid\n\
                 \n\
                 The world wraps around its borders. The game is over when \
                 every cell is dead, when a generation repeats an earlier one, \
                 or after 20 generations.\n\
                 \n\
                 Each generation is printed below a line of `- `.\n\
                 * Dead cells are represented by a green `-`;\n\
                 * Living cells are represented by a red `X`.\n",
            )
            .arg(
                Arg::new("ROWS")
                    .help("Number of rows")
                    .short('r')
                    .long("rows")
                    .default_value("5")
                    .value_parser(positive),
            )
            .arg(
                Arg::new("COLUMNS")
                    .help("Number of columns")
                    .short('c')
                    .long("columns")
                    .default_value("10")
                    .value_parser(positive),
            )
            .arg(
                Arg::new("FIGURE")
                    .help("Initial figure")
                    .long_help(
                        "Initial figure\n\
                         \"random\" is a random number of random cells.\n\
                         \"line\" and \"point\" are placed at a random position.\n\
                         \"center-line\" and \"center-point\" start from the center.\n",
                    )
                    .short('f')
                    .long("figure")
                    .value_parser([
                        "random",
                        "line",
                        "point",
                        "center-point",
                        "center-line",
                        "glider",
                    ])
                    .default_value("line"),
            )
            .arg(
                Arg::new("THREADING")
                    .help("Whether to compute the generations in worker threads")
                    .long_help(
                        "Whether to compute the generations in worker threads\n\
                         \"auto\" uses worker threads for worlds with more than 40 cells.\n",
                    )
                    .long("threading")
                    .value_parser(["auto", "single", "multi"])
                    .default_value("auto"),
            )
            .arg(
                Arg::new("THREADS")
                    .help("Number of worker threads")
                    .long_help(
                        "Number of worker threads\n\
                         Defaults to the available parallelism, and is at most 100.\n",
                    )
                    .short('j')
                    .long("threads")
                    .value_parser(positive),
            )
            .arg(
                Arg::new("DELAY")
                    .help("Milliseconds to wait after each generation")
                    .short('d')
                    .long("delay")
                    .default_value("0")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("SEED")
                    .help("Seed for the random initial figure")
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            )
    }

    fn parse_from<I, T>(args: I) -> Result<Self, ClapError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let default = Config::default();

        let rows = matches.get_one::<usize>("ROWS").copied().unwrap_or(default.rows);
        let columns = matches
            .get_one::<usize>("COLUMNS")
            .copied()
            .unwrap_or(default.columns);

        let figure = match matches.get_one::<String>("FIGURE").map(String::as_str) {
            Some("random") => Figure::Random,
            Some("point") => Figure::RandomPoint,
            Some("center-point") => Figure::CenterPoint,
            Some("center-line") => Figure::CenterLine,
            Some("glider") => Figure::Glider,
            _ => Figure::RandomLine,
        };
        let threading = match matches.get_one::<String>("THREADING").map(String::as_str) {
            Some("single") => Threading::Single,
            Some("multi") => Threading::Multi,
            _ => Threading::Auto,
        };
        let threads = matches.get_one::<usize>("THREADS").copied();
        let delay = matches.get_one::<u64>("DELAY").copied().unwrap_or(0);
        let seed = matches.get_one::<u64>("SEED").copied();

        let config = Config::new(rows, columns)
            .set_threading(threading)
            .set_threads(threads)
            .set_seed(seed);

        Ok(Args {
            config,
            figure,
            delay: Duration::from_millis(delay),
        })
    }
}
