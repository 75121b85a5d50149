use lifebox::{Board, Cell, SimulationParameters, game::DEFAULT_TICK_INTERVAL};
use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_CELL_SIZE: u32 = 2;
const DEFAULT_FRAME_RATE: u32 = 120;

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error(transparent)]
    Parse(#[from] getopts::Fail),
    #[error("invalid value for --{name}: {value:?}")]
    Value { name: &'static str, value: String },
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, ArgsError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optopt("c", "cell-size", "size of a cell in pixels", "PX");
        opts.optopt("", "fps", "target frames per second", "N");
        opts.optopt("i", "interval", "frames between generations", "FRAMES");
        opts.optflag("p", "paused", "start with the simulation paused");
        opts.optflag("", "no-grid", "start with the grid hidden");
        opts.optopt("f", "fill", "set fill type", "TYPE");
        opts.optopt("", "seed", "seed for the random generator", "N");
        opts.optopt("", "input", "load an RLE pattern at startup", "FILE");
        opts.optopt("o", "output", "save the board as RLE on exit", "FILE");
        opts.optopt("g", "frames", "max number of frames", "COUNT");
        opts.optflag("t", "threads", "enables multi-threading");
        opts.optopt("", "log", "write logs to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifebox [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>, ArgsError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ArgsError> {
        self.matches
            .opt_get(name)
            .map_err(|_| ArgsError::Value {
                name,
                value: self.matches.opt_str(name).unwrap_or_default(),
            })
    }

    pub fn cell_size(&self) -> Result<u32, ArgsError> {
        match self.get::<u32>("cell-size")? {
            Some(0) => Err(ArgsError::Value {
                name: "cell-size",
                value: "0".to_owned(),
            }),
            size => Ok(size.unwrap_or(DEFAULT_CELL_SIZE)),
        }
    }
    pub fn frame_rate(&self) -> Result<u32, ArgsError> {
        Ok(self.get("fps")?.unwrap_or(DEFAULT_FRAME_RATE))
    }
    pub fn frames(&self) -> Result<Option<u64>, ArgsError> {
        self.get("frames")
    }
    pub fn seed(&self) -> Result<Option<u64>, ArgsError> {
        self.get("seed")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    pub fn params(&self) -> Result<SimulationParameters, ArgsError> {
        Ok(SimulationParameters {
            tick_interval: self.get::<u32>("interval")?.unwrap_or(DEFAULT_TICK_INTERVAL).max(1),
            running: !self.matches.opt_present("paused"),
            steps: 0,
            show_grid: !self.matches.opt_present("no-grid"),
        })
    }

    pub fn fill_mode(&self) -> Result<FillMode, ArgsError> {
        let mode_str = self.matches.opt_str("fill");
        let mode_str = mode_str.as_deref().unwrap_or("empty");
        FillMode::new(mode_str).ok_or_else(|| ArgsError::Value {
            name: "fill",
            value: mode_str.to_owned(),
        })
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }
    pub fn log_file(&self) -> Option<String> {
        self.matches.opt_str("log")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    /// Share of cells alive after a random fill
    const RANDOM_PROBABILITY: f64 = 0.2;

    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Fills every cell of `board` according to this mode
    pub fn fill<R: Rng + ?Sized>(self, board: &mut Board, rng: &mut R) {
        match self {
            Self::Random => board.randomize(Self::RANDOM_PROBABILITY, rng),
            Self::Empty => board.clear(),
            Self::Alternating | Self::All => {
                for y in 0..board.height() {
                    for x in 0..board.width() {
                        let alive = self == Self::All || (x + y) % 2 == 0;
                        let cell = if alive { Cell::Alive } else { Cell::Empty };
                        board.set(x, y, cell);
                    }
                }
            }
        }
    }
}
