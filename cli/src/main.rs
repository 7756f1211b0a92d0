use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use minado_core as game;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use render::TermRenderer;

mod render;

/// Terminal Minesweeper on the minado engine.
#[derive(Debug, Parser)]
#[command(name = "minado", version, about)]
struct Cli {
    /// Difficulty preset selecting board size and mine-probability range
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,

    /// Board side length, overriding the preset
    #[arg(long)]
    size: Option<game::Coord>,

    /// Fixed mine probability in [0, 1], skipping the per-game draw
    #[arg(long, allow_negative_numbers = true)]
    probability: Option<f64>,

    /// Lowered cap applied to the mine probability
    #[arg(long, allow_negative_numbers = true)]
    max_probability: Option<f64>,

    /// RNG seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for game::Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

/// Per-run game parameters resolved from the command line. Each new game
/// draws its own probability unless one was fixed with `--probability`.
struct GameSetup {
    preset: game::DifficultyPreset,
    size: game::Coord,
    fixed_probability: Option<f64>,
}

impl GameSetup {
    fn from_cli(cli: &Cli) -> Self {
        let mut preset = game::Difficulty::from(cli.difficulty).preset();
        if let Some(max_probability) = cli.max_probability {
            preset = preset.with_max_probability(max_probability);
        }
        Self {
            size: cli.size.unwrap_or(preset.size),
            fixed_probability: cli.probability,
            preset,
        }
    }

    fn next_config(&self, rng: &mut SmallRng) -> game::Result<game::BoardConfig> {
        let probability = match self.fixed_probability {
            // manual probabilities still respect the cap
            Some(p) => p.min(self.preset.max_probability),
            None => self.preset.roll_probability(rng),
        };
        game::BoardConfig::new(self.size, probability)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(game::Coord, game::Coord),
    Flag(game::Coord, game::Coord),
    New,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = match parts.next()? {
            "r" | "reveal" => {
                let row = parts.next()?.parse().ok()?;
                let col = parts.next()?.parse().ok()?;
                Self::Reveal(row, col)
            }
            "f" | "flag" => {
                let row = parts.next()?.parse().ok()?;
                let col = parts.next()?.parse().ok()?;
                Self::Flag(row, col)
            }
            "n" | "new" => Self::New,
            "q" | "quit" => Self::Quit,
            _ => return None,
        };

        if parts.next().is_some() {
            return None;
        }
        Some(command)
    }
}

fn init_logging(verbosity: &Verbosity<InfoLevel>) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbosity.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn start_game(
    session: &mut game::GameSession<TermRenderer>,
    setup: &GameSetup,
    rng: &mut SmallRng,
) -> Result<()> {
    let config = setup.next_config(rng)?;
    info!(
        "starting a {size}x{size} game at p={probability}",
        size = config.size(),
        probability = config.mine_probability(),
    );
    session.request_new_game(game::BernoulliGenerator::new(rng.random()), &config);
    Ok(())
}

fn print_board(session: &game::GameSession<TermRenderer>) {
    println!("{}", session.renderer());
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbosity);

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let setup = GameSetup::from_cli(&cli);
    let mut session = game::GameSession::new(TermRenderer::new());
    start_game(&mut session, &setup, &mut rng)?;

    println!("commands: r ROW COL (reveal), f ROW COL (flag), n (new game), q (quit)");
    print_board(&session);
    prompt()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Some(Command::Reveal(row, col)) => {
                if let Err(err) = session.request_reveal((row, col)) {
                    println!("{err}");
                }
                print_board(&session);
            }
            Some(Command::Flag(row, col)) => {
                if let Err(err) = session.request_toggle_flag((row, col)) {
                    println!("{err}");
                }
                print_board(&session);
            }
            Some(Command::New) => {
                start_game(&mut session, &setup, &mut rng)?;
                print_board(&session);
            }
            Some(Command::Quit) => break,
            None if line.trim().is_empty() => {}
            None => println!("commands: r ROW COL, f ROW COL, n, q"),
        }

        if let Some(won) = session.renderer().finished() {
            println!("{}", if won { "You win!" } else { "You hit a mine." });
            start_game(&mut session, &setup, &mut rng)?;
            print_board(&session);
        }
        prompt()?;
    }

    Ok(())
}
