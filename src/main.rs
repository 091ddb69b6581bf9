use clap::{Parser, Subcommand, ValueEnum};
use shakmaty::Color;
use tracing::Level;

use gambit::EngineConfig;
use gambit::types::DEFAULT_DEPTH;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Speak UCI on stdin/stdout (default)
    Uci,
    /// Play against the engine in the terminal
    Play {
        #[arg(long, value_enum, default_value_t = Side::White)]
        human: Side,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::with_depth(cli.depth);
    match cli.mode.unwrap_or(Mode::Uci) {
        Mode::Uci => gambit::uci::run(config)?,
        Mode::Play { human } => gambit::play::run(config, human.into())?,
    }
    Ok(())
}
