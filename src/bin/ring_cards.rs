use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ring_cards::{CardGame, GameConfig, GameError, GameRng, Pack};

#[derive(Parser, Debug)]
#[command(
    name = "ring-cards",
    version,
    about = "Simulate the ring card game: first to four of a kind wins"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game from a pack file
    Play {
        /// Number of players
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        players: i64,
        /// Pack file: one card value per line, 8 per player
        #[arg(long, value_name = "FILE")]
        pack: PathBuf,
        /// Directory for player<N>_output.txt and deck<N>_output.txt
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Print the final table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a shuffled pack that is guaranteed to finish
    Generate {
        /// Number of players
        #[arg(long, short = 'n')]
        players: usize,
        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Output pack file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Play { players, pack, output_dir, json } => {
            let mut config = GameConfig::new(players).with_pack_path(pack);
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir);
            }
            play(&config, json)
        }
        Command::Generate { players, seed, out } => generate(players, seed, out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn play(config: &GameConfig, json: bool) -> Result<(), GameError> {
    let mut game = CardGame::from_config(config)?;
    game.setup()?;
    let winner = game.run()?;
    println!("{winner} wins");

    if json {
        let summary = serde_json::to_string_pretty(&game.summary())
            .map_err(|e| GameError::Io(e.into()))?;
        println!("{summary}");
    }
    Ok(())
}

fn generate(players: usize, seed: u64, out: PathBuf) -> Result<(), GameError> {
    let mut rng = GameRng::new(seed);
    let pack = Pack::generate(players, &mut rng)?;
    pack.save(&out)?;
    info!(players, seed, out = %out.display(), "pack written");
    Ok(())
}
