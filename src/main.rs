mod config;
mod error;
mod game;
mod snake;
mod surface;
mod term;
#[cfg(test)]
mod test_support;

use std::{fs::File, process::exit};

use rand::{SeedableRng, rngs::StdRng};
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::Config;
use crate::error::Result;
use crate::game::{Game, Outcome};
use crate::term::TermManager;

pub type TermInt = u16;
/// `(row, col)` inside the game window.
pub type Coords = (i32, i32);

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config);
    log::info!("Snake starting up with {:?}", config);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // The terminal is restored when the game (and its TermManager) drops
    let outcome = {
        let term = TermManager::new(config.margin)?;
        let mut game = Game::new(term, rng, &config)?;
        game.run()?
    };

    match outcome {
        Outcome::Quit { length } => println!("Bye! Your snake was {} long.", length),
        Outcome::GameOver { length } => println!("Game over! Your snake reached a length of {}.", length),
    }
    Ok(())
}

// The game owns the terminal, so logs go to a file. A logger that can't be
// set up just means no logs.
fn init_logging(config: &Config) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}
