mod config;
mod console;
mod quiz;

use std::io;

use console::Console;
use dotenv::dotenv;
use log::{debug, info};
use quiz::QuizEngine;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env is optional, the environment alone is enough
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting times tables...");

    let settings = config::Settings::from_env()?;
    let engine = match settings.seed {
        Some(seed) => {
            debug!("Using fixed seed {}", seed);
            QuizEngine::from_seed(seed)
        }
        None => QuizEngine::new(),
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), engine);
    console.run()?;

    info!(
        "Session ended with score {} ({:?})",
        console.engine().state().score,
        console.engine().state().phase
    );
    Ok(())
}
