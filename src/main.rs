use std::env;
use std::fs::File;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use bounce_through::app::App;
use bounce_through::consts::{HIGHSCORE_FILE, LOG_FILE};
use bounce_through::term::Terminal;
use bounce_through::{JsonFile, Tuning};

/// The screen belongs to the game, so logs go to a file and only when asked.
fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create(LOG_FILE) {
        Ok(file) => env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
        Err(e) => eprintln!("cannot open {LOG_FILE}: {e}"),
    }
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    init_logging();
    log::info!("Bounce Through starting");

    let store = JsonFile::new(HIGHSCORE_FILE);
    let terminal = Terminal::enter()?;
    let mut app = App::new(terminal, store, Tuning::default());
    app.run(seed())
}
