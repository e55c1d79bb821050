mod config;
mod ledger;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    let _logger = logging::init(&config.log_level, &config.log_dir())?;

    let store = store::Store::open(&config.store_path())?;
    let mut ledger = ledger::Ledger::load(store)?;

    let result = match args.len() {
        1 => run::as_tui(&mut ledger),
        _ => run::as_cli(&args, &mut ledger),
    };
    if let Err(ref e) = result {
        log::error!("exiting with error: {e:#}");
    }
    result
}
