// src/bin/cli.rs
use std::path::Path;

use zeus_attendance::cli;
use zeus_attendance::config::consts::{LOG_FILE, STORE_DIR};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::parse_args(std::env::args().skip(1))
        .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;

    let level = if args.debug { "debug" } else if args.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.debug {
        let path = Path::new(STORE_DIR).join(LOG_FILE);
        zeus_attendance::log::set_log_file(&path)?;
    }

    cli::run(&args).map_err(|e| color_eyre::eyre::eyre!("{e}"))
}
