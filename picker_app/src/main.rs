//! Avatar picker demo
//!
//! Usage: `avatar_picker [config.toml|config.ron]`

use std::path::PathBuf;
use std::process::ExitCode;

use picker_app::{AppConfig, Context};
use scene_engine::foundation::logging;
use scene_engine::Counters;

fn main() -> ExitCode {
    logging::init();
    log::info!("Starting avatar picker");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let counters = Counters::new();

    let outcome = AppConfig::load(config_path.as_deref())
        .context("could not load configuration")
        .and_then(|config| picker_app::run(&config, &counters));

    ExitCode::from(picker_app::finish(&outcome, &counters))
}
