mod app;
mod assets;
mod audio;
mod config;
mod engine;
mod render;

use clap::Parser;

fn main() {
    env_logger::init();
    let config = config::Config::parse();
    log::info!("nyanwall starting up");

    if let Err(e) = app::run(config) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
