// src/main.rs
use std::process;

use log::{debug, error, info};

use ffmpeg_tv::cli::Cli;
use ffmpeg_tv::{build_ffmpeg_args, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Exits with usage on bad arguments, before anything is spawned
    let config = Cli::from_env().into_config();
    debug!("Encoding config: {:?}", config);

    let args = build_ffmpeg_args(&config);
    info!(
        "Encoding {} -> {}",
        config.input.display(),
        config.output.display()
    );

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };
    process::exit(code);
}
