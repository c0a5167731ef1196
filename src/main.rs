use std::{io, process};

use social_counts::{config::Config, run, AppError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let result = Config::from_env()
        .map_err(AppError::from)
        .and_then(|config| run(&config, &mut io::stdout().lock()));

    if let Err(err) = result {
        log::error!("{}", err);
        process::exit(1);
    }
}
