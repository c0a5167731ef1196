use std::io::{self, Write};

use thiserror::Error;

pub mod config;
pub mod facebook;
pub mod twitter;
pub mod utils;

use config::{Config, ConfigError};
use facebook::client::FacebookApiError;
use twitter::client::TwitterApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Error getting Facebook friends count: {0}")]
    Facebook(#[from] FacebookApiError),
    #[error("Error getting Twitter followers count: {0}")]
    Twitter(#[from] TwitterApiError),
    #[error("Error writing output: {0}")]
    Io(#[from] io::Error),
}

/// Fetches the friends count, then the followers count, writing one line per
/// result. Stops at the first error, so nothing after a failed fetch runs.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), AppError> {
    let friends = config.facebook_client().get_friends_count()?;
    writeln!(out, "You have {} friends on Facebook.", friends)?;

    let followers = config.twitter_client().get_followers_count()?;
    writeln!(out, "You have {} followers on Twitter.", followers)?;
    return Ok(());
}
