use std::path::PathBuf;

use clap::Parser;

use crate::data::DEFAULT_STORE_PATH;
use crate::logging::DEFAULT_LOG_PATH;

/// Would you rather? A quiz for two.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// JSON file the quizzes and attempts are kept in
    #[arg(short, long, env = "YOUANDI_STORE", default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Directory holding the image bucket
    #[arg(short, long, env = "YOUANDI_IMAGES", default_value = ".")]
    pub images: PathBuf,

    /// File to write logs to
    #[arg(long, env = "YOUANDI_LOG", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,

    /// Open the quiz with this code to take it
    #[arg(long, value_name = "CODE", conflicts_with = "results")]
    pub take: Option<String>,

    /// Show the results for the quiz with this code
    #[arg(long, value_name = "CODE")]
    pub results: Option<String>,
}

/// Screen to open first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartRoute {
    Landing,
    Take(String),
    Results(String),
}

impl Config {
    pub fn start_route(&self) -> StartRoute {
        match (&self.take, &self.results) {
            (Some(code), _) => StartRoute::Take(code.clone()),
            (None, Some(code)) => StartRoute::Results(code.clone()),
            (None, None) => StartRoute::Landing,
        }
    }
}
