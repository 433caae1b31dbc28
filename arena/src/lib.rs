pub mod referee;
pub mod runner;

pub use runner::{run_match, run_series, MatchResult, MatchSettings, SeriesStats};
