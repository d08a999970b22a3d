pub mod backtest;
pub mod classifier;
pub mod detectors;
pub mod session;
pub mod tally;
pub mod voting;
