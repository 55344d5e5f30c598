//! EdgeLab Core — domain types, cost models, position sizing, signal
//! sources, and the long-only backtest engine.
//!
//! This crate contains everything the statistical layer builds on:
//! - Domain types (bars, signals, trades, equity curves)
//! - Bar-by-bar event loop with one-bar signal lag and end-of-run liquidation
//! - Cost model and position sizer traits with baseline implementations
//! - Benchmark signal sources (buy-and-hold, always-flat, randomized)
//! - Deterministic BLAKE3 seed derivation for randomized trials
//! - Error taxonomy (data errors vs configuration errors)

pub mod cost;
pub mod domain;
pub mod engine;
pub mod error;
pub mod rng;
pub mod sizing;
pub mod sources;

pub use cost::{CostModel, Frictionless, PerSideCost};
pub use domain::{EquityCurve, EquityPoint, PriceBar, Signal, SignalSeries, Trade};
pub use engine::{run_backtest, EngineConfig, RunResult};
pub use error::{BacktestError, ConfigError, DataError};
pub use rng::TrialSeeds;
pub use sizing::{FixedDollar, FixedFraction, PositionSizer, SizingContext};
pub use sources::{AlwaysFlat, BuyAndHold, RandomMode, RandomSignals, SignalSource};
