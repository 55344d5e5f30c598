//! Signal sources: strategy-side producers of timestamp-aligned signals.
//!
//! The engine consumes a [`SignalSeries`]; a source is anything that can
//! produce one from a bar series. The built-in sources are the benchmark
//! baselines used by the statistical layer: buy-and-hold, always-flat, and
//! randomized signal placement for null-distribution construction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{PriceBar, Signal, SignalSeries};
use crate::rng::TrialSeeds;

/// Produces one signal per bar from a bar series.
pub trait SignalSource: Send + Sync {
    fn signals(&self, bars: &[PriceBar]) -> SignalSeries;
}

/// Enter on the first bar, hold to the end.
///
/// With the one-bar lag the entry fills at the close of bar 1 and the
/// end-of-run policy liquidates at the final close.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyAndHold;

impl SignalSource for BuyAndHold {
    fn signals(&self, bars: &[PriceBar]) -> SignalSeries {
        let mut signals = vec![Signal::Hold; bars.len()];
        if let Some(first) = signals.first_mut() {
            *first = Signal::Enter;
        }
        SignalSeries::new(signals)
    }
}

/// Never trades. The degenerate baseline: flat equity at initial capital.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFlat;

impl SignalSource for AlwaysFlat {
    fn signals(&self, bars: &[PriceBar]) -> SignalSeries {
        SignalSeries::new(vec![Signal::Hold; bars.len()])
    }
}

/// Placement policy for [`RandomSignals`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandomMode {
    /// Each bar independently becomes Enter with probability `p_enter` and
    /// Exit with probability `p_exit` (Enter is sampled first).
    Frequency { p_enter: f64, p_exit: f64 },
    /// Exactly `entries` Enter and `exits` Exit signals at distinct,
    /// uniformly chosen bar indices. Used to build trade-count-matched null
    /// distributions.
    MatchedCount { entries: usize, exits: usize },
}

/// Randomized signal placement with an explicit, reproducible seed.
///
/// The seed is expanded through [`TrialSeeds`] so that trial `k` of a Monte
/// Carlo run is reproducible independently of all other trials.
#[derive(Debug, Clone)]
pub struct RandomSignals {
    mode: RandomMode,
    seeds: TrialSeeds,
    trial: u64,
}

impl RandomSignals {
    pub fn new(mode: RandomMode, base_seed: u64, trial: u64) -> Self {
        Self {
            mode,
            seeds: TrialSeeds::new(base_seed),
            trial,
        }
    }

    /// Same policy and base seed, different trial index.
    pub fn for_trial(&self, trial: u64) -> Self {
        Self {
            mode: self.mode,
            seeds: self.seeds.clone(),
            trial,
        }
    }
}

impl SignalSource for RandomSignals {
    fn signals(&self, bars: &[PriceBar]) -> SignalSeries {
        let n = bars.len();
        let mut rng = self.seeds.rng_for("random-signals", self.trial);
        let mut signals = vec![Signal::Hold; n];

        match self.mode {
            RandomMode::Frequency { p_enter, p_exit } => {
                for slot in signals.iter_mut() {
                    let draw: f64 = rng.gen();
                    if draw < p_enter {
                        *slot = Signal::Enter;
                    } else if draw < p_enter + p_exit {
                        *slot = Signal::Exit;
                    }
                }
            }
            RandomMode::MatchedCount { entries, exits } => {
                let wanted = (entries + exits).min(n);
                let mut indices: Vec<usize> = (0..n).collect();
                indices.shuffle(&mut rng);
                for (k, &idx) in indices.iter().take(wanted).enumerate() {
                    signals[idx] = if k < entries.min(n) {
                        Signal::Enter
                    } else {
                        Signal::Exit
                    };
                }
            }
        }

        SignalSeries::new(signals)
    }
}
