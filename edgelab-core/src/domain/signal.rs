//! Directional signals and the timestamp-aligned signal series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Directional instruction for one bar.
///
/// A signal emitted at bar `t` is *applied* at bar `t+1` by the engine (the
/// one-bar lag that prevents look-ahead bias). A signal on the final bar
/// therefore never executes; the end-of-run liquidation policy covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Enter a long position (+1).
    Enter,
    /// Do nothing (0).
    Hold,
    /// Exit to flat (−1).
    Exit,
}

impl Signal {
    /// Numeric form: +1 / 0 / −1.
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Enter => 1,
            Signal::Hold => 0,
            Signal::Exit => -1,
        }
    }
}

/// A signal per bar plus an optional auxiliary-column side channel.
///
/// The `aux` map carries strategy-specific aligned series (indicator values,
/// z-scores, whatever a signal source wants to expose for diagnostics). The
/// engine never reads it; it exists so that strategies do not need bespoke
/// fields on the core contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSeries {
    pub signals: Vec<Signal>,
    pub aux: BTreeMap<String, Vec<f64>>,
}

impl SignalSeries {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals,
            aux: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Attach an aligned auxiliary column. Replaces any column of the same name.
    pub fn with_aux_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.aux.insert(name.into(), values);
        self
    }

    /// Count of Enter signals in the series.
    pub fn entry_count(&self) -> usize {
        self.signals.iter().filter(|s| **s == Signal::Enter).count()
    }

    /// Count of Exit signals in the series.
    pub fn exit_count(&self) -> usize {
        self.signals.iter().filter(|s| **s == Signal::Exit).count()
    }
}
