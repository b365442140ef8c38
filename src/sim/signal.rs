//! Signal types shared by hazards and pings

use serde::{Deserialize, Serialize};

/// The three signal kinds. A ping only clears hazards of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    #[default]
    Warn,
    Safe,
    Risk,
}

impl Signal {
    /// Selection order (matches number keys 1-3)
    pub const ALL: [Signal; 3] = [Signal::Warn, Signal::Safe, Signal::Risk];

    /// Map a selection key to a signal. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Signal::Warn),
            "2" => Some(Signal::Safe),
            "3" => Some(Signal::Risk),
            _ => None,
        }
    }

    /// Key that selects this signal
    pub fn key(&self) -> &'static str {
        match self {
            Signal::Warn => "1",
            Signal::Safe => "2",
            Signal::Risk => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Warn => "WARN",
            Signal::Safe => "SAFE",
            Signal::Risk => "RISK",
        }
    }

    /// Pick a signal from a unit sample in [0, 1)
    pub fn from_unit(sample: f32) -> Self {
        let idx = (crate::clamp_unit(sample) * Self::ALL.len() as f32) as usize;
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }

    /// A ping of this kind is effective against `hazard`
    #[inline]
    pub fn matches(&self, hazard: Signal) -> bool {
        *self == hazard
    }
}
