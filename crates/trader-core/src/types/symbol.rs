//! Per-instrument metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static metadata for one instrument, consulted by the sizer and gate.
///
/// The pip/contract quirks of JPY pairs and metals are plain table entries
/// here; there are no per-instrument code paths anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolSpec {
    /// Price units per pip (0.0001 for most FX majors, 0.01 for JPY pairs)
    pub pip_size: f64,
    /// Account-currency value of a 1.0 price-unit move per 1.0 lot
    pub contract_value: f64,
    /// Per-symbol spread cap in points, overriding the gate's default
    pub max_spread_points: Option<f64>,
}

impl Default for SymbolSpec {
    fn default() -> Self {
        Self {
            pip_size: 0.0001,
            contract_value: 100_000.0,
            max_spread_points: None,
        }
    }
}

impl SymbolSpec {
    pub fn new(pip_size: f64, contract_value: f64) -> Self {
        Self {
            pip_size,
            contract_value,
            max_spread_points: None,
        }
    }

    /// Set the per-symbol spread cap in points.
    pub fn with_max_spread(mut self, points: f64) -> Self {
        self.max_spread_points = Some(points);
        self
    }

    /// Convert a distance in pips to price units.
    pub fn pips_to_price(&self, pips: f64) -> f64 {
        pips * self.pip_size
    }

    /// Built-in metadata for the instruments the system ships with.
    pub fn builtin() -> HashMap<String, SymbolSpec> {
        let mut specs = HashMap::new();
        specs.insert(
            "EURUSD".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(20.0),
        );
        specs.insert(
            "GBPUSD".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "AUDUSD".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "USDCAD".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "USDCHF".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "NZDUSD".to_string(),
            SymbolSpec::new(0.0001, 100_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "USDJPY".to_string(),
            SymbolSpec::new(0.01, 1_000.0).with_max_spread(20.0),
        );
        specs.insert(
            "EURJPY".to_string(),
            SymbolSpec::new(0.01, 1_000.0).with_max_spread(30.0),
        );
        specs.insert(
            "GBPJPY".to_string(),
            SymbolSpec::new(0.01, 1_000.0).with_max_spread(40.0),
        );
        specs.insert(
            "XAUUSD".to_string(),
            SymbolSpec::new(0.1, 100.0).with_max_spread(50.0),
        );
        specs
    }
}
