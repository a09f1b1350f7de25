//! # Land-Revenue Fee Schedule
//!
//! Maps a land-revenue service type to the fee due at submission. The
//! amount fixes the case's initial payment status: a zero fee means no
//! payment workflow, a positive fee opens one in `Pending`.

use std::collections::HashMap;

/// Fee registry keyed by service type.
///
/// Lookup is by trimmed, case-insensitive service-type name. Unknown
/// service types carry no fee.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    fees: HashMap<String, u64>,
}

impl FeeSchedule {
    /// A schedule with the given `(service type, fee)` entries.
    pub fn new(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        Self {
            fees: entries
                .into_iter()
                .map(|(name, fee)| (normalize(&name), fee))
                .collect(),
        }
    }

    /// The fee due for a service type, zero when unlisted.
    pub fn fee_for(&self, service_type: &str) -> u64 {
        self.fees.get(&normalize(service_type)).copied().unwrap_or(0)
    }
}

impl Default for FeeSchedule {
    /// The portal's built-in land-revenue fee table, in whole rupees.
    fn default() -> Self {
        Self::new([
            ("Mutation".to_string(), 500),
            ("Partition".to_string(), 750),
            ("Land Records Copy".to_string(), 200),
            ("Conversion".to_string(), 1000),
            ("Demarcation".to_string(), 300),
        ])
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
