use serde::{Deserialize, Serialize};

/// Monthly spending limit applied when unset.
pub const DEFAULT_MONTHLY_LIMIT: f64 = 15_000.0;

/// User-configured monthly spending ceiling. A single mutable value with no
/// historical versioning: changing it reinterprets all remaining-budget
/// calculations against the new limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    #[serde(rename = "monthlyLimit")]
    pub monthly_limit: f64,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

impl Budget {
    pub fn new(monthly_limit: f64) -> Self {
        Self { monthly_limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_shape_uses_monthly_limit_key() {
        let json = serde_json::to_string(&Budget::new(9000.0)).unwrap();
        assert_eq!(json, "{\"monthlyLimit\":9000.0}");
        let parsed: Budget = serde_json::from_str("{\"monthlyLimit\":1200}").unwrap();
        assert_eq!(parsed.monthly_limit, 1200.0);
    }
}
