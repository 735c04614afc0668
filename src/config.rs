//! Construction-time configuration.

use serde::{Deserialize, Serialize};

/// Options recognized when constructing an encoder.
///
/// The only option is `one_cold`, which inverts the marker values: a present
/// category is written as `0.0` and every absent one as `1.0`. The inversion
/// is global and fixed for the lifetime of the encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneHotConfig {
    pub one_cold: bool,
}

impl OneHotConfig {
    pub fn one_hot() -> Self {
        Self { one_cold: false }
    }

    pub fn one_cold() -> Self {
        Self { one_cold: true }
    }

    /// Marker written at the slot of a present category.
    pub fn hot(&self) -> f64 {
        if self.one_cold {
            0.0
        } else {
            1.0
        }
    }

    /// Marker written at every other expansion slot.
    pub fn cold(&self) -> f64 {
        if self.one_cold {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hot() {
        let cfg = OneHotConfig::default();
        assert!(!cfg.one_cold);
        assert_eq!(cfg.hot(), 1.0);
        assert_eq!(cfg.cold(), 0.0);
    }

    #[test]
    fn test_one_cold_inverts_markers() {
        let cfg = OneHotConfig::one_cold();
        assert_eq!(cfg.hot(), 0.0);
        assert_eq!(cfg.cold(), 1.0);
    }

    #[test]
    fn test_deserialize_missing_field_uses_default() {
        let cfg: OneHotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, OneHotConfig::one_hot());

        let cfg: OneHotConfig = serde_json::from_str(r#"{"one_cold": true}"#).unwrap();
        assert_eq!(cfg, OneHotConfig::one_cold());
    }
}
