use serde::{Deserialize, Serialize};

/// Multipliers applied to the priority and efficiency objectives.
///
/// Any field missing from a JSON payload takes its default.
///
/// ```
/// use task_nsga::model::WeightConfig;
///
/// let w: WeightConfig = serde_json::from_str(r#"{"urgency": 4.0}"#).unwrap();
/// assert_eq!(w.urgency, 4.0);
/// assert_eq!(w.importance, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub importance: f64,
    pub urgency: f64,
    pub ease: f64,
    pub energy: f64,
    pub time: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            importance: 3.0,
            urgency: 2.0,
            ease: 1.0,
            energy: 2.0,
            time: 1.5,
        }
    }
}

impl WeightConfig {
    /// Checks that every multiplier is finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("importance", self.importance),
            ("urgency", self.urgency),
            ("ease", self.ease),
            ("energy", self.energy),
            ("time", self.time),
        ];
        match fields.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            Some((name, v)) => Err(format!("weight `{name}` must be non-negative, got {v}")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let w = WeightConfig::default();
        assert_eq!(
            (w.importance, w.urgency, w.ease, w.energy, w.time),
            (3.0, 2.0, 1.0, 2.0, 1.5)
        );
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let w = WeightConfig {
            time: -0.5,
            ..WeightConfig::default()
        };
        let err = w.validate().unwrap_err();
        assert!(err.contains("time"), "{err}");
    }

    #[test]
    fn test_nan_weight_rejected() {
        let w = WeightConfig {
            ease: f64::NAN,
            ..WeightConfig::default()
        };
        assert!(w.validate().is_err());
    }
}
