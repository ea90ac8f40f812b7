//! Classifier trait and shared scoring semantics.
//!
//! Probabilities are fractions in [0, 1] internally; every score that
//! leaves this crate is a percentage in [0, 100] rounded to two decimals.

/// One trained model plus its feature transform, behind a uniform
/// scoring interface.
///
/// Implementations must be pure with respect to the loaded artifacts:
/// classifying the same text twice yields identical output.
pub trait TextClassifier: Send + Sync {
    /// Score a text. Blank or whitespace-only input returns
    /// [`Prediction::unknown`] without touching the underlying model.
    fn classify(&self, text: &str) -> anyhow::Result<Prediction>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Output of a single classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Positive-class probability as a percentage in [0, 100], rounded to
    /// two decimals. This is the value that gets persisted and charted,
    /// independent of which class the message reports.
    pub score: f64,
    /// Human-readable confidence phrase, e.g. `"82.3 % confident Depressed"`.
    pub message: String,
}

impl Prediction {
    /// Sentinel for blank input: no model was consulted.
    pub fn unknown() -> Self {
        Self {
            score: 0.0,
            message: "Unknown".into(),
        }
    }
}

/// Positive/negative class names for one classifier instantiation.
#[derive(Debug, Clone)]
pub struct Labels {
    pub positive: String,
    pub negative: String,
}

impl Labels {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

/// What a model's raw output means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    /// Already a calibrated probability in [0, 1].
    Probability,
    /// An uncalibrated decision value; map through [`sigmoid`] first.
    Decision,
}

impl ScoreKind {
    /// Convert a raw model output into a positive-class probability.
    pub fn probability(self, raw: f64) -> f64 {
        match self {
            Self::Probability => raw,
            Self::Decision => sigmoid(raw),
        }
    }
}

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Format a percentage the way the display layer expects: two decimals,
/// one trailing zero trimmed (`80.0`, `82.35`, never `80.00`).
pub fn format_pct(pct: f64) -> String {
    let mut s = format!("{pct:.2}");
    if s.ends_with('0') {
        s.pop();
    }
    s
}

/// Compose the confidence phrase for one classifier result.
///
/// The reported confidence belongs to the *predicted* class: `prob` when
/// positive, `1 - prob` when negative.
pub fn confidence_message(prob: f64, positive: bool, labels: &Labels) -> String {
    let (confidence, label) = if positive {
        (prob, labels.positive.as_str())
    } else {
        (1.0 - prob, labels.negative.as_str())
    };
    format!("{} % confident {}", format_pct(confidence * 100.0), label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_symmetry() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
    }

    #[test]
    fn round2_two_decimals() {
        assert_eq!(round2(61.23678), 61.24);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(80.0), 80.0);
    }

    #[test]
    fn format_pct_trims_one_trailing_zero() {
        assert_eq!(format_pct(80.0), "80.0");
        assert_eq!(format_pct(70.0), "70.0");
        assert_eq!(format_pct(82.35), "82.35");
        assert_eq!(format_pct(82.3), "82.3");
        assert_eq!(format_pct(50.0), "50.0");
    }

    #[test]
    fn confidence_message_reports_predicted_class() {
        let labels = Labels::new("Depressed", "Not Depressed");
        assert_eq!(
            confidence_message(0.8, true, &labels),
            "80.0 % confident Depressed"
        );
        // Negative prediction reports the complement probability.
        assert_eq!(
            confidence_message(0.2, false, &labels),
            "80.0 % confident Not Depressed"
        );
    }

    #[test]
    fn score_kind_conversion() {
        assert_eq!(ScoreKind::Probability.probability(0.7), 0.7);
        assert!((ScoreKind::Decision.probability(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_sentinel() {
        let p = Prediction::unknown();
        assert_eq!(p.score, 0.0);
        assert_eq!(p.message, "Unknown");
    }
}
