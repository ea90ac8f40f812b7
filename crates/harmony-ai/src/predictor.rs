//! Dual-predictor orchestrator and startup wiring for the two models.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::classifier::TextClassifier;
use crate::linear::LinearClassifier;
#[cfg(feature = "onnx")]
use crate::classifier::Labels;
#[cfg(feature = "onnx")]
use crate::sequence::SequenceClassifier;

/// Merged output of both classifiers for one text.
///
/// Named fields fix the score ordering once and for all; the composed
/// `message` lists schizophrenia first, then depression, joined by
/// `" and "`. An empty message means "not computed" (blank input), which
/// callers must treat as distinct from a real low-confidence result.
#[derive(Debug, Clone, PartialEq)]
pub struct DualPrediction {
    pub depression: f64,
    pub schizophrenia: f64,
    pub message: String,
}

/// Runs both classifiers over the same text and merges their outputs.
///
/// Owns one adapter per model, constructed at startup; there is no global
/// model state. The two invocations are independent and run sequentially,
/// and both must complete before the result is composed.
pub struct Predictor {
    depression: Box<dyn TextClassifier>,
    schizophrenia: Box<dyn TextClassifier>,
}

impl Predictor {
    pub fn new(
        depression: Box<dyn TextClassifier>,
        schizophrenia: Box<dyn TextClassifier>,
    ) -> Self {
        Self {
            depression,
            schizophrenia,
        }
    }

    /// Score a text with both classifiers.
    ///
    /// Blank input short-circuits to `(0.0, 0.0, "")` without invoking
    /// either adapter. A classifier error propagates unchanged; there are
    /// no retries, since such failures indicate a defect in the loaded
    /// artifacts rather than a transient condition.
    pub fn predict_both(&self, text: &str) -> anyhow::Result<DualPrediction> {
        if text.trim().is_empty() {
            return Ok(DualPrediction {
                depression: 0.0,
                schizophrenia: 0.0,
                message: String::new(),
            });
        }

        let schizophrenia = self.schizophrenia.classify(text)?;
        let depression = self.depression.classify(text)?;

        Ok(DualPrediction {
            depression: depression.score,
            schizophrenia: schizophrenia.score,
            message: format!("{} and {}", schizophrenia.message, depression.message),
        })
    }
}

/// Load the depression classifier (lexical vector + linear model).
pub fn load_depression(model_dir: &Path) -> anyhow::Result<LinearClassifier> {
    LinearClassifier::load(model_dir, "depression")
        .with_context(|| format!("loading depression model from {model_dir:?}"))
}

/// Load the schizophrenia classifier, picking the implementation from the
/// artifact shape on disk.
///
/// A `model.onnx` in the directory selects the sequence-model adapter;
/// otherwise the linear decision-function artifacts are expected. Callers
/// only ever see the [`TextClassifier`] contract.
pub fn load_schizophrenia(model_dir: &Path) -> anyhow::Result<Box<dyn TextClassifier>> {
    #[cfg(feature = "onnx")]
    if model_dir.join("model.onnx").exists() {
        let labels = Labels::new("Schizophrenic", "Not Schizophrenic");
        let clf = SequenceClassifier::load(model_dir, "schizophrenia", labels)
            .with_context(|| format!("loading schizophrenia model from {model_dir:?}"))?;
        return Ok(Box::new(clf));
    }

    let clf = LinearClassifier::load(model_dir, "schizophrenia")
        .with_context(|| format!("loading schizophrenia model from {model_dir:?}"))?;
    Ok(Box::new(clf))
}

/// Build the predictor from a models directory containing `depression/`
/// and `schizophrenia/` subdirectories.
///
/// Called once at process startup; a missing or unreadable artifact fails
/// here, before any request is served.
pub fn load_predictor(models_dir: &Path) -> anyhow::Result<Predictor> {
    let depression = load_depression(&models_dir.join("depression"))?;
    let schizophrenia = load_schizophrenia(&models_dir.join("schizophrenia"))?;
    info!(models_dir = %models_dir.display(), "prediction pipeline ready");
    Ok(Predictor::new(Box::new(depression), schizophrenia))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Prediction;

    /// Test double returning a canned prediction.
    struct Fixed {
        score: f64,
        message: &'static str,
    }

    impl TextClassifier for Fixed {
        fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
            Ok(Prediction {
                score: self.score,
                message: self.message.into(),
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Test double that always fails.
    struct Broken;

    impl TextClassifier for Broken {
        fn classify(&self, _text: &str) -> anyhow::Result<Prediction> {
            anyhow::bail!("artifact mismatch")
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn predictor() -> Predictor {
        Predictor::new(
            Box::new(Fixed {
                score: 61.24,
                message: "61.24 % confident Depressed",
            }),
            Box::new(Fixed {
                score: 12.5,
                message: "87.5 % confident Not Schizophrenic",
            }),
        )
    }

    #[test]
    fn blank_input_short_circuits() {
        let p = predictor();
        for text in ["", "   ", "\n \t"] {
            let result = p.predict_both(text).unwrap();
            assert_eq!(result.depression, 0.0);
            assert_eq!(result.schizophrenia, 0.0);
            assert_eq!(result.message, "");
        }
    }

    #[test]
    fn merges_scores_by_name_and_message_schizophrenia_first() {
        let result = predictor().predict_both("long day").unwrap();
        assert_eq!(result.depression, 61.24);
        assert_eq!(result.schizophrenia, 12.5);
        assert_eq!(
            result.message,
            "87.5 % confident Not Schizophrenic and 61.24 % confident Depressed"
        );
    }

    #[test]
    fn message_contains_exactly_one_joiner() {
        let result = predictor().predict_both("long day").unwrap();
        assert_eq!(result.message.matches(" and ").count(), 1);
        for phrase in result.message.split(" and ") {
            let (_, tail) = phrase.split_once(" % confident ").unwrap();
            assert!(!tail.is_empty());
        }
    }

    #[test]
    fn classifier_error_propagates() {
        let p = Predictor::new(
            Box::new(Broken),
            Box::new(Fixed {
                score: 1.0,
                message: "99.0 % confident Not Schizophrenic",
            }),
        );
        let err = p.predict_both("some text").unwrap_err();
        assert!(err.to_string().contains("artifact mismatch"));
    }

    #[test]
    fn blank_input_never_reaches_a_broken_classifier() {
        let p = Predictor::new(Box::new(Broken), Box::new(Broken));
        let result = p.predict_both("   ").unwrap();
        assert_eq!(result.message, "");
    }
}
