//! TF-IDF vectorizer and linear-model classifier loaded from JSON artifacts.
//!
//! Covers both linear shapes the service has shipped with: a
//! logistic-regression artifact (threshold 0.5) and a margin-based
//! decision-function artifact (threshold 0.65). The decision value
//! `w . x + b` maps through the logistic function either way; for a
//! logistic-regression artifact that is the calibrated class probability,
//! for a margin-based artifact it is the standard sigmoid approximation.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::classifier::{
    Labels, Prediction, TextClassifier, confidence_message, round2, sigmoid,
};

/// Word tokens of two or more word characters, matching the vectorizer the
/// models were trained with.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse lexical feature transform: token counts weighted by inverse
/// document frequency, L2-normalized.
///
/// Loaded from `vectorizer.json`:
/// `{ "vocabulary": {token: index}, "idf": [...], "lowercase": bool }`.
#[derive(Debug, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

fn default_lowercase() -> bool {
    true
}

impl TfidfVectorizer {
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        lowercase: bool,
    ) -> anyhow::Result<Self> {
        let v = Self {
            vocabulary,
            idf,
            lowercase,
        };
        v.validate()?;
        Ok(v)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let out_of_range = self
            .vocabulary
            .iter()
            .find(|&(_, &idx)| idx >= self.idf.len());
        if let Some((token, &idx)) = out_of_range {
            anyhow::bail!(
                "vocabulary index {idx} for token {token:?} exceeds idf table of {} entries",
                self.idf.len()
            );
        }
        Ok(())
    }

    /// Number of features (the idf table length).
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into a sparse tf-idf vector, keyed by feature index.
    ///
    /// Tokens outside the vocabulary are ignored; text with no vocabulary
    /// hits yields the empty (zero) vector.
    pub fn transform(&self, text: &str) -> HashMap<usize, f64> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let mut features: HashMap<usize, f64> = HashMap::new();
        for token in TOKEN_RE.find_iter(text) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *features.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        for (idx, value) in features.iter_mut() {
            *value *= self.idf[*idx];
        }

        let norm: f64 = features.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in features.values_mut() {
                *value /= norm;
            }
        }
        features
    }
}

/// Linear model weights from `model.json`:
/// `{ "weights": [...], "intercept": f, "threshold": f,
///    "positive_label": "...", "negative_label": "..." }`.
#[derive(Debug, Deserialize)]
struct LinearModel {
    weights: Vec<f64>,
    intercept: f64,
    threshold: f64,
    positive_label: String,
    negative_label: String,
}

impl LinearModel {
    fn decision(&self, features: &HashMap<usize, f64>) -> f64 {
        features
            .iter()
            .map(|(&idx, &value)| self.weights[idx] * value)
            .sum::<f64>()
            + self.intercept
    }
}

/// Classifier for one linear model plus its lexical feature transform.
#[derive(Debug)]
pub struct LinearClassifier {
    name: String,
    vectorizer: TfidfVectorizer,
    model: LinearModel,
    labels: Labels,
    threshold: f64,
}

impl LinearClassifier {
    /// Load `vectorizer.json` and `model.json` from a model directory.
    ///
    /// Missing or malformed artifacts fail here, before any request is
    /// served; classification itself never touches the filesystem.
    pub fn load(model_dir: &Path, name: impl Into<String>) -> anyhow::Result<Self> {
        let vectorizer_path = model_dir.join("vectorizer.json");
        let model_path = model_dir.join("model.json");

        anyhow::ensure!(
            vectorizer_path.exists(),
            "vectorizer.json not found in {model_dir:?}"
        );
        anyhow::ensure!(model_path.exists(), "model.json not found in {model_dir:?}");

        let vectorizer: TfidfVectorizer =
            serde_json::from_reader(BufReader::new(File::open(&vectorizer_path)?))
                .with_context(|| format!("parsing {}", vectorizer_path.display()))?;
        vectorizer.validate()?;

        let model: LinearModel =
            serde_json::from_reader(BufReader::new(File::open(&model_path)?))
                .with_context(|| format!("parsing {}", model_path.display()))?;
        anyhow::ensure!(
            model.weights.len() == vectorizer.dim(),
            "model has {} weights but vectorizer has {} features",
            model.weights.len(),
            vectorizer.dim()
        );

        let name = name.into();
        info!(
            name = %name,
            features = vectorizer.dim(),
            threshold = model.threshold,
            "loaded linear classifier"
        );

        let labels = Labels::new(model.positive_label.clone(), model.negative_label.clone());
        let threshold = model.threshold;
        Ok(Self {
            name,
            vectorizer,
            model,
            labels,
            threshold,
        })
    }

    /// Override the artifact's classification threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl TextClassifier for LinearClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        if text.trim().is_empty() {
            return Ok(Prediction::unknown());
        }

        let features = self.vectorizer.transform(text);
        let prob = sigmoid(self.model.decision(&features));
        let positive = prob >= self.threshold;

        Ok(Prediction {
            score: round2(prob * 100.0),
            message: confidence_message(prob, positive, &self.labels),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
