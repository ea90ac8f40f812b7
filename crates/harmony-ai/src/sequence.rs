//! ONNX sequence-model classifier: tokenizer plus fixed-length padding.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`.
//! The exported network takes one `[1, max_len]` tensor of token ids and
//! emits a single value; by default that value is read as the
//! positive-class probability (the network ends in a sigmoid), with
//! [`ScoreKind::Decision`] available for graphs that emit a raw logit.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tracing::info;

use crate::classifier::{
    Labels, Prediction, ScoreKind, TextClassifier, confidence_message, round2,
};

/// Sequence length the tokenizer pads and truncates to.
pub const DEFAULT_MAX_LEN: usize = 100;

/// Calibrated-probability models classify positive at 0.5.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Classifier for one ONNX sequence model plus its tokenizer.
#[derive(Debug)]
pub struct SequenceClassifier {
    name: String,
    // ort sessions take &mut to run; the artifacts behind it are read-only
    // after load, so one lock keeps classify(&self) Send + Sync.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Labels,
    threshold: f64,
    max_len: usize,
    output: ScoreKind,
}

impl SequenceClassifier {
    /// Load a model from a directory containing `model.onnx` and
    /// `tokenizer.json`.
    ///
    /// Missing or unreadable artifacts fail here, at startup, never per
    /// call.
    pub fn load(
        model_dir: &Path,
        name: impl Into<String>,
        labels: Labels,
    ) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        // The network expects a fixed-length token-index sequence: truncate
        // long texts and pad short ones to the same max_len.
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: DEFAULT_MAX_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(DEFAULT_MAX_LEN),
            ..Default::default()
        }));

        let name = name.into();
        info!(name = %name, model = %model_path.display(), "loaded sequence classifier");
        Ok(Self {
            name,
            session: Mutex::new(session),
            tokenizer,
            labels,
            threshold: DEFAULT_THRESHOLD,
            max_len: DEFAULT_MAX_LEN,
            output: ScoreKind::Probability,
        })
    }

    /// Override the default classification threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Declare how the model's single output is to be read.
    #[must_use]
    pub fn with_output(mut self, output: ScoreKind) -> Self {
        self.output = output;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl TextClassifier for SequenceClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<Prediction> {
        if text.trim().is_empty() {
            return Ok(Prediction::unknown());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        anyhow::ensure!(
            ids.len() == self.max_len,
            "expected {} token ids after padding, got {}",
            self.max_len,
            ids.len()
        );

        let shape = [1i64, self.max_len as i64];
        let input = Tensor::from_array((shape, ids.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("classifier session poisoned"))?;
        let outputs = session.run(ort::inputs![input])?;

        let (output_shape, output_data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.iter().product::<i64>() == 1,
            "unexpected output shape: {dims:?}, expected a single value"
        );

        let prob = self.output.probability(f64::from(output_data[0]));
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
