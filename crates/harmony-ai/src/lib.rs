//! Prediction pipeline: classifier adapters behind one scoring interface,
//! plus the dual-predictor orchestrator that merges their outputs.

mod classifier;
mod linear;
mod predictor;
#[cfg(feature = "onnx")]
mod sequence;

pub use classifier::{Labels, Prediction, ScoreKind, TextClassifier, round2, sigmoid};
pub use linear::{LinearClassifier, TfidfVectorizer};
pub use predictor::{
    DualPrediction, Predictor, load_depression, load_predictor, load_schizophrenia,
};
#[cfg(feature = "onnx")]
pub use sequence::SequenceClassifier;
