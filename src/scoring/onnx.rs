//! ONNX-backed score provider.
//!
//! Expects a binary classifier exported with one float input of shape
//! `[1, FEATURE_COUNT]`. If the model has a probability output, the
//! positive-class column is the score. Otherwise the raw decision output is
//! used as-is.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use crate::features::{UrlFeatures, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::scoring::ScoreProvider;
use crate::Error;

/// Where to find the model and how its tensors are named.
#[derive(Debug, Clone)]
pub struct OnnxOptions {
    pub model_path: PathBuf,
    /// JSON array of the feature names the model was fit on.
    pub schema_path: Option<PathBuf>,
    pub input_name: String,
    pub probability_output: String,
    pub raw_output: String,
}

impl Default for OnnxOptions {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            schema_path: None,
            input_name: "float_input".to_string(),
            probability_output: "probabilities".to_string(),
            raw_output: "label".to_string(),
        }
    }
}

impl OnnxOptions {
    /// Schema sidecar path: explicit, or `<model>.features.json`.
    pub fn schema_path(&self) -> PathBuf {
        self.schema_path
            .clone()
            .unwrap_or_else(|| self.model_path.with_extension("features.json"))
    }
}

/// Verify that a schema sidecar lists exactly [`FEATURE_LAYOUT`], in order.
pub fn check_schema<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let raw = fs::read_to_string(path.as_ref())?;
    let names: Vec<String> = serde_json::from_str(&raw)?;

    if names.len() != FEATURE_LAYOUT.len() {
        return Err(Error::Model(format!(
            "model expects {} features, layout has {}",
            names.len(),
            FEATURE_LAYOUT.len()
        )));
    }

    for (i, (got, want)) in names.iter().zip(FEATURE_LAYOUT).enumerate() {
        if got != want {
            return Err(Error::Model(format!(
                "feature {} is `{}` in the model schema but `{}` in the layout",
                i, got, want
            )));
        }
    }

    Ok(())
}

/// Score provider running a pre-fitted ONNX classifier.
pub struct OnnxScoreProvider {
    session: Mutex<Session>,
    input_name: String,
    probability_output: String,
    raw_output: String,
}

impl OnnxScoreProvider {
    /// Load the model, checking its feature schema first when one exists.
    pub fn load(options: &OnnxOptions) -> Result<Self, Error> {
        let schema_path = options.schema_path();
        if schema_path.exists() {
            check_schema(&schema_path)?;
        } else {
            tracing::warn!(
                path = %schema_path.display(),
                "no feature schema next to the model, assuming the built-in layout"
            );
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&options.model_path)?;

        Ok(Self {
            session: Mutex::new(session),
            input_name: options.input_name.clone(),
            probability_output: options.probability_output.clone(),
            raw_output: options.raw_output.clone(),
        })
    }

    fn run(&self, vector: [f32; FEATURE_COUNT]) -> Result<f64, Error> {
        let input = Array2::from_shape_vec((1, FEATURE_COUNT), vector.to_vec())?;
        let input_tensor = Tensor::from_array(input)?;

        // A panic in an earlier run poisons the lock, but the session itself
        // holds no per-request state
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);

        let outputs = session.run(ort::inputs![
            self.input_name.as_str() => input_tensor
        ])?;

        let mut read = ModelOutputs::default();
        if let Some(probs) = outputs.get(self.probability_output.as_str()) {
            let probs = probs.try_extract_array::<f32>()?;
            read.probabilities = Some(probs.iter().cloned().collect());
        } else if let Some(raw) = outputs.get(self.raw_output.as_str()) {
            read.decision = Some(match raw.try_extract_array::<f32>() {
                Ok(values) => values.iter().map(|&v| v as f64).collect(),
                Err(_) => {
                    let values = raw.try_extract_array::<i64>()?;
                    values.iter().map(|&v| v as f64).collect()
                }
            });
        }

        read.score(&self.probability_output, &self.raw_output)
    }
}

impl ScoreProvider for OnnxScoreProvider {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn score(&self, features: &UrlFeatures) -> Result<f64, Error> {
        self.run(features.to_vector())
    }
}

/// Output tensors read back from one inference run.
#[derive(Debug, Default, PartialEq)]
struct ModelOutputs {
    /// Class probabilities, when the model is calibrated.
    probabilities: Option<Vec<f32>>,
    /// Raw decision output, read as f32 or i64.
    decision: Option<Vec<f64>>,
}

impl ModelOutputs {
    /// The probability output wins over the raw decision output.
    fn score(&self, probability_output: &str, raw_output: &str) -> Result<f64, Error> {
        if let Some(probs) = &self.probabilities {
            return positive_class(probs);
        }
        match &self.decision {
            Some(values) => values
                .first()
                .copied()
                .ok_or_else(|| Error::Model("empty decision output".to_string())),
            None => Err(Error::Model(format!(
                "model has neither `{}` nor `{}` output",
                probability_output, raw_output
            ))),
        }
    }
}

/// Probability of the positive class from a `[1, n]` probability row.
fn positive_class(probs: &[f32]) -> Result<f64, Error> {
    match probs {
        [_, positive, ..] => Ok(*positive as f64),
        [single] => Ok(*single as f64),
        [] => Err(Error::Model("empty probability output".to_string())),
    }
}
