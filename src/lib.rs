//! Aegis - URL and content risk classifier
//!
//! Classifies a URL, a marketplace listing, a video's metadata or a block of
//! terms-of-service text, combining a known-bad domain table, an optional
//! pre-fitted URL score model and text heuristics.
//!
//! # Architecture
//!
//! 1. [`features`] turns a URL into lexical features
//! 2. [`url_classifier`] checks the domain table, then the score model,
//!    then a rule-based fallback
//! 3. [`text`] scores free text against scam phrasing
//! 4. [`policy`] combines the two per content type
//! 5. [`server`] exposes everything over HTTP
//!
//! # Example
//!
//! ```
//! use aegis::{ContentType, Engine, Payload};
//!
//! let engine = Engine::heuristic_only();
//! let payload = Payload::new().with("text", "You agree to arbitration of all claims.");
//! let result = engine.classify_as(ContentType::Tos, &payload).unwrap();
//!
//! println!("{}: {}", result.verdict, result.reason);
//! ```

pub use error::Error;

pub mod config;
pub mod features;
pub mod policy;
pub mod reputation;
pub mod scoring;
pub mod server;
pub mod text;
pub mod url_classifier;
pub mod verdict;

pub use policy::{ClassifyError, ClassifyRequest, ContentType, Engine, Payload};
pub use verdict::{Classification, Verdict};

mod error {
    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
        #[error("Pattern error: {0}")]
        Pattern(#[from] regex::Error),
        #[error("Shape error: {0}")]
        Shape(#[from] ndarray::ShapeError),
        #[error("ORT error: {0}")]
        Ort(#[from] ort::Error),
        #[error("{0}")]
        Model(String),
        #[error("Dataset error: {0}")]
        Dataset(String),
    }
}
