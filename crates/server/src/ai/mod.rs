//! AI features powered by the Gemini API

pub mod analyzer;
pub mod client;

pub use analyzer::{AnalysisError, SymptomAnalyzer};
pub use client::{CompletionModel, GeminiClient, ModelError};
