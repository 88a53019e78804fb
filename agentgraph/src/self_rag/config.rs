//! Self-RAG agent configuration.

use serde::Deserialize;

use crate::grader::DEFAULT_GRADER_RETRIES;

/// Translation of the question (input) or the answer (output) through the chat model.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    /// Target language, e.g. `"zh-tw"`, `"English"`.
    pub language: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language: "zh-tw".to_string(),
        }
    }
}

impl TranslationConfig {
    pub fn to_language(language: impl Into<String>) -> Self {
        Self {
            enabled: true,
            language: language.into(),
        }
    }
}

/// Self-RAG agent configuration.
///
/// `check_hallucination` wires the grounding grader into the `grade_generation` router. It is
/// off by default, in which case every answer counts as grounded and only answer relevance
/// is graded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelfRagConfig {
    /// Documents fetched per retrieval.
    pub top_k: usize,
    /// Attempts per grader call.
    pub grader_retries: usize,
    pub check_hallucination: bool,
    pub input_translation: TranslationConfig,
    pub output_translation: TranslationConfig,
}

impl Default for SelfRagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            grader_retries: DEFAULT_GRADER_RETRIES,
            check_hallucination: false,
            input_translation: TranslationConfig::default(),
            output_translation: TranslationConfig::default(),
        }
    }
}

impl SelfRagConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_grader_retries(mut self, retries: usize) -> Self {
        self.grader_retries = retries;
        self
    }

    pub fn with_check_hallucination(mut self, enabled: bool) -> Self {
        self.check_hallucination = enabled;
        self
    }

    pub fn with_input_translation(mut self, translation: TranslationConfig) -> Self {
        self.input_translation = translation;
        self
    }

    pub fn with_output_translation(mut self, translation: TranslationConfig) -> Self {
        self.output_translation = translation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Partial JSON fills the rest from defaults; hallucination check stays off.
    #[test]
    fn deserialize_with_defaults() {
        let cfg: SelfRagConfig =
            serde_json::from_str(r#"{"top_k": 5, "output_translation": {"enabled": true}}"#)
                .unwrap();
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.grader_retries, 3);
        assert!(!cfg.check_hallucination);
        assert!(cfg.output_translation.enabled);
        assert_eq!(cfg.output_translation.language, "zh-tw");
        assert!(!cfg.input_translation.enabled);
    }
}
