//! # Formula Suggestion
//!
//! Request and response types for asking a hosted language model which
//! calculator fits a free-text description. This module only builds the
//! prompt and parses the reply; the network call lives in the caller
//! (see `calc_cli`), so the formula library never does I/O.
//!
//! The model is asked for a fixed two-field JSON object:
//!
//! ```json
//! { "suggestedFunction": "loan-emi", "explanation": "..." }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{CalcError, CalcResult};
use crate::formulas::{Formula, ALL_FORMULAS};

/// Longest description accepted, in characters
pub const MAX_SUGGESTION_CHARS: usize = 2000;

/// A validated free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    text: String,
}

impl SuggestionRequest {
    pub fn new(text: impl Into<String>) -> CalcResult<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(CalcError::missing_field("text"));
        }
        let chars = text.chars().count();
        if chars > MAX_SUGGESTION_CHARS {
            return Err(CalcError::invalid_input(
                "text",
                format!("{} characters", chars),
                format!("Description must be at most {} characters", MAX_SUGGESTION_CHARS),
            ));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Prompt listing the catalog so the model answers with a real id.
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "You help users pick a calculator. Choose the single best match for the request \
             from this catalog and answer with its id in `suggestedFunction` and a one or two \
             sentence `explanation`.\n\nCatalog:\n",
        );
        for formula in ALL_FORMULAS {
            let meta = formula.metadata();
            prompt.push_str(&format!("- {}: {} ({})\n", meta.id, meta.name, meta.description));
        }
        prompt.push_str("\nRequest: ");
        prompt.push_str(&self.text);
        prompt
    }

    /// JSON schema for the two-field reply.
    pub fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "suggestedFunction": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            },
            "required": ["suggestedFunction", "explanation"]
        })
    }
}

/// The model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSuggestion {
    pub suggested_function: String,
    pub explanation: String,
}

impl FormulaSuggestion {
    /// Parse the model's text reply. Markdown code fences are tolerated.
    pub fn parse(reply: &str) -> CalcResult<Self> {
        let body = strip_code_fence(reply.trim());
        let suggestion: FormulaSuggestion = serde_json::from_str(body)?;
        if suggestion.suggested_function.trim().is_empty() {
            return Err(CalcError::missing_field("suggestedFunction"));
        }
        Ok(suggestion)
    }

    /// Resolve the suggestion to a catalog entry by id, then by name.
    pub fn formula(&self) -> Option<Formula> {
        let wanted = self.suggested_function.trim();
        Formula::from_id(wanted).or_else(|| {
            ALL_FORMULAS
                .iter()
                .copied()
                .find(|f| f.metadata().name.eq_ignore_ascii_case(wanted))
        })
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
