use serde::{Deserialize, Serialize};

/// An LLM offered to the user, as listed in the models file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub display_name: String,
    pub model_id: String,
}

impl ModelOption {
    pub fn new(display_name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            model_id: model_id.into(),
        }
    }

    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new("GPT-4o", "openai/gpt-4o"),
            Self::new("Claude 3.5 Sonnet", "anthropic/claude-3.5-sonnet"),
        ]
    }

    pub fn find_by_display_name<'a>(models: &'a [Self], display_name: &str) -> Option<&'a Self> {
        models.iter().find(|m| m.display_name == display_name)
    }
}
