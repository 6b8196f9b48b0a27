// src/state.rs
use std::sync::Arc;

use crate::services::{provider::CompletionProvider, system_prompt::SystemPrompt};

pub type SharedState = Arc<AppState>;

/// Read-only after startup; shared by every request.
pub struct AppState {
    pub system_prompt: SystemPrompt,
    pub provider: Arc<dyn CompletionProvider>,
    pub model: String,
}

impl AppState {
    pub fn new(
        system_prompt: SystemPrompt,
        provider: Arc<dyn CompletionProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt,
            provider,
            model: model.into(),
        }
    }
}
