use uuid::Uuid;

use super::{provider::ChatMessage, system_prompt::SystemPrompt};
use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::AppState,
};

/// Echo the caller's session id, or mint a fresh one. Nothing is stored.
pub fn resolve_session_id(session_id: Option<String>) -> String {
    match session_id {
        Some(id) if !id.is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    }
}

/// The whole exchange sent upstream: persona first, then the user's text as-is.
pub fn build_exchange(prompt: &SystemPrompt, message: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(prompt.as_str()), ChatMessage::user(message)]
}

pub async fn relay_chat(state: &AppState, request: ChatRequest) -> Result<ChatResponse, AppError> {
    let session_id = resolve_session_id(request.session_id);
    let messages = build_exchange(&state.system_prompt, &request.message);

    let response = state
        .provider
        .complete(&state.model, &messages)
        .await
        .inspect_err(|e| tracing::error!(%session_id, error = %e, "Completion provider call failed"))?;

    Ok(ChatResponse { response, session_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::Role;

    #[test]
    fn supplied_session_id_is_echoed() {
        assert_eq!(resolve_session_id(Some("abc-123".to_string())), "abc-123");
        assert_eq!(resolve_session_id(Some(" spaced ".to_string())), " spaced ");
    }

    #[test]
    fn missing_or_empty_session_id_generates_uuid() {
        let a = resolve_session_id(None);
        let b = resolve_session_id(Some(String::new()));
        assert!(Uuid::parse_str(&a).is_ok());
        assert!(Uuid::parse_str(&b).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn exchange_is_system_then_user() {
        let prompt = SystemPrompt::new("You are AssetIQ.");
        let messages = build_exchange(&prompt, "  Compare AAPL and MSFT ");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "You are AssetIQ.");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "  Compare AAPL and MSFT ");
    }
}
