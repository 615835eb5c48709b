use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of the conversation. Serialized as-is onto the chat-completion
/// wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Ordered message log for one conversation. Index 0 is always the current
/// system message; it is replaced in place, never appended.
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message {
                role: Role::System,
                content: system_prompt.into(),
            }],
        }
    }

    /// Replaces the system message only; later turns are untouched.
    pub fn set_system_prompt(&mut self, prompt: &str) -> Result<(), RecommendError> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(RecommendError::Validation(
                "프롬프트를 입력해주세요.".to_string(),
            ));
        }
        self.messages[0] = Message {
            role: Role::System,
            content: trimmed.to_string(),
        };
        Ok(())
    }

    /// Appends a user or assistant turn. System content may only be set via
    /// `new`, `set_system_prompt` or `reset`.
    pub fn push_turn(&mut self, role: Role, content: &str) -> Result<(), RecommendError> {
        if role == Role::System {
            return Err(RecommendError::Validation(
                "system 메시지는 프롬프트 설정으로만 변경할 수 있습니다.".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(RecommendError::Validation(
                "메시지 내용이 비어 있습니다.".to_string(),
            ));
        }
        self.messages.push(Message {
            role,
            content: content.to_string(),
        });
        Ok(())
    }

    pub fn add_user_message(&mut self, content: &str) -> Result<(), RecommendError> {
        self.push_turn(Role::User, content)
    }

    pub fn add_assistant_message(&mut self, content: &str) -> Result<(), RecommendError> {
        self.push_turn(Role::Assistant, content)
    }

    /// Discards all turns, leaving a single fresh system message.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.messages.clear();
        self.messages.push(Message {
            role: Role::System,
            content: system_prompt.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// Number of user/assistant turns, excluding the system message.
    pub fn turn_count(&self) -> usize {
        self.messages.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_system_message() {
        let state = ConversationState::new("안내");
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::System);
        assert_eq!(state.system_prompt(), "안내");
        assert_eq!(state.turn_count(), 0);
    }

    #[test]
    fn system_message_stays_first_across_operations() {
        let mut state = ConversationState::new("v1");
        state.add_user_message("6-8일 보통").unwrap();
        state.add_assistant_message("추천 결과").unwrap();
        state.set_system_prompt("v2").unwrap();
        state.add_user_message("더 긴 코스는?").unwrap();

        assert_eq!(state.messages()[0].role, Role::System);
        assert_eq!(state.system_prompt(), "v2");
        assert_eq!(state.turn_count(), 3);
        // replacing the prompt did not disturb existing turns
        assert_eq!(state.messages()[1].content, "6-8일 보통");
        assert_eq!(state.messages()[2].content, "추천 결과");
    }

    #[test]
    fn push_turn_rejects_system_role() {
        let mut state = ConversationState::new("sys");
        let err = state.push_turn(Role::System, "몰래 교체").unwrap_err();
        assert!(matches!(err, RecommendError::Validation(_)));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn push_turn_rejects_empty_content() {
        let mut state = ConversationState::new("sys");
        assert!(state.add_user_message("   ").is_err());
        assert_eq!(state.turn_count(), 0);
    }

    #[test]
    fn empty_prompt_update_is_rejected() {
        let mut state = ConversationState::new("sys");
        assert!(state.set_system_prompt("  \n ").is_err());
        assert_eq!(state.system_prompt(), "sys");
    }

    #[test]
    fn reset_leaves_exactly_one_system_message() {
        let mut state = ConversationState::new("old");
        state.add_user_message("질문").unwrap();
        state.add_assistant_message("답변").unwrap();
        state.reset("new");

        assert_eq!(
            state.messages(),
            &[Message {
                role: Role::System,
                content: "new".to_string(),
            }]
        );
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message {
            role: Role::Assistant,
            content: "ok".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "ok");
    }
}
