//! Prompt templates

use std::collections::BTreeMap;

use crate::llm::client::ChatMessage;

/// Model answering free-form chat questions
pub const CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Model producing the structured assessment feedback
pub const FEEDBACK_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

pub const ADVISOR_PERSONA: &str = "You are a child mental health advisor";

const FEEDBACK_SYSTEM_PROMPT: &str = r#"You are a child mental health advisor. Respond only in JSON format. The format should be:
{
  "action": "<action suggestions & string>",
  "feedback": "<overall feedback && string>",
  "tag": "<normal / needs help / critical>"
}"#;

/// Conversation for one chat question
pub fn chat_messages(query: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(ADVISOR_PERSONA), ChatMessage::user(query)]
}

/// Conversation asking for feedback on category-name → score pairs
pub fn feedback_messages(scores: &BTreeMap<String, f64>) -> Vec<ChatMessage> {
    let scores_json = serde_json::to_string(scores).unwrap_or_else(|_| "{}".to_string());
    vec![
        ChatMessage::system(FEEDBACK_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Based on the following category-wise scores: {}, provide feedback, actionable suggestions, and a tag (normal / needs help / critical) based on the severity.",
            scores_json
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_messages() {
        let messages = chat_messages("How do I help my child sleep?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are a child mental health advisor");
        assert_eq!(messages[1].content, "How do I help my child sleep?");
    }

    #[test]
    fn test_feedback_messages_embed_scores() {
        let scores: BTreeMap<String, f64> = [
            ("Self-Esteem".to_string(), 2.4),
            ("Stress and Anxiety".to_string(), 3.0),
        ]
        .into_iter()
        .collect();

        let messages = feedback_messages(&scores);
        assert!(messages[0].content.contains("Respond only in JSON format"));
        assert!(messages[1]
            .content
            .contains(r#"{"Self-Esteem":2.4,"Stress and Anxiety":3.0}"#));
    }
}
