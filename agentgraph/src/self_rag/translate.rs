//! Translation through the chat model, used for the question and the answer.

use crate::error::AgentError;
use crate::llm::{fill_template, LlmClient, ResponseFormat};
use crate::message::Message;

use super::prompts::TRANSLATOR_PROMPT;

pub(super) async fn translate(
    llm: &dyn LlmClient,
    text: &str,
    language: &str,
) -> Result<String, AgentError> {
    let messages = [
        Message::system(fill_template(TRANSLATOR_PROMPT, &[("language", language)])),
        Message::user(text),
    ];
    let response = llm.invoke(&messages, ResponseFormat::Text).await?;
    tracing::debug!(language, "Translated text");
    Ok(response.content.trim().to_string())
}
