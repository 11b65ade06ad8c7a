use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::TaggerConfig;
use crate::constants::{CANDIDATE_INDUSTRIES, OPENAI_CHAT_URL, TAGGER_MODEL, TAGGER_TIMEOUT_SECS};
use crate::error::{LoaderError, Result};

const SYSTEM_PROMPT: &str = "You are an expert in categorizing events based on their descriptions.";

/// Classifies an event into industry tags.
///
/// Returns a comma-separated tag list, or `None` when the classifier had nothing to say.
#[async_trait]
pub trait IndustryTagger: Send + Sync {
    async fn tag_event(&self, name: Option<&str>, description: Option<&str>) -> Result<Option<String>>;
}

/// Tagger that never tags, used when tagging is switched off
pub struct NoopTagger;

#[async_trait]
impl IndustryTagger for NoopTagger {
    async fn tag_event(&self, _name: Option<&str>, _description: Option<&str>) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Chat-completions backed tagger
pub struct OpenAiTagger {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiTagger {
    pub fn new(config: &TaggerConfig) -> Result<Self> {
        Self::with_endpoint(config, OPENAI_CHAT_URL)
    }

    pub fn with_endpoint(config: &TaggerConfig, endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TAGGER_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl IndustryTagger for OpenAiTagger {
    #[instrument(skip(self, description))]
    async fn tag_event(&self, name: Option<&str>, description: Option<&str>) -> Result<Option<String>> {
        let prompt = build_prompt(name, description);
        let request = ChatRequest {
            model: TAGGER_MODEL,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &prompt },
            ],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LoaderError::Tagger {
                message: format!("classifier responded with {}: {}", status.as_u16(), body),
            });
        }

        let body: ChatResponse = resp.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LoaderError::Tagger {
                message: "classifier returned no choices".to_string(),
            })?;

        let tags = clean_tags(&content);
        debug!(tags = ?tags, "Tagged event");
        Ok(tags)
    }
}

/// User prompt for one event. Absent fields render as `None`, matching how the
/// candidate list is rendered as a bracketed, quoted list.
pub fn build_prompt(name: Option<&str>, description: Option<&str>) -> String {
    let candidates = CANDIDATE_INDUSTRIES
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Tag the following event with appropriate industries from this list: [{candidates}]. \
         Event name: {}. Event description: {}. \
         Include any other relevant industries as you see fit. \
         Provide only industry tags as output, separated by commas, and no other words.",
        name.unwrap_or("None"),
        description.unwrap_or("None"),
    )
}

/// Trim the reply and strip wrapping periods; an empty reply means no tags.
pub fn clean_tags(reply: &str) -> Option<String> {
    let cleaned = reply.trim().trim_matches('.');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_candidate() {
        let prompt = build_prompt(Some("PetroTech Summit"), Some("Upstream oil conference"));
        assert!(prompt.contains("['Oil & Gas', 'Technology', 'Finance'"));
        assert!(prompt.contains("'Telecommunications']"));
        assert!(prompt.contains("Event name: PetroTech Summit."));
        assert!(prompt.contains("Event description: Upstream oil conference."));
    }

    #[test]
    fn test_prompt_with_missing_fields() {
        let prompt = build_prompt(None, None);
        assert!(prompt.contains("Event name: None."));
        assert!(prompt.contains("Event description: None."));
    }

    #[test]
    fn test_clean_tags() {
        assert_eq!(
            clean_tags("  Technology, Finance.\n").as_deref(),
            Some("Technology, Finance")
        );
        assert_eq!(clean_tags("...Energy..").as_deref(), Some("Energy"));
        assert_eq!(clean_tags(" . "), None);
        assert_eq!(clean_tags(""), None);
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = build_prompt(Some("Expo"), None);
        let request = ChatRequest {
            model: TAGGER_MODEL,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &prompt },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], prompt);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Retail, Technology."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.choices[0].message.content.as_deref().unwrap();
        assert_eq!(clean_tags(content).as_deref(), Some("Retail, Technology"));
    }

    #[tokio::test]
    async fn test_noop_tagger() {
        let tags = NoopTagger.tag_event(Some("Expo"), Some("Trade show")).await.unwrap();
        assert_eq!(tags, None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let config = TaggerConfig { api_key: "sk-test".to_string() };
        let tagger = OpenAiTagger::with_endpoint(&config, "http://127.0.0.1:9/v1/chat/completions").unwrap();
        let result = tagger.tag_event(Some("Expo"), None).await;
        assert!(matches!(result, Err(LoaderError::Http(_))));
    }
}
