//! Cliente HTTP para YandexGPT (API de completions)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::EnvironmentConfig;
use crate::services::content_service::{ContentError, TextGenerator};

const SERVICE: &str = "YandexGPT API";

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: &str = "1000";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub result: CompletionResult,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
pub struct Alternative {
    pub message: Message,
}

pub struct YandexGptClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    folder_id: String,
}

impl YandexGptClient {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            url: config.yandex_gpt_url.clone(),
            api_key: config.yandex_api_key.clone(),
            folder_id: config.yandex_folder_id.clone(),
        }
    }

    pub fn build_request(&self, system_prompt: &str, user_prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model_uri: format!("gpt://{}/yandexgpt/latest", self.folder_id),
            completion_options: CompletionOptions {
                stream: false,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS.to_string(),
            },
            messages: vec![
                Message {
                    role: "system".to_string(),
                    text: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    text: user_prompt.to_string(),
                },
            ],
        }
    }
}

/// Texto de la primera alternativa
pub fn first_alternative(response: CompletionResponse) -> Result<String, ContentError> {
    response
        .result
        .alternatives
        .into_iter()
        .next()
        .map(|alternative| alternative.message.text)
        .ok_or(ContentError::EmptyResult)
}

#[async_trait]
impl TextGenerator for YandexGptClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ContentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ContentError::MissingCredentials("YANDEX_API_KEY"))?;

        let request = self.build_request(system_prompt, user_prompt);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Api-Key {}", api_key))
            .header("x-folder-id", &self.folder_id)
            .json(&request)
            .send()
            .await
            .map_err(|source| ContentError::Transport { service: SERVICE, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| ContentError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })?;

        first_alternative(completion)
    }
}
