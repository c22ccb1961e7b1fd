//! Cliente de Yandex SpeechKit (síntesis v1, MP3)

use async_trait::async_trait;
use reqwest::Client;

use crate::config::EnvironmentConfig;
use crate::services::tts_service::{SpeechBackend, SpeechError};

pub struct SpeechKitClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    folder_id: String,
    voice: String,
}

impl SpeechKitClient {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            url: config.yandex_tts_url.clone(),
            api_key: config.yandex_api_key.clone(),
            folder_id: config.yandex_folder_id.clone(),
            voice: config.yandex_voice.clone(),
        }
    }

    pub fn synthesis_params<'a>(&'a self, text: &'a str) -> [(&'static str, &'a str); 7] {
        [
            ("text", text),
            ("lang", "ru-RU"),
            ("voice", self.voice.as_str()),
            ("speed", "1.0"),
            ("format", "mp3"),
            ("emotion", "good"),
            ("folderId", self.folder_id.as_str()),
        ]
    }
}

#[async_trait]
impl SpeechBackend for SpeechKitClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SpeechError::MissingCredentials("YANDEX_API_KEY"))?;

        let response = self
            .client
            .post(&self.url)
            .query(&self.synthesis_params(text))
            .header("Authorization", format!("Api-Key {}", api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_params_use_configured_voice() {
        let config = EnvironmentConfig {
            yandex_voice: "filipp".into(),
            yandex_folder_id: "b1gfolder".into(),
            ..EnvironmentConfig::default()
        };
        let client = SpeechKitClient::new(Client::new(), &config);
        let params = client.synthesis_params("Добрый день");

        assert!(params.contains(&("voice", "filipp")));
        assert!(params.contains(&("format", "mp3")));
        assert!(params.contains(&("folderId", "b1gfolder")));
        assert!(params.contains(&("text", "Добрый день")));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = SpeechKitClient::new(Client::new(), &EnvironmentConfig::default());
        let err = client.synthesize("текст").await.unwrap_err();
        assert!(matches!(err, SpeechError::MissingCredentials("YANDEX_API_KEY")));
    }
}
