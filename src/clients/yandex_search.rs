//! Cliente de Yandex XML Search, usado solo para enriquecer la narración

use async_trait::async_trait;
use reqwest::Client;

use crate::config::EnvironmentConfig;
use crate::services::content_service::{ContentError, PassageSearch};

const SERVICE: &str = "Yandex Search API";

const GROUP_BY: &str = "attr=d.mode=deep.groups-on-page=5.docs-in-group=1";

pub struct YandexSearchClient {
    client: Client,
    url: String,
    user: String,
    key: String,
}

impl YandexSearchClient {
    /// `None` si falta el usuario o la clave de búsqueda
    pub fn from_config(client: Client, config: &EnvironmentConfig) -> Option<Self> {
        let user = config.yandex_search_user.clone()?;
        let key = config.yandex_search_key.clone()?;

        Some(Self {
            client,
            url: config.yandex_search_url.clone(),
            user,
            key,
        })
    }

    pub fn query_params<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 7] {
        [
            ("user", self.user.as_str()),
            ("key", self.key.as_str()),
            ("query", query),
            ("l10n", "ru"),
            ("sortby", "rlv"),
            ("maxpassages", "3"),
            ("groupby", GROUP_BY),
        ]
    }
}

#[async_trait]
impl PassageSearch for YandexSearchClient {
    async fn search(&self, query: &str) -> Result<String, ContentError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|source| ContentError::Transport { service: SERVICE, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: String::new(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| ContentError::Transport { service: SERVICE, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_credentials() {
        let mut config = EnvironmentConfig {
            yandex_search_user: Some("user".into()),
            ..EnvironmentConfig::default()
        };
        assert!(YandexSearchClient::from_config(Client::new(), &config).is_none());

        config.yandex_search_key = Some("key".into());
        assert!(YandexSearchClient::from_config(Client::new(), &config).is_some());
    }

    #[test]
    fn test_query_params() {
        let config = EnvironmentConfig {
            yandex_search_user: Some("user".into()),
            yandex_search_key: Some("key".into()),
            ..EnvironmentConfig::default()
        };
        let client = YandexSearchClient::from_config(Client::new(), &config).unwrap();
        let params = client.query_params("Кремль Москва история");

        assert!(params.contains(&("query", "Кремль Москва история")));
        assert!(params.contains(&("maxpassages", "3")));
        assert!(params.contains(&("groupby", GROUP_BY)));
    }
}
