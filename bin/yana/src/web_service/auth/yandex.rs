use chipp_http::{HttpClient, HttpMethod, NoInterceptor};
use serde::Deserialize;
use url::Url;

use crate::{Error, Result};

pub struct OauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OauthConfig {
    pub fn from_env() -> OauthConfig {
        OauthConfig {
            client_id: std::env::var("YANDEX_CLIENT_ID")
                .expect("set ENV variable YANDEX_CLIENT_ID"),
            client_secret: std::env::var("YANDEX_CLIENT_SECRET")
                .expect("set ENV variable YANDEX_CLIENT_SECRET"),
            redirect_uri: std::env::var("REDIRECT_URI").expect("set ENV variable REDIRECT_URI"),
        }
    }
}

/// Broker for the Yandex OAuth endpoints: code exchange, refresh and the
/// user info lookup that binds a token to an account.
pub struct YandexOauth {
    oauth: HttpClient<NoInterceptor>,
    login: HttpClient<NoInterceptor>,
    config: OauthConfig,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub id: String,

    #[serde(default)]
    pub real_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserInfo {
    pub fn name(&self) -> &str {
        self.real_name
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(&self.id)
    }
}

const SCOPE: &str = "home:read home:write";

impl YandexOauth {
    pub fn new(config: OauthConfig) -> Result<YandexOauth> {
        Ok(YandexOauth {
            oauth: HttpClient::new("https://oauth.yandex.ru")?,
            login: HttpClient::new("https://login.yandex.ru")?,
            config,
        })
    }

    pub fn authorize_url(&self, state: &str) -> Url {
        let mut url = Url::parse("https://oauth.yandex.ru/authorize").unwrap();

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", SCOPE)
            .append_pair("state", state);

        url
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_uri),
        ])
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ])
        .await
    }

    pub async fn user_info(&self, access_token: &str) -> Result<UserInfo> {
        let url = format!(
            "https://login.yandex.ru/info?format=json&oauth_token={access_token}"
        );
        let request = self.login.new_request_with_url(url)?;

        let response = self
            .login
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        decode(response)
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let mut request = self.oauth.new_request(["token"]);
        request.set_method(HttpMethod::Post);
        request.body = Some(serde_urlencoded::to_string(params)?.into_bytes());

        let response = self
            .oauth
            .perform_request(request, |_, response| {
                Ok((response.status_code as u16, response.body))
            })
            .await?;

        decode(response)
    }
}

fn decode<T: serde::de::DeserializeOwned>((status_code, body): (u16, Vec<u8>)) -> Result<T> {
    if status_code != 200 {
        return Err(Error::Upstream(status_code));
    }

    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OauthConfig {
        OauthConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://example.com/oauth/callback".to_string(),
        }
    }

    #[test]
    fn test_authorize_url() {
        let oauth = YandexOauth::new(config()).unwrap();
        let url = oauth.authorize_url("abc");

        assert_eq!(url.host_str(), Some("oauth.yandex.ru"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("client_id".to_string(), "client".to_string())));
        assert!(pairs.contains(&("state".to_string(), "abc".to_string())));
    }

    #[test]
    fn test_user_name_fallbacks() {
        let user = UserInfo {
            id: "42".to_string(),
            real_name: None,
            display_name: Some("chipp".to_string()),
        };
        assert_eq!(user.name(), "chipp");

        let user = UserInfo {
            id: "42".to_string(),
            real_name: None,
            display_name: None,
        };
        assert_eq!(user.name(), "42");
    }
}
