use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::Registration;

use super::ApiError;

/// 每次请求重新获取的短期访问令牌，不跨请求复用
#[derive(Debug)]
pub struct AccessToken(SecretString);

pub struct WebinarClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    oauth_url: reqwest::Url,
    client_id: String,
    client_secret: SecretString,
    account_id: String,
}

impl WebinarClient {
    fn new(
        base_url: &str,
        oauth_url: &str,
        timeout: Duration,
        client_id: String,
        client_secret: SecretString,
        account_id: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build webinar client.");
        let base_url = reqwest::Url::parse(base_url).expect("failed to parse webinar base url.");
        let oauth_url = reqwest::Url::parse(oauth_url).expect("failed to parse oauth url.");

        Self {
            client,
            base_url,
            oauth_url,
            client_id,
            client_secret,
            account_id,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        let webinar_config = &config.webinar;
        let timeout = Duration::from_millis(webinar_config.timeout_milliseconds);

        Self::new(
            &webinar_config.base_url,
            &webinar_config.oauth_url,
            timeout,
            webinar_config.client_id.clone(),
            webinar_config.client_secret.clone(),
            webinar_config.account_id.clone(),
        )
    }

    /// client-credentials方式换取访问令牌
    #[tracing::instrument(name = "fetching webinar access token", skip_all)]
    pub async fn fetch_access_token(&self) -> Result<AccessToken, ApiError> {
        let url = self.oauth_url.join("/oauth/token").unwrap();
        let response = self
            .client
            .post(url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.account_id.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Provider { status, body });
        }

        let token: TokenResponse = response.json().await?;
        Ok(AccessToken(token.access_token))
    }

    /// 为指定活动创建注册人，返回服务商生成的参会链接
    #[tracing::instrument(name = "creating webinar registrant", skip_all)]
    pub async fn create_registrant(
        &self,
        token: &AccessToken,
        registration: &Registration,
    ) -> Result<String, ApiError> {
        let url = self
            .base_url
            .join(&format!("/v2/webinars/{}/registrants", registration.event_id))
            .unwrap();
        let body = RegistrantRecord {
            email: registration.email.as_ref(),
            first_name: &registration.first_name,
            last_name: &registration.last_name,
            org: &registration.company,
            job_title: &registration.job_title,
            city: &registration.city,
            state: &registration.state,
            zip: &registration.zip_code,
            country: registration.region.as_ref(),
            phone: &registration.phone,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(token.0.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Provider { status, body });
        }

        let registrant: RegistrantResponse = response.json().await?;
        Ok(registrant.join_url)
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: SecretString,
}

#[derive(serde::Deserialize)]
struct RegistrantResponse {
    join_url: String,
}

#[derive(serde::Serialize)]
struct RegistrantRecord<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    org: &'a str,
    job_title: &'a str,
    city: &'a str,
    state: &'a str,
    zip: &'a str,
    country: &'a str,
    phone: &'a str,
}
