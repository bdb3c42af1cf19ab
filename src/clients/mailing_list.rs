use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::Registration;

use super::ApiError;

pub struct MailingListClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    api_key: SecretString,
    primary_list: String,
    secondary_list: Option<String>,
    background_sync: bool,
}

impl MailingListClient {
    fn new(
        base_url: &str,
        timeout: Duration,
        api_key: SecretString,
        primary_list: String,
        secondary_list: Option<String>,
        background_sync: bool,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build mailing list client.");
        let base_url =
            reqwest::Url::parse(base_url).expect("failed to parse mailing list base url.");

        Self {
            client,
            base_url,
            api_key,
            primary_list,
            secondary_list,
            background_sync,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        let list_config = &config.mailing_list;
        let timeout = Duration::from_millis(list_config.timeout_milliseconds);

        Self::new(
            &list_config.base_url,
            timeout,
            list_config.api_key.clone(),
            list_config.primary_list.clone(),
            list_config.secondary_list.clone(),
            list_config.background_sync,
        )
    }

    pub fn primary_list(&self) -> &str {
        &self.primary_list
    }

    pub fn secondary_list(&self) -> Option<&str> {
        self.secondary_list.as_deref()
    }

    pub fn background_sync(&self) -> bool {
        self.background_sync
    }

    /// 按邮箱地址upsert列表成员
    /// 服务商返回`Member Exists`视为同步成功
    #[tracing::instrument(name = "upserting mailing list member", skip(self, member))]
    pub async fn upsert_member(
        &self,
        list_id: &str,
        member: &ListMember<'_>,
    ) -> Result<(), ApiError> {
        let url = self
            .base_url
            .join(&format!("/3.0/lists/{list_id}/members"))
            .unwrap();
        let response = self
            .client
            .post(url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()))
            .json(member)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if member_already_exists(&body) {
            tracing::info!("member already on list {list_id}, treated as success.");
            return Ok(());
        }

        Err(ApiError::Provider { status, body })
    }
}

fn member_already_exists(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .map(|value| value["title"] == "Member Exists")
        .unwrap_or(false)
}

#[derive(serde::Serialize)]
pub struct ListMember<'a> {
    email_address: &'a str,
    status: &'a str,
    merge_fields: MergeFields<'a>,
    tags: [&'a str; 1],
}

#[derive(serde::Serialize)]
struct MergeFields<'a> {
    #[serde(rename = "FNAME")]
    first_name: &'a str,
    #[serde(rename = "LNAME")]
    last_name: &'a str,
    #[serde(rename = "COMPANY")]
    company: &'a str,
    #[serde(rename = "JOBTITLE")]
    job_title: &'a str,
    #[serde(rename = "CITY")]
    city: &'a str,
    #[serde(rename = "PHONE")]
    phone: &'a str,
    #[serde(rename = "STATE")]
    state: &'a str,
    #[serde(rename = "ZIP")]
    zip_code: &'a str,
    #[serde(rename = "REGION")]
    region: &'a str,
}

impl<'a> ListMember<'a> {
    pub fn from_registration(registration: &'a Registration) -> Self {
        Self {
            email_address: registration.email.as_ref(),
            // 列表侧按邮箱upsert，重复注册不会产生新成员
            status: "subscribed",
            merge_fields: MergeFields {
                first_name: &registration.first_name,
                last_name: &registration.last_name,
                company: &registration.company,
                job_title: &registration.job_title,
                city: &registration.city,
                phone: &registration.phone,
                state: &registration.state,
                zip_code: &registration.zip_code,
                region: registration.region.as_ref(),
            },
            tags: ["event-registration-lead"],
        }
    }
}
