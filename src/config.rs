use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub webinar: WebinarConfig,
    pub mailing_list: MailingListConfig,
    /// 预留的CRM凭证，平台注入但当前未使用
    pub crm_api_token: Option<SecretString>,
}

#[derive(serde::Deserialize)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 网络研讨会服务商的凭证与端点
#[derive(serde::Deserialize)]
pub struct WebinarConfig {
    pub base_url: String,
    pub oauth_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub account_id: String,
    pub timeout_milliseconds: u64,
}

/// 邮件列表服务商的凭证与目标列表
#[derive(serde::Deserialize)]
pub struct MailingListConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub primary_list: String,
    pub secondary_list: Option<String>,
    /// `true`时注册成功后立即响应，列表同步转入后台任务
    pub background_sync: bool,
    pub timeout_milliseconds: u64,
}

/// 配置解析统一入口：config.yaml为基础，环境变量覆盖
/// 托管平台通过`APP_`前缀的环境变量注入密钥，调用方无需感知来源
/// `APP_WEBINAR__CLIENT_SECRET` -> `Config.webinar.client_secret`
pub fn config() -> Config {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .expect("failed to read config.yaml.")
        .try_deserialize::<Config>()
        .expect("failed to deserialize config.")
}
