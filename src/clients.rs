mod mailing_list;
mod webinar;

pub use mailing_list::{ListMember, MailingListClient};
pub use webinar::{AccessToken, WebinarClient};

use crate::util::error_chain_fmt;

/// 下游服务商调用失败
/// 保留原始响应体，供错误响应提取服务商的`message`
#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("failed to reach the provider.")]
    Transport(#[from] reqwest::Error),
    #[error("provider responded with {status}.")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl ApiError {
    /// best-effort提取响应体JSON中的`message`字段，失败则原样返回响应体
    pub fn provider_message(&self) -> String {
        match self {
            ApiError::Transport(e) => e.to_string(),
            ApiError::Provider { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(|message| message.as_str())
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| body.clone()),
        }
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
