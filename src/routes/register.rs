use std::fmt::Debug;

use actix_web::{body::BoxBody, http::StatusCode, web, HttpResponse, Responder, ResponseError};
use tracing::Instrument;

use crate::{
    clients::{ApiError, ListMember, MailingListClient, WebinarClient},
    domain::{Registration, ValidationError},
    util::error_chain_fmt,
};

#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub event_id: String,
    pub city: String,
    pub state: String,
    pub region: String,
    pub zip_code: String,
    pub phone: String,
}

/// 注册主流程：校验 -> 取令牌 -> 创建注册人 -> 同步邮件列表
#[tracing::instrument(
    name = "registering for webinar",
    skip_all,
    fields(event_id = %form.event_id, registrant_email = %form.email)
)]
pub async fn register(
    form: web::Json<RegistrationForm>,
    webinar_client: web::Data<WebinarClient>,
    list_client: web::Data<MailingListClient>,
) -> Result<HttpResponse, RegisterError> {
    let registration: Registration = form.0.try_into()?;

    let token = webinar_client
        .fetch_access_token()
        .await
        .map_err(RegisterError::Token)?;
    let join_url = webinar_client
        .create_registrant(&token, &registration)
        .await
        .map_err(RegisterError::Registrant)?;
    tracing::info!("注册人创建成功.");

    if list_client.background_sync() {
        // 先响应调用方；进程退出时未完成的同步会丢失
        spawn_background_sync(list_client.clone(), registration);
    } else {
        sync_mailing_lists(&list_client, &registration).await?;
        tracing::info!("邮件列表同步成功.");
    }

    Ok(HttpResponse::Ok().json(SuccessBody {
        message: "Registration successful",
        join_url: &join_url,
    }))
}

/// CORS预检
pub async fn register_preflight() -> impl Responder {
    HttpResponse::NoContent()
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .finish()
}

/// 两个列表并发同步，各自独立判定结果
/// 报错优先级与请求发起顺序一致：主列表先于次列表
async fn sync_mailing_lists(
    list_client: &MailingListClient,
    registration: &Registration,
) -> Result<(), RegisterError> {
    let member = ListMember::from_registration(registration);
    let primary = list_client.upsert_member(list_client.primary_list(), &member);
    let secondary = async {
        match list_client.secondary_list() {
            Some(list_id) => Some(list_client.upsert_member(list_id, &member).await),
            None => None,
        }
    };

    let (primary, secondary) = tokio::join!(primary, secondary);
    primary.map_err(|source| RegisterError::ListSync {
        list: ListTag::Primary,
        source,
    })?;
    if let Some(result) = secondary {
        result.map_err(|source| RegisterError::ListSync {
            list: ListTag::Secondary,
            source,
        })?;
    }

    Ok(())
}

/// 响应提交后的后台同步，结果仅记录日志
fn spawn_background_sync(list_client: web::Data<MailingListClient>, registration: Registration) {
    tokio::spawn(
        async move {
            match sync_mailing_lists(&list_client, &registration).await {
                Ok(()) => tracing::info!("后台列表同步成功."),
                Err(e) => tracing::error!("后台列表同步失败. {e:?}"),
            }
        }
        .instrument(tracing::info_span!("background mailing list sync")),
    );
}

/// 同步失败的列表，写入`errorAt`
#[derive(Debug, Clone, Copy)]
pub enum ListTag {
    Primary,
    Secondary,
}

impl ListTag {
    fn as_str(&self) -> &'static str {
        match self {
            ListTag::Primary => "primaryList",
            ListTag::Secondary => "secondaryList",
        }
    }
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("Request Error")]
    Validation(#[from] ValidationError),
    #[error("Internal Server Error")]
    Token(#[source] ApiError),
    #[error("Internal Server Error")]
    Registrant(#[source] ApiError),
    #[error("Internal Server Error")]
    ListSync {
        list: ListTag,
        #[source]
        source: ApiError,
    },
}

impl RegisterError {
    fn stage(&self) -> &'static str {
        match self {
            RegisterError::Validation(_) => "requestBody",
            RegisterError::Token(_) => "webinarAuth",
            RegisterError::Registrant(_) => "webinar",
            RegisterError::ListSync { list, .. } => list.as_str(),
        }
    }

    fn info(&self) -> String {
        match self {
            RegisterError::Validation(e) => e.to_string(),
            RegisterError::Token(e) | RegisterError::Registrant(e) => e.provider_message(),
            RegisterError::ListSync { source, .. } => source.provider_message(),
        }
    }
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RegisterError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 历史行为：字段缺失返回500，仅邮箱格式错误返回400
            RegisterError::Validation(ValidationError::InvalidEmail) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: &self.to_string(),
            info: self.info(),
            error_at: self.stage(),
        })
    }
}

#[derive(serde::Serialize)]
struct SuccessBody<'a> {
    message: &'a str,
    join_url: &'a str,
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    info: String,
    #[serde(rename = "errorAt")]
    error_at: &'a str,
}
