use std::net::TcpListener;

use actix_web::web;
use once_cell::sync::Lazy;
use webireg::{
    clients::{MailingListClient, WebinarClient},
    config::Config,
    telemetry,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

static TRACING: Lazy<()> = Lazy::new(|| telemetry::init_subscriber("test"));

// config.yaml中配置的两个列表
pub const PRIMARY_LIST_PATH: &str = "/3.0/lists/a1b2c3d4e5/members";
pub const SECONDARY_LIST_PATH: &str = "/3.0/lists/f6g7h8i9j0/members";

pub struct TestApp {
    pub address: String,
    pub webinar_server: MockServer,
    pub list_server: MockServer,
}

impl TestApp {
    pub async fn post_register(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    Lazy::force(&TRACING);

    let mut config = webireg::config::config();
    // 模拟两个下游服务商
    let webinar_server = MockServer::start().await;
    let list_server = MockServer::start().await;
    config.webinar.base_url = webinar_server.uri();
    config.webinar.oauth_url = webinar_server.uri();
    config.mailing_list.base_url = list_server.uri();
    customize(&mut config);

    let listener =
        TcpListener::bind(format!("{}:0", &config.web.host)).expect("failed to bind web port.");
    // 获取绑定的随机端口
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://{}:{}", &config.web.host, port);

    let webinar_client = web::Data::new(WebinarClient::from_config(&config));
    let list_client = web::Data::new(MailingListClient::from_config(&config));

    tokio::spawn(webireg::run(listener, webinar_client, list_client));

    TestApp {
        address,
        webinar_server,
        list_server,
    }
}

pub fn valid_registration() -> serde_json::Value {
    serde_json::json!({
        "firstName": "A",
        "lastName": "B",
        "email": "a@b.com",
        "company": "C",
        "jobTitle": "D",
        "eventId": "123",
        "city": "Berlin",
        "state": "BE",
        "region": "Germany",
        "zipCode": "10115",
        "phone": "+49 30 1234",
    })
}

pub async fn mock_token_success(app: &TestApp) {
    Mock::given(path("/oauth/token"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "opaque-token"})),
        )
        .mount(&app.webinar_server)
        .await;
}

pub async fn mock_registrant_success(app: &TestApp, join_url: &str) {
    Mock::given(path("/v2/webinars/123/registrants"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"join_url": join_url})),
        )
        .mount(&app.webinar_server)
        .await;
}

pub async fn mock_lists_success(app: &TestApp) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.list_server)
        .await;
}
