use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use webireg::{
    clients::{MailingListClient, WebinarClient},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 遥测初始化
    telemetry::init_subscriber("webireg");

    let config = webireg::config::config();
    let listener = TcpListener::bind(config.web.server_address()).context("failed to bind web port.")?;

    // 构造web Arc
    let webinar_client = web::Data::new(WebinarClient::from_config(&config));
    let list_client = web::Data::new(MailingListClient::from_config(&config));

    webireg::run(listener, webinar_client, list_client).await?;

    Ok(())
}
