use std::sync::Arc;

use eventlink::client::config::ClientConfig;
use eventlink::client::gui::app::{AppFlags, EventLinkApp};
use eventlink::client::services::api_client::ApiClient;
use eventlink::client::services::session::Session;
use eventlink::client::utils::credential_store::TokenAccessor;
use iced::Application;
use log::info;

fn main() -> iced::Result {
    let config = ClientConfig::from_env();
    std::env::set_var("RUST_LOG", &config.log_level);
    env_logger::init();

    info!("[APP] Backend {} ({:?})", config.api_base, config.build_env);
    let tokens = TokenAccessor::new(config.open_store());
    let session = Arc::new(Session::new(ApiClient::new(config.api_base.clone(), tokens)));

    EventLinkApp::run(iced::Settings::with_flags(AppFlags { config, session }))
}
