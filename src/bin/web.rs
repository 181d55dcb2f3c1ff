use eventlink::server::config::WebServerConfig;
use eventlink::server::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WebServerConfig::from_env();
    std::env::set_var("RUST_LOG", &config.log_level);
    env_logger::init();

    web::serve(&config).await
}
