use anyhow::Result;
use vidnest_api::setup;
use vidnest_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let (_state, router) = setup::initialize_app(config.clone()).await?;
    setup::server::start_server(&config, router).await
}
