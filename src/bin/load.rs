use anyhow::Result;
use apodetl::{load, logging, Config, RpcClient};
use reqwest::Client;

/// Expects `transform` to have written the staged artifact already.
#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cfg = Config::from_env()?;

    let client = RpcClient::new(Client::new(), cfg.remote()?)?;
    load(&client, &cfg).await?;
    Ok(())
}
