//! Pull the last week of sleep records for a user.
//!
//! Usage:
//!   TERRA_DEV_ID=... TERRA_API_KEY=... cargo run --example pull_sleep -- <user_id>

use terra_client::TerraClient;
use terra_client::config::Config;
use terra_client::http_client::ReqwestTerraClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user_id = std::env::args()
        .nth(1)
        .ok_or("usage: pull_sleep <user_id>")?;

    let cfg = Config::from_env()?;
    let client = ReqwestTerraClient::new(&cfg.base_url, cfg.dev_id, cfg.api_key);

    let sleep = client.get_sleep(&user_id, Some(7)).await?;
    println!("{}", serde_json::to_string_pretty(&sleep)?);
    Ok(())
}
