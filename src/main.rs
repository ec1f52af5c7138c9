//! Binary entry point that wires environment bootstrap and launches the
//! interactive assistant loop.

use anyhow::Result;

use asistent::assistant;

#[tokio::main]
/// Bootstraps environment variables and logging, then runs the assistant
/// until the user issues an exit phrase.
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    assistant::run_assistant().await
}
