/*
 * Responsibility
 * - start the tokio runtime
 * - hand over to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    orders_service::app::run().await
}
