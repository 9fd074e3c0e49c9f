use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    docbot_cli::main_entry().await
}
