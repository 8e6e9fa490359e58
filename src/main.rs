use clap::Parser;
use lcsqa_processor::cli::{run, Cli};
use lcsqa_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
