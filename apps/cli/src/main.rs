#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_quiz_cli::run().await
}
