#[tokio::main]
async fn main() -> std::io::Result<()> {
    answerbridge::run().await
}
