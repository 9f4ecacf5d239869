#[tokio::main]
async fn main() -> anyhow::Result<()> {
    radres_backend::run().await
}
