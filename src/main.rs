#[tokio::main]
async fn main() {
    tatu_backend::run().await;
}
