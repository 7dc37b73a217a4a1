#[tokio::main]
async fn main() -> std::io::Result<()> {
    mesh_server::run_with_config().await
}
