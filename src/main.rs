use server::{create_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "payrest=debug");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();
    create_server(config).await.map_err(|err| {
        tracing::error!(error = %err, "server stopped");
        err
    })?;
    Ok(())
}
