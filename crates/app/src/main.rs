mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "comanda={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;

    // A broken history file must stop the start, with the offending
    // line in the log.
    let dataset = match engine::Dataset::from_csv_path(&server.orders_csv) {
        Ok(dataset) => dataset,
        Err(err) => {
            tracing::error!("failed to load order history {}: {err}", server.orders_csv);
            std::process::exit(1);
        }
    };
    tracing::info!("Loaded {} orders from {}", dataset.len(), server.orders_csv);

    let credentials = match engine::CredentialTable::load(&server.credentials) {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::error!("failed to load credentials {}: {err}", server.credentials);
            std::process::exit(1);
        }
    };
    if credentials.is_empty() {
        tracing::warn!(
            "{} has no users, every login will fail; add one with comanda_admin",
            server.credentials
        );
    }

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            std::process::exit(1);
        }
    };

    server::run_with_listener(dataset, credentials, listener).await?;

    Ok(())
}
