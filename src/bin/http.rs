#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use tracing_subscriber::EnvFilter;
    use trip_planner::{
        PlannerConfig, TripSession, http_api, load_catalog_from_json, load_directory_from_json,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::from_env();
    let addr: SocketAddr = config.http_addr.parse()?;

    let catalog = load_catalog_from_json(config.activities_path())?;
    let directory = load_directory_from_json(config.directory_path())?;
    let resolver = config.build_resolver()?;

    println!("trip-planner HTTP API listening on http://{addr}");
    let state = http_api::AppState::new(TripSession::new(catalog), resolver, directory);
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
