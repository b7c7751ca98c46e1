use departure_fetcher::config::AppConfig;
use departure_fetcher::fetcher::DepartureFetcher;
use departure_fetcher::hafas::{HafasClient, HafasConfig, MockHafasClient};
use departure_fetcher::provider::TransitProvider;
use departure_fetcher::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Config file used when `DEPARTURES_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "departures.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("departure_fetcher=info,tower_http=info")),
        )
        .init();

    let config_path =
        std::env::var("DEPARTURES_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path).expect("Failed to load config");
    info!(path = %config_path, stations = config.stations.len(), "loaded config");

    // Serve canned data instead of the live API when a mock directory is given
    match std::env::var("HAFAS_MOCK_DIR") {
        Ok(dir) => {
            let client = MockHafasClient::new(&dir).expect("Failed to load mock data");
            info!(dir = %dir, stops = client.available_stations().len(), "using mock HAFAS data");
            serve(config, client).await;
        }
        Err(_) => {
            let hafas_config = HafasConfig::from(&config.hafas);
            info!(base_url = %hafas_config.base_url, "using HAFAS API");
            let client = HafasClient::new(hafas_config).expect("Failed to create HAFAS client");
            serve(config, client).await;
        }
    }
}

async fn serve<P: TransitProvider + Clone + 'static>(config: AppConfig, provider: P) {
    let fetchers: Vec<_> = config
        .stations
        .into_iter()
        .map(|station| DepartureFetcher::new(station, provider.clone()))
        .collect();

    for fetcher in &fetchers {
        match fetcher.station_name().await {
            Ok(name) => info!(station = %fetcher.station_id(), %name, "configured board"),
            Err(e) => {
                warn!(station = %fetcher.station_id(), error = %e, "station name lookup failed")
            }
        }
    }

    let app = create_router(AppState::new(fetchers));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.listen, "departure boards listening");

    axum::serve(listener, app).await.expect("Server error");
}
