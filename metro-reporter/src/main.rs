use metro_reporter::cache::{CacheConfig, CachedProvider};
use metro_reporter::controller::{ControllerConfig, SuggestionController};
use metro_reporter::domain::Coordinate;
use metro_reporter::geolocation::{
    FixedLocation, Geolocator, GeolocatorConfig, LocationSource, NoLocation,
};
use metro_reporter::report::{ReportClient, ReportClientConfig};
use metro_reporter::suggest::{
    StaticProvider, SuggestClient, SuggestClientConfig, SuggestionProvider,
};
use metro_reporter::terminal::Wizard;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_reporter=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Offline station list, or the live provider
    let provider: Box<dyn SuggestionProvider> = match std::env::var("METRO_STATIONS_FILE") {
        Ok(path) => {
            let stations = StaticProvider::from_file(&path)
                .await
                .expect("Failed to load stations file");
            info!(path = %path, stations = stations.len(), "using offline station list");
            Box::new(stations)
        }
        Err(_) => {
            let token = std::env::var("METRO_SUGGEST_TOKEN").unwrap_or_else(|_| {
                warn!("METRO_SUGGEST_TOKEN not set. Station lookups will fail.");
                String::new()
            });
            let mut config = SuggestClientConfig::new(&token);
            if let Ok(url) = std::env::var("METRO_SUGGEST_URL") {
                config = config.with_url(url);
            }
            Box::new(SuggestClient::new(config).expect("Failed to create suggestion client"))
        }
    };
    let provider = CachedProvider::new(provider, &CacheConfig::default());

    let mut report_config = ReportClientConfig::new();
    if let Ok(url) = std::env::var("METRO_REPORT_URL") {
        report_config = report_config.with_url(url);
    }
    let reports = ReportClient::new(report_config).expect("Failed to create reports client");

    let controller = SuggestionController::new(provider, ControllerConfig::default());
    let mut wizard = Wizard::new(controller, reports);

    // Fixed position from the environment stands in for a device fix
    let fixed = Coordinate::from_parts(env_f64("METRO_LAT"), env_f64("METRO_LON"));
    let source: Box<dyn LocationSource> = match fixed {
        Some(coordinate) => Box::new(FixedLocation(coordinate)),
        None => Box::new(NoLocation),
    };
    let geolocator = Geolocator::new(source, GeolocatorConfig::default());
    let (reference, status) = geolocator.locate().await;
    wizard.set_geo_status(status);
    wizard.controller_mut().set_reference(reference);

    if let Err(e) = wizard.run().await {
        eprintln!("Input error: {e}");
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse().ok()
}
