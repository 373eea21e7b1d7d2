/// Command-line entry point: prints one astronomical report as JSON
use anyhow::{bail, Context};
use chrono::NaiveDate;
use sky_almanac::{
    AstronomyService, EngineConfig, GeoCoordinate, ObservationRequest, SystemClock,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "usage: sky_almanac <latitude> <longitude> [YYYY-MM-DD] [elevation_m]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = EngineConfig::from_env()?;
    info!(
        remote = config.remote.enabled,
        timezone = ?config.timezone,
        "Configuration loaded successfully"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 4 {
        bail!(USAGE);
    }

    let latitude: f64 = args[0].parse().context("latitude must be a number")?;
    let longitude: f64 = args[1].parse().context("longitude must be a number")?;
    let coordinate = GeoCoordinate::new(latitude, longitude)?;

    let elevation_m: f64 = match args.get(3) {
        Some(s) => s.parse().context("elevation must be a number")?,
        None => 0.0,
    };

    let request = match args.get(2) {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{}'", s))?;
            ObservationRequest::on_date(coordinate, date, elevation_m)?
        }
        None => ObservationRequest::now(coordinate, elevation_m, &SystemClock)?,
    };

    let service = AstronomyService::from_config(&config)?;
    let report = service.report(&request).await?;
    info!(source = ?report.sun.source, "Report computed");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
