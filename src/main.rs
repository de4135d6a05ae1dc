//! Console client binary entry point

use clap::Parser;

use ndvi_webgis::services::{
    ConsoleCanvas, ConsolePanel, RealAnalysisClient, RealGeocoder, DEFAULT_GEOCODER_URL,
};
use ndvi_webgis::{console, logging, MapSession, SessionResult};

#[derive(Parser)]
#[command(name = "ndvi-webgis")]
#[command(about = "Console client for multi-period NDVI statistics and tile overlays")]
struct Args {
    /// Analysis service base URL
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Geocoding search endpoint
    #[arg(long, default_value = DEFAULT_GEOCODER_URL)]
    geocoder_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> SessionResult<()> {
    let args = Args::parse();
    logging::init_tracing(args.log_level.as_deref());

    println!("NDVI webgis console client");
    println!("Analysis service: {}", args.api_url);
    println!("Geocoder: {}", args.geocoder_url);
    println!();
    println!("{}", console::HELP_TEXT);

    let analysis = RealAnalysisClient::new(&args.api_url);
    let geocoder = RealGeocoder::new(&args.geocoder_url)?;
    let canvas = ConsoleCanvas::new();
    let panel = ConsolePanel::new();

    let session = MapSession::new(analysis, geocoder, canvas, panel);
    console::run(&session).await
}
