use anyhow::Context;
use clap::Parser;
use scenesync::{resolve_scene, ArtifactSpec, DownloadConfig, Provider};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "scenesync")]
#[command(about = "Download Landsat scenes from Amazon or Google storage", long_about = None)]
#[command(version)]
struct Args {
    /// Scene identifier (e.g., LC80030172015001LGN00)
    scene: String,

    /// Bands to download (comma-separated, e.g., "4,5,BQA")
    #[arg(short, long, value_delimiter = ',')]
    bands: Vec<ArtifactSpec>,

    /// Download bands 1-11 and the quality band
    #[arg(long, conflicts_with = "bands")]
    all: bool,

    /// Also download the MTL metadata file
    #[arg(long)]
    metadata: bool,

    /// Parent directory for the scene folder (default: ~/landsat)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Providers to try, in order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    provider: Vec<Provider>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout (e.g., "30s", "2m")
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Print the downloaded files as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("scenesync={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => DownloadConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DownloadConfig::default(),
    };
    if !args.provider.is_empty() {
        config.priority = args.provider.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout = Some(timeout);
    }
    config.show_progress = config.show_progress && atty::is(atty::Stream::Stderr);

    let artifacts = if args.all {
        ArtifactSpec::all_bands()
    } else {
        args.bands.clone()
    };

    info!("🛰️  SceneSync - Landsat scene downloader");
    info!("Scene: {}", args.scene);
    info!("Providers: {:?}", config.priority);

    let session = resolve_scene(&args.scene, &config)
        .await
        .with_context(|| format!("resolving {}", args.scene))?;

    let results = session
        .download(&artifacts, args.output.as_deref(), args.metadata)
        .await
        .with_context(|| format!("downloading {} from {}", args.scene, session.provider()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    info!(
        "✅ {} file(s) of {} ready",
        results.len(),
        session.scene()
    );
    Ok(())
}
