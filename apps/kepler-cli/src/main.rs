mod positions;

use anyhow::Context;
use clap::Parser;
use kepler::{ConsultRequest, Consultation, EngineError, GeoLocation, KnownPlaceResolver, NatalEngine};
use kepler_config::KeplerSettings;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal vector and aspect analysis")]
pub(crate) struct Args {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Birth time, HH:MM (24-hour, taken as UT). Defaults to 12:00.
    #[arg(long)]
    time: Option<String>,

    /// Free-text birth place; only carried into the output record.
    #[arg(long, default_value = "")]
    place: String,

    /// Recorded longitude table (JSON object of body name to degrees)
    /// used instead of the ephemeris backend.
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Settings file (default: configs/kepler.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON record.
    #[arg(long)]
    pretty: bool,
}

/// 0 on success, 2 for malformed input, 1 for everything else
fn exit_code_for(outcome: &Result<kepler::NatalReport, EngineError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(err) if err.is_input_error() => 2,
        Err(_) => 1,
    }
}

fn build_resolver(settings: &KeplerSettings) -> KnownPlaceResolver {
    settings
        .places
        .iter()
        .fold(KnownPlaceResolver::new(), |resolver, place| {
            resolver.with_place(
                &place.name,
                GeoLocation {
                    lat: place.lat,
                    lon: place.lon,
                },
            )
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = kepler_config::load_settings(args.config.as_deref())?;
    match &settings.source {
        Some(path) => log::info!("Loaded settings from {}", path.display()),
        None => log::debug!("No settings file found, using defaults"),
    }

    let provider = positions::select_provider(args.positions.as_deref(), &settings)?;
    let engine = Arc::new(NatalEngine::new(provider));
    let resolver = build_resolver(&settings);

    let request = ConsultRequest {
        date: args.date.trim().to_string(),
        time: args.time.clone(),
        place: args.place.clone(),
    };
    log::debug!("Consulting {:?}", request);

    let consultation =
        Consultation::run_with_timeout(engine, &resolver, &request, settings.provider_timeout).await;

    if consultation.place.fallback && !request.place.trim().is_empty() {
        log::warn!("Place {:?} not recognized, using neutral coordinates", request.place);
    }
    match &consultation.outcome {
        Ok(report) => log::info!("{} aspect hit(s)", report.aspect_hits.len()),
        Err(err) => log::error!("Consultation failed: {}", err),
    }

    let record = consultation.to_record();
    let text = if args.pretty {
        serde_json::to_string_pretty(&record)
    } else {
        serde_json::to_string(&record)
    }
    .context("Failed to serialize record")?;
    println!("{}", text);

    Ok(ExitCode::from(exit_code_for(&consultation.outcome)))
}
