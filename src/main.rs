//! Main entry point for the Ticket Wheel draft runner
//!
//! Loads a round's exported results, weights every finisher with lottery
//! tickets and spins the wheel until the full draft order is known.

use anyhow::{anyhow, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use ticket_wheel::config::{validate_config, AppConfig, SpinConfig};
use ticket_wheel::draft::{DraftController, DraftSession, RenderSink, TracingRenderSink};
use ticket_wheel::rating::{RatingNormalizer, TicketWeigher};
use ticket_wheel::source::{load_draft_inputs, DraftInputs, MetrixExportSource};
use tracing::{error, info, warn};

/// Ticket Wheel - rating-weighted draft order from a round of scores
#[derive(Parser)]
#[command(
    name = "ticket-wheel",
    version,
    about = "Draw a draft order from a weighted wheel",
    long_about = "Ticket Wheel reads a round's results, derives a rating for each finisher \
                 from the course's rating anchors, converts the improvement over their prior \
                 rating into lottery tickets and spins a wheel until everyone has been drafted."
)]
struct Args {
    /// Competition results export
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the competition results JSON export"
    )]
    results: PathBuf,

    /// Course export with rating anchors
    #[arg(long, value_name = "FILE", help = "Path to the course JSON export")]
    course: Option<PathBuf>,

    /// Rating list export
    #[arg(long, value_name = "FILE", help = "Path to the rating list JSON export")]
    ratings: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Seed for reproducible draws
    #[arg(long, value_name = "SEED", help = "Seed the random source for a reproducible draft")]
    seed: Option<u64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Skip the animation
    #[arg(long, help = "Land every spin immediately without a reveal pause")]
    instant: bool,

    /// Participants to leave off the wheel
    #[arg(long, value_name = "NAME", help = "Exclude a participant by name (repeatable)")]
    exclude: Vec<String>,

    /// Manual prior rating corrections
    #[arg(
        long,
        value_name = "NAME=VALUE",
        value_parser = parse_rating_override,
        help = "Set a participant's prior rating (repeatable)"
    )]
    rating: Vec<(String, f64)>,

    /// Dry run mode (print tickets and exit)
    #[arg(long, help = "Load and weigh participants, print tickets and exit without spinning")]
    dry_run: bool,
}

fn parse_rating_override(value: &str) -> Result<(String, f64), String> {
    let (name, rating) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", value))?;
    let rating = rating
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid rating '{}'", rating))?;
    Ok((name.trim().to_string(), rating))
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if args.instant {
        config.spin = SpinConfig {
            base_turns: config.spin.base_turns,
            ..SpinConfig::instant()
        };
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with draft settings
fn display_startup_banner(config: &AppConfig, args: &Args) {
    info!("🎡 Ticket Wheel v{}", ticket_wheel::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Results: {}", args.results.display());
    info!(
        "   Tickets: baseline {}, range {}..={}, saturation {}",
        config.tickets.baseline,
        config.tickets.floor,
        config.tickets.ceiling,
        config.tickets.saturation
    );
    info!(
        "   Spin: {} turns over {}ms",
        config.spin.base_turns, config.spin.duration_ms
    );
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Apply rating corrections and exclusions before the first spin.
/// Names that match nobody are reported and skipped.
fn apply_overrides(
    session: &mut DraftSession,
    excluded: &[String],
    ratings: &[(String, f64)],
) -> Result<()> {
    for (name, rating) in ratings {
        let Some(id) = session.find_by_name(name).map(|p| p.id.clone()) else {
            warn!("No participant named '{}' to rate", name);
            continue;
        };
        session.set_baseline_rating(&id, Some(*rating))?;
    }

    for name in excluded {
        let Some(id) = session.find_by_name(name).map(|p| p.id.clone()) else {
            warn!("No participant named '{}' to exclude", name);
            continue;
        };
        session.set_active(&id, false)?;
    }

    Ok(())
}

/// Build a weighted session from loaded inputs, then apply CLI overrides
fn prepare_session<R: Rng + ?Sized>(
    inputs: DraftInputs,
    config: &AppConfig,
    args: &Args,
    rng: &mut R,
) -> Result<DraftSession> {
    let mut session = DraftSession::new(
        inputs.participants,
        RatingNormalizer::new(inputs.anchors),
        TicketWeigher::new(config.tickets.clone())?,
        config.spin.clone(),
    )?;
    session.assign_hues(rng)?;
    apply_overrides(&mut session, &args.exclude, &args.rating)?;
    Ok(session)
}

fn ticket_table(session: &DraftSession) -> Vec<String> {
    let anchors = match session.normalizer().anchors() {
        Some(a) if session.normalizer().has_valid_anchors() => format!(
            "{} at {}, {} at {}",
            a.rating_low, a.result_low, a.rating_high, a.result_high
        ),
        _ => "none (using prior ratings)".to_string(),
    };

    let mut lines = vec![
        format!("Rating anchors: {}", anchors),
        format!("Participants ({} on the wheel):", session.eligible_count()),
    ];
    for participant in session.pool() {
        let rating = participant
            .derived_rating
            .map(|r| format!("{:.0}", r))
            .unwrap_or_else(|| "-".to_string());
        let tickets = participant
            .weight
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if participant.active { "" } else { " (excluded)" };
        lines.push(format!(
            "  {} - score {}, rating {}, tickets {}{}",
            participant.name, participant.raw_score, rating, tickets, marker
        ));
    }
    lines
}

fn draft_report(session: &DraftSession) -> Vec<String> {
    let mut lines = vec!["Draft order:".to_string()];
    lines.extend(session.winners().iter().map(|pick| {
        format!(
            "{}. {} (Tickets: {})",
            pick.pick_number, pick.participant.name, pick.tickets
        )
    }));

    let unplaced: Vec<&str> = session
        .unplaced()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    if !unplaced.is_empty() {
        lines.push(format!("Not drafted: {}", unplaced.join(", ")));
    }
    lines
}

/// Spin the wheel until nobody is left on it
async fn run_draft<R: Rng + Send>(
    session: DraftSession,
    sink: Arc<dyn RenderSink>,
    rng: R,
) -> Result<DraftSession> {
    let mut controller = DraftController::new(session, sink, rng);
    controller.run_to_completion().await?;

    let stats = controller.stats();
    info!(
        "✅ Draft finished: {} spins, {} frames, {} sink failures",
        stats.spins_completed, stats.frames_rendered, stats.sink_failures
    );
    Ok(controller.into_session())
}

async fn run(args: Args, config: AppConfig) -> Result<()> {
    let mut source = MetrixExportSource::new(&args.results);
    if let Some(course) = &args.course {
        source = source.with_course(course);
    }
    if let Some(ratings) = &args.ratings {
        source = source.with_ratings(ratings);
    }

    let inputs = load_draft_inputs(&source).await?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = prepare_session(inputs, &config, &args, &mut rng)?;

    if args.dry_run {
        ticket_table(&session).iter().for_each(|line| println!("{}", line));
        info!("Dry run completed - exiting without spinning");
        return Ok(());
    }

    let session = run_draft(session, Arc::new(TracingRenderSink), rng).await?;
    draft_report(&session).iter().for_each(|line| println!("{}", line));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config, &args);

    if let Err(e) = run(args, config).await {
        error!("Draft failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
