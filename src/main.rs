use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use pickem_engine::api::{build_router, state::AppState};
use pickem_engine::config::AppConfig;
use pickem_engine::engine::{self, LeaderboardEngine, LeaderboardReport, PoolSource, SharedSource};
use pickem_engine::models::{GameResult, LeaderboardScope, Pick, PickStatus};
use pickem_engine::storage::{list_seasons, JsonlPoolStore, StorageConfig};

#[derive(Parser)]
#[command(name = "pickem-engine")]
#[command(about = "Scoring and leaderboards for a pick'em pool played against the spread")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a leaderboard
    Leaderboard {
        #[arg(long)]
        season: u32,

        /// weekly, season or best-finish
        #[arg(long, default_value = "season")]
        view: LeaderboardScope,

        /// Week number (weekly view only)
        #[arg(long)]
        week: Option<u32>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade a single pick against a final score
    Score {
        #[arg(long, default_value = "Home")]
        home: String,

        #[arg(long, default_value = "Away")]
        away: String,

        /// Spread relative to the home team (negative = home favored)
        #[arg(long, allow_hyphen_values = true)]
        spread: f64,

        #[arg(long)]
        home_score: Option<u32>,

        #[arg(long)]
        away_score: Option<u32>,

        /// Side picked to cover
        #[arg(long, value_enum)]
        pick: PickSide,

        #[arg(long)]
        lock: bool,
    },

    /// Validate config and report data-integrity warnings
    Check {
        /// Only check this season (default: every configured season)
        #[arg(long)]
        season: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PickSide {
    Home,
    Away,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn build_engine(config: &AppConfig) -> LeaderboardEngine<SharedSource> {
    let store = JsonlPoolStore::new(StorageConfig::new(config.data_dir.clone()));
    let source: SharedSource = Arc::new(store);
    LeaderboardEngine::new(source, config.seasons.clone())
}

fn print_report(report: &LeaderboardReport) {
    match report.week {
        Some(week) => println!("{} leaderboard, season {} week {}", report.scope, report.season, week),
        None => println!("{} leaderboard, season {}", report.scope, report.season),
    }
    println!(
        "{:>4}  {:<20} {:>6}  {:<10} {:<8} {:>5}",
        "rank", "user", "points", "record", "locks", "picks"
    );
    for entry in &report.entries {
        println!(
            "{:>4}  {:<20} {:>6}  {:<10} {:<8} {:>5}",
            entry.rank,
            entry.user_id.as_str(),
            entry.total_points,
            entry.record,
            entry.lock_record,
            entry.total_picks
        );
        if let Some(detail) = &entry.best_finish {
            println!(
                "      weeks {:?}, worst week {}",
                detail.included_weeks, detail.worst_week_score
            );
        }
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting pickem-engine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(build_engine(&config), config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(
                "Serving {} season(s) from {} on http://{}",
                config.seasons.len(),
                config.data_dir.display(),
                addr
            );
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard {
            season,
            view,
            week,
            json,
        } => {
            let engine = build_engine(&config);
            let report = match (view, week) {
                (LeaderboardScope::Weekly, Some(week)) => engine.weekly_leaderboard(season, week)?,
                (LeaderboardScope::Weekly, None) => bail!("--week is required for the weekly view"),
                (LeaderboardScope::Season, _) => engine.season_leaderboard(season)?,
                (LeaderboardScope::BestFinish, _) => engine.best_finish_leaderboard(season)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Score {
            home,
            away,
            spread,
            home_score,
            away_score,
            pick,
            lock,
        } => {
            let mut game = GameResult::new("cli".into(), 0, 1, home.clone(), away.clone(), spread);
            if let (Some(h), Some(a)) = (home_score, away_score) {
                game = game.with_final_score(h, a);
            }
            let team = match pick {
                PickSide::Home => home,
                PickSide::Away => away,
            };
            let mut pick = Pick::new("cli".into(), 0, 1, "cli".into(), team);
            if lock {
                pick = pick.with_lock();
            }

            let scored = engine::score_pick(&pick, &game)?;
            match (scored.status, scored.result) {
                (PickStatus::Scored, Some(result)) => {
                    println!("{} {}: {} points", pick.selected_team, result, scored.points)
                }
                _ => println!("{}: pending (game not final)", pick.selected_team),
            }
        }
        Commands::Check { season } => {
            config.validate()?;
            println!("Config OK: {} season(s) configured", config.seasons.len());

            let years: Vec<u32> = match season {
                Some(year) => vec![year],
                None => config.seasons.iter().map(|s| s.year).collect(),
            };

            let storage = StorageConfig::new(config.data_dir.clone());
            for year in list_seasons(&storage)? {
                if config.season(year).is_none() {
                    println!("warning: season {} has data but is not configured", year);
                }
            }

            let engine = build_engine(&config);
            let mut total_warnings = 0;
            for year in years {
                let weeks = engine.season_config(year)?.weeks;

                let mut unfinished = 0;
                for week in 1..=weeks {
                    unfinished += engine
                        .source()
                        .games(year, week)?
                        .iter()
                        .filter(|g| !g.is_scorable())
                        .count();
                }

                let report = engine.season_leaderboard(year)?;
                for warning in &report.warnings {
                    println!("warning: {}", warning);
                }
                println!(
                    "Season {}: {} ranked users, {} unfinished games, {} warnings",
                    year,
                    report.entries.len(),
                    unfinished,
                    report.warning_count()
                );
                total_warnings += report.warning_count();
            }

            if total_warnings > 0 {
                tracing::warn!("{} data-integrity warnings found", total_warnings);
            }
        }
    }

    Ok(())
}
