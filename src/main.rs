use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard::calculate;
use scoreboard::config::AppConfig;
use scoreboard::models::{CurrentMatchRow, LogoRef, RankedTeam, Team};
use scoreboard::session::Session;
use scoreboard::storage::{StateStore, StorageConfig};

#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(about = "Esports match series scoreboard")]
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
    /// Manage tournaments
    Tournament {
        #[command(subcommand)]
        action: TournamentAction,
    },

    /// Manage matches of the active tournament
    Match {
        #[command(subcommand)]
        action: MatchAction,
    },

    /// Cumulative standings of the active tournament
    Standings {
        /// Standings through this match number (default: current match)
        #[arg(long = "match")]
        through: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Table for the current match
    Current {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Top teams after every match
    Summary {
        /// Print the tournament's teams and raw results as JSON instead
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TournamentAction {
    /// Create a tournament and select it
    Create {
        name: String,

        /// Team name, in slot order (repeat; default: configured number of unnamed teams)
        #[arg(long = "team")]
        teams: Vec<String>,
    },

    /// List tournaments
    List,

    /// Select a tournament by number
    Select { number: usize },

    /// Delete the active tournament
    Delete,

    /// Set or clear a team's logo handle
    Logo {
        /// Team number (slot order)
        team: usize,

        /// Logo handle; omit to clear
        key: Option<String>,
    },
}

#[derive(Subcommand)]
enum MatchAction {
    /// Add a match and select it
    Add { name: String },

    /// Add a series of matches ending with the Final
    Series { count: usize },

    /// Select a match by number
    Select { number: usize },

    /// Rename a match
    Rename { number: usize, name: String },

    /// Delete a match
    Delete { number: usize },

    /// Record a team's result in the current match
    Result {
        /// Team number (slot order)
        team: usize,

        #[arg(long, default_value = "0")]
        kills: u32,

        #[arg(long, default_value = "1")]
        position: i32,
    },
}

/// Convert a 1-based number from the command line to an index.
fn to_index(number: usize, what: &str) -> Result<usize> {
    match number.checked_sub(1) {
        Some(idx) => Ok(idx),
        None => bail!("{} numbers start at 1", what),
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Short marker shown next to a team name: `[*]` with a logo, else the name's initial.
fn badge(team: &Team) -> String {
    match (&team.logo, team.initial()) {
        (Some(_), _) => "[*]".to_string(),
        (None, Some(c)) => format!("[{}]", c.to_uppercase()),
        (None, None) => "[ ]".to_string(),
    }
}

fn print_standings(rows: &[RankedTeam], is_final: bool) {
    if is_final {
        println!("*** FINAL STANDINGS ***");
    }
    println!(
        "{:<4} {:<3} {:<24} {:>5} {:>6} {:>6} {:>6}",
        "Rank", "", "Team", "Wins", "Kills", "Point", "Total"
    );
    for row in rows {
        println!(
            "{:02}   {:<3} {:<24} {:>5} {:>6} {:>6} {:>6}",
            row.rank,
            badge(&row.team),
            row.team.name,
            row.wins,
            row.kills,
            row.position_points,
            row.total
        );
    }
}

fn print_current(name: &str, rows: &[CurrentMatchRow]) {
    println!("{}", name);
    println!(
        "{:<4} {:<3} {:<24} {:>5} {:>6} {:>4} {:>6} {:>6}",
        "Rank", "", "Team", "Wins", "Kills", "Pos", "Point", "Total"
    );
    for row in rows {
        let c = &row.cumulative;
        println!(
            "{:02}   {:<3} {:<24} {:>5} {:>6} {:>4} {:>6} {:>6}",
            c.rank,
            badge(&c.team),
            c.team.name,
            c.wins,
            c.kills,
            row.in_match.position,
            row.in_match.points,
            c.total
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&log_level, cli.json_logs);

    tracing::debug!("Starting scoreboard v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
    let store = StateStore::from_config(&StorageConfig::new(data_dir));
    let mut session = store.load().context("Failed to load state")?;

    let changed = run(cli.command, &mut session, &config)?;
    if changed {
        store.save(&session).context("Failed to save state")?;
    }

    Ok(())
}

/// Execute a command. Returns whether the session was modified.
fn run(command: Commands, session: &mut Session, config: &AppConfig) -> Result<bool> {
    match command {
        Commands::Tournament { action } => match action {
            TournamentAction::Create { name, teams } => {
                let teams = if teams.is_empty() {
                    vec![String::new(); config.tournament.team_count]
                } else {
                    teams
                };
                let t = session.create_tournament(&name, &teams)?;
                println!("Created '{}' with {} teams", t.name, t.team_count());
                Ok(true)
            }
            TournamentAction::List => {
                if session.tournaments().is_empty() {
                    println!("No tournaments yet.");
                }
                for (i, t) in session.tournaments().iter().enumerate() {
                    let marker = if session.active_index() == Some(i) { "*" } else { " " };
                    println!(
                        "{} {:>2}. {} ({} teams, {} matches, created {})",
                        marker,
                        i + 1,
                        t.name,
                        t.team_count(),
                        t.matches().len(),
                        t.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
                Ok(false)
            }
            TournamentAction::Select { number } => {
                session.select_tournament(to_index(number, "Tournament")?)?;
                Ok(true)
            }
            TournamentAction::Delete => {
                let freed = session.delete_active_tournament()?;
                for logo in freed {
                    println!("Released logo {}", logo);
                }
                Ok(true)
            }
            TournamentAction::Logo { team, key } => {
                let previous =
                    session.set_team_logo(to_index(team, "Team")?, key.map(LogoRef::new))?;
                if let Some(previous) = previous {
                    println!("Released logo {}", previous);
                }
                Ok(true)
            }
        },
        Commands::Match { action } => match action {
            MatchAction::Add { name } => {
                let idx = session.add_match(&name)?;
                println!("Added match {} '{}'", idx + 1, name.trim());
                Ok(true)
            }
            MatchAction::Series { count } => {
                let range = session.generate_series(count)?;
                println!("Added matches {}..={}", range.start + 1, range.end);
                Ok(true)
            }
            MatchAction::Select { number } => {
                session.select_match(to_index(number, "Match")?)?;
                Ok(true)
            }
            MatchAction::Rename { number, name } => {
                session.rename_match(to_index(number, "Match")?, &name)?;
                Ok(true)
            }
            MatchAction::Delete { number } => {
                let removed = session.delete_match(to_index(number, "Match")?)?;
                println!("Deleted match '{}'", removed.name);
                Ok(true)
            }
            MatchAction::Result {
                team,
                kills,
                position,
            } => {
                let result = session.record_result(to_index(team, "Team")?, kills, position)?;
                println!(
                    "Recorded {} kills, position {} ({} points)",
                    result.kills,
                    result.position,
                    calculate::result_points(&result)
                );
                Ok(true)
            }
        },
        Commands::Standings { through, json } => {
            let upto = through.map(|n| to_index(n, "Match")).transpose()?;
            let rows = session.standings(upto)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let is_final = upto
                    .or(session.current_match_index())
                    .and_then(|i| session.active()?.match_at(i))
                    .is_some_and(|m| m.is_final());
                print_standings(&rows, is_final);
            }
            Ok(false)
        }
        Commands::Current { json } => {
            let rows = session.current_table()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if let Some(m) = session.current() {
                print_current(&m.name, &rows);
            }
            Ok(false)
        }
        Commands::Summary { json } => {
            let Some(t) = session.active() else {
                bail!("No tournament selected");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&session.active_snapshot())?);
                return Ok(false);
            }
            if t.matches().is_empty() {
                println!("No matches yet.");
            }
            for (i, m) in t.matches().iter().enumerate() {
                println!("{}. {} ({})", i + 1, m.name, m.played_at.format("%Y-%m-%d %H:%M"));
                for row in calculate::podium(t, i, config.tournament.podium_size) {
                    println!("   {}. {} - {}", row.rank, row.team.name, row.total);
                }
            }
            Ok(false)
        }
    }
}
