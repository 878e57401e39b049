
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use course::analytics::{ClassAnalytics, ClassRecord, StudentDetail, collect_students};
use course::config::{ConfigError, CourseConfig};
use course::progress::{ProgressError, ProgressRecord, ProgressStore};
use course::stats::{SessionStats, percent};
use course::timestamp::now_ms;
use matching::consts::{DEFAULT_HIT_RADIUS_PX, DEFAULT_SURFACE_HEIGHT_PX, DEFAULT_SURFACE_WIDTH_PX};
use matching::content::parse_slide;
use matching::geometry::Surface;
use matching::input::PointerEvent;
use matching::{Action, GameSettings, MatchingGame, SetupError};
use serde_json::{Value, json};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("trace line {line}: {source}")]
    Trace { line: usize, source: serde_json::Error },
    #[error("invalid slide content: {0}")]
    Setup(#[from] SetupError),
    #[error("slide has no matching game")]
    NoMatchingGame,
    #[error("invalid course configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

#[derive(Parser, Debug)]
#[command(name = "kinmen-cli", about = "Kinmen dialect course tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a pointer trace against a slide's matching game.
    Play(PlayArgs),
    /// Aggregate learner progress into dashboard histograms.
    Analytics(AnalyticsArgs),
    /// Show one learner's progress in detail.
    Student(StudentArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Slide content JSON containing `matchingData`.
    #[arg(long)]
    content: PathBuf,

    /// Pointer events, one JSON object per line.
    #[arg(long)]
    trace: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SURFACE_WIDTH_PX)]
    width: f64,

    #[arg(long, default_value_t = DEFAULT_SURFACE_HEIGHT_PX)]
    height: f64,

    #[arg(long, env = "KINMEN_HIT_RADIUS", default_value_t = DEFAULT_HIT_RADIUS_PX, value_parser = parse_hit_radius)]
    hit_radius: f64,

    /// JSON array of progress records to fold the session into.
    #[arg(long, requires = "user")]
    progress: Option<PathBuf>,

    /// Learner the session belongs to.
    #[arg(long, requires = "progress")]
    user: Option<String>,
}

#[derive(Args, Debug)]
struct AnalyticsArgs {
    /// JSON array of progress records.
    #[arg(long)]
    progress: PathBuf,

    /// JSON array of class rosters; limits the report to their students.
    #[arg(long)]
    classes: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StudentArgs {
    /// JSON array of progress records.
    #[arg(long)]
    progress: PathBuf,

    #[arg(long)]
    user: String,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(&args),
        Command::Analytics(args) => run_analytics(&args),
        Command::Student(args) => run_student(&args),
    }
}

fn run_play(args: &PlayArgs) -> Result<(), CliError> {
    let slide = parse_slide(&read_file(&args.content)?)?;
    if slide.matching_data.is_none() {
        return Err(CliError::NoMatchingGame);
    }

    let mut game = MatchingGame::new(GameSettings { hit_radius: args.hit_radius });
    game.set_surface(Surface::new(args.width, args.height));
    game.load_slide(&slide)?;

    let session = Rc::new(RefCell::new(SessionStats::new()));
    let tally = Rc::clone(&session);
    game.on_validated(move |result| {
        tally
            .borrow_mut()
            .record_matching(result.correct_count, result.total, now_ms());
    });

    let file = File::open(&args.trace).map_err(|source| io_error(&args.trace, source))?;
    let mut replayed = 0_usize;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| io_error(&args.trace, source))?;
        let Some(event) = parse_trace_line(&line, index + 1)? else {
            continue;
        };
        let actions = game.handle_pointer(event);
        debug!(line = index + 1, actions = actions.len(), "event replayed");
        replayed = replayed.saturating_add(1);
    }

    let notice = game.check_answers().into_iter().find_map(|action| match action {
        Action::Validated { notice, .. } => Some(notice),
        _ => None,
    });
    let result = game.last_result();
    info!(replayed, connections = game.connections().len(), "trace replayed");

    let learner = match (&args.progress, &args.user) {
        (Some(path), Some(user)) => {
            let mut store = load_store(path)?;
            let unlocked = store.record_session(user, &session.borrow(), now_ms())?;
            Some(json!({
                "username": user,
                "statistics": store.get(user).map(|r| &r.statistics),
                "unlocked": unlocked,
            }))
        }
        _ => None,
    };

    print_json(&json!({
        "gameId": game.game_id(),
        "connections": game.connections().as_slice(),
        "result": result,
        "scorePercent": result.map(|r| percent(r.correct_count, r.total)),
        "notice": notice,
        "learner": learner,
    }))
}

fn run_analytics(args: &AnalyticsArgs) -> Result<(), CliError> {
    let config = CourseConfig::from_env()?;
    let records: Vec<ProgressRecord> = serde_json::from_str(&read_file(&args.progress)?)?;

    let selected: Vec<ProgressRecord> = match &args.classes {
        Some(path) => {
            let classes: Vec<ClassRecord> = serde_json::from_str(&read_file(path)?)?;
            let students = collect_students(&classes);
            let store = ProgressStore::from_records(records);
            store.batch_get(&students).into_iter().cloned().collect()
        }
        None => records,
    };
    info!(students = selected.len(), "computing class analytics");

    let analytics = ClassAnalytics::from_progress(&selected, &config);
    print_json(&serde_json::to_value(analytics)?)
}

fn run_student(args: &StudentArgs) -> Result<(), CliError> {
    let config = CourseConfig::from_env()?;
    let store = load_store(&args.progress)?;
    let record = store
        .get(&args.user)
        .ok_or_else(|| ProgressError::NotFound(args.user.clone()))?;
    print_json(&serde_json::to_value(StudentDetail::from_record(record, &config))?)
}

fn load_store(path: &Path) -> Result<ProgressStore, CliError> {
    let records: Vec<ProgressRecord> = serde_json::from_str(&read_file(path)?)?;
    Ok(ProgressStore::from_records(records))
}

fn parse_hit_radius(raw: &str) -> Result<f64, String> {
    let radius: f64 = raw.trim().parse().map_err(|error| format!("`{raw}` is not a number: {error}"))?;
    GameSettings::with_hit_radius(radius)
        .map(|settings| settings.hit_radius)
        .map_err(|error| error.to_string())
}

fn parse_trace_line(line: &str, number: usize) -> Result<Option<PointerEvent>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| CliError::Trace { line: number, source })
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: io::Error) -> CliError {
    CliError::Io { path: path.display().to_string(), source }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
