use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{DEFAULT_BASE_URL, ExerciseApi, ExerciseService, ExerciseServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use writing_core::model::StudentProfile;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBaseUrl { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBaseUrl { raw } => write!(f, "invalid --base-url value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    exercise_api: Arc<dyn ExerciseApi>,
    student: Arc<StudentProfile>,
}

impl UiApp for DesktopApp {
    fn exercise_api(&self) -> Arc<dyn ExerciseApi> {
        Arc::clone(&self.exercise_api)
    }

    fn student(&self) -> Arc<StudentProfile> {
        Arc::clone(&self.student)
    }
}

struct Args {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    student_file: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-url <url>] [--timeout-secs <secs>] [--student <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!("  --timeout-secs 30");
    eprintln!("  --student built-in sample profile");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WRITING_API_BASE_URL, WRITING_API_TIMEOUT_SECS, WRITING_STUDENT_FILE");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut base_url = None;
        let mut timeout_secs = None;
        let mut student_file = std::env::var("WRITING_STUDENT_FILE").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    let value = require_value(args, "--base-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBaseUrl { raw: value });
                    }
                    base_url = Some(value);
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    timeout_secs = Some(parsed);
                }
                "--student" => {
                    let value = require_value(args, "--student")?;
                    student_file = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            base_url,
            timeout_secs,
            student_file,
        })
    }
}

// Load the profile in the binary glue so core stays free of file I/O.
fn load_student(path: Option<&Path>) -> Result<StudentProfile, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(StudentProfile::sample());
    };

    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read student profile {}: {err}", path.display()))?;
    let profile: StudentProfile = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid student profile {}: {err}", path.display()))?;
    Ok(profile)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Environment variables seed the config; flags override them.
    let defaults = ExerciseServiceConfig::from_env()?;
    let base_url = parsed
        .base_url
        .unwrap_or_else(|| defaults.base_url().as_str().to_string());
    let timeout = parsed
        .timeout_secs
        .map_or(defaults.timeout(), Duration::from_secs);
    let config = ExerciseServiceConfig::new(&base_url, timeout)?;

    let student = load_student(parsed.student_file.as_deref())?;
    info!("writing service endpoint: {}", config.base_url());

    let exercise_api: Arc<dyn ExerciseApi> = Arc::new(ExerciseService::new(config)?);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        exercise_api,
        student: Arc::new(student),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Writing Exercise")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
