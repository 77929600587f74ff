use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use fortune_core::FallbackClassifier;
use fortune_core::model::QuestionCatalog;
use services::catalog::{fetch_catalog_or_builtin, load_catalog_file};
use services::config::parse_base_url;
use services::quiz::DEFAULT_PACING;
use services::{
    CardExportService, ClassificationClient, ClassifierConfig, Clock, HttpTransport,
    QuizLoopService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPacing { raw: String },
    EmptyPath { flag: &'static str },
    ConflictingCatalogSources,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPacing { raw } => write!(f, "invalid --pacing-ms value: {raw}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} requires a non-empty path"),
            ArgsError::ConflictingCatalogSources => {
                write!(f, "--catalog and --remote-questions cannot be combined")
            }
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

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = require_value(args, flag)?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    card_exporter: Arc<CardExportService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn card_exporter(&self) -> Arc<CardExportService> {
        Arc::clone(&self.card_exporter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CatalogSource {
    Builtin,
    File(PathBuf),
    Remote,
}

struct Args {
    api_url: Option<String>,
    catalog: CatalogSource,
    export_dir: PathBuf,
    pacing: Duration,
    strict: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--api-url <url>] [--catalog <file.json> | --remote-questions]"
    );
    eprintln!("                     [--export-dir <dir>] [--pacing-ms <ms>] [--strict]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:8000");
    eprintln!("  --export-dir fortune-cards");
    eprintln!("  --pacing-ms 800");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FORTUNE_API_URL, FORTUNE_ATTEMPTS, FORTUNE_TIMEOUT_SECS, FORTUNE_STRICT_MODE");
    eprintln!("  RUST_LOG (default: info)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            api_url: None,
            catalog: CatalogSource::Builtin,
            export_dir: PathBuf::from("fortune-cards"),
            pacing: DEFAULT_PACING,
            strict: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(args, "--api-url")?),
                "--catalog" => {
                    if parsed.catalog == CatalogSource::Remote {
                        return Err(ArgsError::ConflictingCatalogSources);
                    }
                    parsed.catalog = CatalogSource::File(require_path(args, "--catalog")?);
                }
                "--remote-questions" => {
                    if matches!(parsed.catalog, CatalogSource::File(_)) {
                        return Err(ArgsError::ConflictingCatalogSources);
                    }
                    parsed.catalog = CatalogSource::Remote;
                }
                "--export-dir" => parsed.export_dir = require_path(args, "--export-dir")?,
                "--pacing-ms" => {
                    let value = require_value(args, "--pacing-ms")?;
                    let millis: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidPacing { raw: value.clone() })?;
                    parsed.pacing = Duration::from_millis(millis);
                }
                "--strict" => parsed.strict = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Flags win over environment values.
    let mut config = ClassifierConfig::from_env()?;
    if let Some(raw) = parsed.api_url.as_deref() {
        config.base_url = parse_base_url(raw)?;
    }
    if parsed.strict {
        config = config.with_strict(true);
    }

    let transport = HttpTransport::new(config.clone())?;
    let catalog = match &parsed.catalog {
        CatalogSource::Builtin => QuestionCatalog::builtin(),
        CatalogSource::File(path) => load_catalog_file(path).await?,
        CatalogSource::Remote => fetch_catalog_or_builtin(&transport).await,
    };
    info!(
        api = %config.base_url,
        questions = catalog.len(),
        attempts = config.retry.max_attempts(),
        strict = config.strict,
        "starting fun fortune"
    );

    let clock = Clock::default_clock();
    let classifier = ClassificationClient::new(Arc::new(transport), config.retry)
        .with_fallback(FallbackClassifier::builtin());
    let quiz_loop = QuizLoopService::new(clock, Arc::new(catalog), Arc::new(classifier))
        .with_pacing(parsed.pacing)
        .with_surface_degraded(config.strict);
    let card_exporter = CardExportService::new(parsed.export_dir);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(quiz_loop),
        card_exporter: Arc::new(card_exporter),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Fun Fortune")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.catalog, CatalogSource::Builtin);
        assert_eq!(args.pacing, DEFAULT_PACING);
        assert_eq!(args.export_dir, PathBuf::from("fortune-cards"));
        assert!(args.api_url.is_none());
        assert!(!args.strict);
    }

    #[test]
    fn parses_all_flags() {
        let args = parse(&[
            "--api-url",
            "https://fortune.example.com",
            "--catalog",
            "questions.json",
            "--export-dir",
            "/tmp/cards",
            "--pacing-ms",
            "0",
            "--strict",
        ])
        .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("https://fortune.example.com"));
        assert_eq!(args.catalog, CatalogSource::File(PathBuf::from("questions.json")));
        assert_eq!(args.export_dir, PathBuf::from("/tmp/cards"));
        assert_eq!(args.pacing, Duration::ZERO);
        assert!(args.strict);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse(&["--pacing-ms", "soon"]),
            Err(ArgsError::InvalidPacing { .. })
        ));
        assert!(matches!(
            parse(&["--api-url"]),
            Err(ArgsError::MissingValue { flag: "--api-url" })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(
            parse(&["--catalog", "q.json", "--remote-questions"]),
            Err(ArgsError::ConflictingCatalogSources)
        ));
    }
}
