use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, SessionController, StudyApiClient, StudyApiConfig};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

/// Study Companion
///
/// Upload documents or a video link, then explore a generated mind map, take a
/// quiz, or ask questions about the material.
#[derive(Parser, Debug)]
#[command(name = "study-companion")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the study service (overrides STUDY_API_BASE_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds (overrides STUDY_API_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Document to pre-fill in the uploader; repeat for several files
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Video link to pre-fill in the uploader
    #[arg(long, value_name = "URL")]
    media_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

struct DesktopApp {
    controller: SessionController,
    preset_files: Vec<PathBuf>,
    preset_media_url: Option<String>,
}

impl UiApp for DesktopApp {
    fn session_controller(&self) -> SessionController {
        self.controller.clone()
    }

    fn preset_files(&self) -> Vec<PathBuf> {
        self.preset_files.clone()
    }

    fn preset_media_url(&self) -> Option<String> {
        self.preset_media_url.clone()
    }
}

/// Environment first, then command-line overrides.
fn resolve_config(args: &Args) -> anyhow::Result<StudyApiConfig> {
    let mut config = StudyApiConfig::from_env()?;
    if let Some(url) = args.api_url.as_deref() {
        config.base_url = StudyApiConfig::new(url)?.base_url;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    tracing::info!(
        base_url = %config.base_url,
        timeout = ?config.request_timeout,
        "using study service"
    );

    let client = StudyApiClient::new(config)?;
    let controller = SessionController::new(Arc::new(client), Clock::system());
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        controller,
        preset_files: args.files,
        preset_media_url: args.media_url,
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Companion")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}
