//! Marquee CLI - run the launcher shell headless.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::disallowed_methods,
    clippy::too_many_lines,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::doc_markdown
)]

use clap::{Parser, Subcommand};
use marquee::{
    CommandLauncher, GameLibrary, LaunchRequest, Launcher, MemoryAudio, MemoryLauncher, Services,
    Settings, ShellError, SystemCatalog, ViewController, ViewState, Window,
};
use marquee_core::{Button, Input, RecordingCanvas, Size};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Controller-driven game launcher shell, headless")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a button script and print a JSON summary
    Run {
        /// System catalog (TOML)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Settings file (TOML); defaults when omitted
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Buttons separated by commas or spaces, `-` for an idle frame
        #[arg(long, default_value = "")]
        script: String,

        /// Milliseconds per frame
        #[arg(long, default_value = "16")]
        frame_ms: u32,

        /// Idle frames after the script
        #[arg(long, default_value = "120")]
        settle: u32,

        /// Screen width
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Screen height
        #[arg(long, default_value = "720")]
        height: f32,

        /// Build every game list before the first frame
        #[arg(long)]
        preload: bool,

        /// Run launch commands instead of only recording them
        #[arg(long)]
        exec: bool,
    },

    /// Validate a system catalog
    Check {
        /// System catalog (TOML)
        #[arg(default_value = "systems.toml")]
        catalog: PathBuf,
    },
}

struct RunOptions {
    catalog: PathBuf,
    settings: Option<PathBuf>,
    script: String,
    frame_ms: u32,
    settle: u32,
    screen: Size,
    preload: bool,
    exec: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            catalog,
            settings,
            script,
            frame_ms,
            settle,
            width,
            height,
            preload,
            exec,
        } => {
            run(RunOptions {
                catalog,
                settings,
                script,
                frame_ms,
                settle,
                screen: Size::new(width, height),
                preload,
                exec,
            });
        }
        Commands::Check { catalog } => {
            check_catalog(&catalog);
        }
    }
}

// =============================================================================
// Run
// =============================================================================

/// Records every launch and optionally runs it.
struct ScriptLauncher {
    record: MemoryLauncher,
    exec: Option<CommandLauncher>,
}

impl Launcher for ScriptLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), ShellError> {
        self.record.launch(request)?;
        match &self.exec {
            Some(exec) => exec.launch(request),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
struct LaunchSummary {
    system: String,
    name: String,
    command: String,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    state: String,
    system: Option<String>,
    frames: u64,
    elapsed_ms: u64,
    menu_open: bool,
    launches: Vec<LaunchSummary>,
    help: Vec<String>,
    rendered: Vec<String>,
}

/// One entry per frame: the button pressed that frame, if any.
fn parse_script(script: &str) -> Result<Vec<Option<Button>>, String> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token == "-" {
                Ok(None)
            } else {
                token
                    .parse::<Button>()
                    .map(Some)
                    .map_err(|e| format!("{}", e))
            }
        })
        .collect()
}

fn state_name(state: &ViewState) -> &'static str {
    match state {
        ViewState::Nothing => "nothing",
        ViewState::SystemSelect(_) => "system_select",
        ViewState::GameList(_) => "game_list",
    }
}

/// Log and report a fatal error, then exit.
fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{}: {}", context, err);
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => fail("Failed to load settings", e),
        },
        None => Settings::default(),
    }
}

fn load_catalog(path: &Path) -> SystemCatalog {
    match SystemCatalog::load(path) {
        Ok(catalog) => catalog,
        Err(e) => fail("Failed to load catalog", e),
    }
}

fn run(options: RunOptions) {
    let steps = match parse_script(&options.script) {
        Ok(steps) => steps,
        Err(e) => fail("Invalid script", e),
    };
    log::info!(
        "replaying {} steps plus {} idle frames at {} ms",
        steps.len(),
        options.settle,
        options.frame_ms
    );
    let settings = load_settings(options.settings.as_deref());
    let catalog = load_catalog(&options.catalog);

    let launcher = Arc::new(ScriptLauncher {
        record: MemoryLauncher::new(),
        exec: options.exec.then(CommandLauncher::new),
    });
    let services = Services {
        settings: Arc::new(settings),
        audio: Arc::new(MemoryAudio::new()),
        launcher: launcher.clone(),
    };

    let mut controller = ViewController::new(Box::new(catalog), services, options.screen);
    if options.preload {
        if let Err(e) = controller.preload() {
            fail("Preload failed", e);
        }
    }
    if let Err(e) = controller.go_to_start() {
        fail("Cannot start", e);
    }

    let mut window = Window::new(controller);
    let mut canvas = RecordingCanvas::new();
    let idle = std::iter::repeat(None).take(options.settle as usize);
    for step in steps.into_iter().chain(idle) {
        let inputs: Vec<Input> = step
            .map(|button| vec![Input::press(button), Input::release(button)])
            .unwrap_or_default();
        canvas.clear();
        window.run_frame(&inputs, options.frame_ms, &mut canvas);
    }

    let state = window.controller().state();
    log::info!(
        "finished after {} frames in {:?}",
        window.frame_count(),
        state
    );
    let summary = RunSummary {
        state: state_name(state).to_string(),
        system: state.system().map(str::to_string),
        frames: window.frame_count(),
        elapsed_ms: window.frame_count() * u64::from(options.frame_ms),
        menu_open: window.is_menu_open(),
        launches: launcher
            .record
            .launches()
            .into_iter()
            .map(|request| LaunchSummary {
                command: request.command_line(),
                system: request.system,
                name: request.name,
            })
            .collect(),
        help: window.help_bar().labels(),
        rendered: canvas.texts().into_iter().map(str::to_string).collect(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => fail("Failed to serialize summary", e),
    }
}

// =============================================================================
// Check
// =============================================================================

fn check_catalog(path: &Path) {
    println!("Checking catalog: {}", path.display());
    let catalog = load_catalog(path);

    let systems = catalog.systems();
    let enabled = systems.iter().filter(|s| s.enabled).count();
    println!("Catalog valid!");
    println!("  Systems: {} ({} enabled)", systems.len(), enabled);
    for system in systems {
        println!(
            "  {:<12} {:>5} games  views: {}{}",
            system.name,
            system.displayed_game_count(),
            if system.theme.views.is_empty() {
                "-".to_string()
            } else {
                system.theme.views.join(", ")
            },
            if system.enabled { "" } else { "  (disabled)" }
        );
    }
    if enabled == 0 {
        fail("Catalog check failed", "no enabled systems");
    }
}
