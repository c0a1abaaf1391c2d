use std::path::{Path, PathBuf};

use clap::Parser;
use contrail_core::SceneConfig;
use contrail_platform::Result;
use contrail_ui::{run_preview, PreviewEvent};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod headless;
mod watch;

#[derive(Parser, Debug)]
#[command(name = "contrail")]
#[command(version, about = "Pointer trail and parallax engine", long_about = None)]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run without a window, driving a scripted pointer path
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for the headless run
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Print the headless report as JSON
    #[arg(long)]
    dump_json: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// A named config that fails to load is fatal; no path means defaults.
fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .map_err(|err| format!("config {}: {err}", path.display()).into()),
        None => {
            info!("No config given, using defaults");
            Ok(SceneConfig::default())
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if args.print_config {
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if args.headless {
        let report = headless::run_headless(config, args.frames, args.seed)?;
        if args.dump_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        return Ok(());
    }

    let (command_sender, command_receiver) = crossbeam_channel::unbounded();
    let (event_sender, event_receiver) = crossbeam_channel::unbounded::<PreviewEvent>();
    if let Some(path) = args.config.clone() {
        watch::spawn_config_watcher(path, command_sender.clone());
    }
    std::thread::spawn(move || {
        for event in event_receiver.iter() {
            match event {
                PreviewEvent::Mounted { parallax_elements } => {
                    info!("Preview mounted with {parallax_elements} parallax elements")
                }
                PreviewEvent::ReloadRejected(reason) => warn!("Config reload rejected: {reason}"),
                PreviewEvent::Unmounted { frames, spawned } => {
                    info!("Preview unmounted after {frames} frames, {spawned} trail items")
                }
            }
        }
    });
    run_preview(config, command_receiver, event_sender)?;
    drop(command_sender);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("Contrail starting");
    if let Err(e) = run(args) {
        eprintln!("Contrail error: {e}");
        std::process::exit(1);
    }
}
