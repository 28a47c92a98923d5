//! stylewatch CLI - SCSS compiler and file watcher
//!
//! Usage: stylewatch <COMMAND>
//!
//! Commands:
//!   build   Compile the stylesheet once
//!   watch   Compile, then recompile on every change

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use stylewatch::config::DEFAULT_CONFIG_FILE;
use stylewatch::{Config, OutputStyle, WatchEvent, WatchOptions};

/// stylewatch - SCSS compiler and file watcher
#[derive(Parser, Debug)]
#[command(name = "stylewatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output events as NDJSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Path and style overrides shared by both commands
#[derive(Args, Debug, Default)]
struct CompileArgs {
    /// Root stylesheet source
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Compiled CSS output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output style (expanded or compressed)
    #[arg(long, value_parser = parse_style)]
    style: Option<OutputStyle>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the stylesheet once
    Build {
        #[command(flatten)]
        args: CompileArgs,
    },

    /// Compile, then recompile on every change under the watch directory
    Watch {
        #[command(flatten)]
        args: CompileArgs,

        /// Directory to watch (defaults to the source's directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn parse_style(value: &str) -> Result<OutputStyle, String> {
    OutputStyle::parse(value).ok_or_else(|| {
        format!(
            "invalid style '{}' (expected one of: {})",
            value,
            OutputStyle::VALUES.join(", ")
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { args } => cmd_build(&cli.config, args, cli.json),
        Commands::Watch { args, dir } => cmd_watch(&cli.config, args, dir, cli.json),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Config file + env, then CLI flags on top
fn resolve_config(config_path: &Path, args: CompileArgs, dir: Option<PathBuf>) -> Result<Config> {
    let (mut config, warnings) = Config::load_or_default(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Some(source) = args.source {
        config.paths.source = source;
    }
    if let Some(output) = args.output {
        config.paths.output = output;
    }
    if let Some(style) = args.style {
        config.compile.style = style;
    }
    if let Some(dir) = dir {
        config.paths.watch_dir = Some(dir);
    }

    log::debug!("Resolved config: {:?}", config);
    Ok(config)
}

fn cmd_build(config_path: &Path, args: CompileArgs, json: bool) -> Result<()> {
    let config = resolve_config(config_path, args, None)?;
    let options = config.compile_options();

    let report = stylewatch::build(&options)
        .with_context(|| format!("building {}", options.source.display()))?;

    if json {
        let output = serde_json::json!({
            "event": "build",
            "source": options.source.display().to_string(),
            "output": report.output.display().to_string(),
            "bytes": report.bytes,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "✓ Compiled {} -> {} ({} bytes)",
            options.source.display(),
            report.output.display(),
            report.bytes
        );
    }

    Ok(())
}

fn cmd_watch(
    config_path: &Path,
    args: CompileArgs,
    dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = resolve_config(config_path, args, dir)?;
    let options = WatchOptions::new(config.watch_dir(), config.compile_options());

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl+C handler")?;

    if !json {
        println!("👀 stylewatch");
        println!("Press Ctrl+C to stop\n");
    }

    let summary = stylewatch::watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            print_event(&event);
        }
    })?;

    log::info!(
        "Watch finished: {} compiles, {} failed",
        summary.compiles,
        summary.failures
    );
    Ok(())
}

fn print_event(event: &WatchEvent) {
    match event {
        WatchEvent::WatchStarted {
            watch_dir,
            source,
            output,
        } => {
            println!("📂 Watching: {}", watch_dir);
            println!("   {} -> {}", source, output);
        }
        WatchEvent::FileChanged { kind, paths } => {
            println!("📝 {:?}: {}", kind, paths.join(", "));
        }
        WatchEvent::CompileStarted => {}
        WatchEvent::CompileComplete { output, bytes } => {
            println!("✓ Compiled {} ({} bytes)", output, bytes);
        }
        WatchEvent::Error { message } => {
            eprintln!("✗ Error: {}", message);
        }
        WatchEvent::Shutdown => {
            println!("\n👋 Shutting down...");
        }
    }
}
