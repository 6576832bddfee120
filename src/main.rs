mod config;
mod script;

use std::path::{Path, PathBuf};

use canvas::editor::EditClampPolicy;
use canvas::engine::{EngineCore, NoticeLevel};
use canvas::error::{ErrorCode, ExportError};
use canvas::registry;
use clap::{Parser, Subcommand};
use config::{AppConfig, ConfigError};
use script::{ScriptError, Session};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid export document: {0}")]
    Import(#[from] ExportError),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
            Self::Script(err) => err.error_code(),
            Self::Read { .. } => "E_CLI_READ",
            Self::Import(err) => err.error_code(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Floor-plan editor session runner")]
struct Cli {
    /// Directory exports are written to. Overrides `FLOORPLAN_OUT_DIR`.
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// `clamp` or `override`. Overrides `FLOORPLAN_EDIT_CLAMP`.
    #[arg(long, global = true, value_parser = parse_clamp_flag)]
    edit_clamp: Option<EditClampPolicy>,

    /// Background image size limit in bytes. Overrides `FLOORPLAN_MAX_BACKGROUND_BYTES`.
    #[arg(long, global = true)]
    max_background_bytes: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines session script against a fresh session.
    Run { script: PathBuf },
    /// Validate an exported floor plan and print a summary.
    Inspect { file: PathBuf },
    /// List the object palette.
    Palette,
}

fn parse_clamp_flag(raw: &str) -> Result<EditClampPolicy, ConfigError> {
    config::parse_edit_clamp(Some(raw))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(out_dir) = cli.out_dir {
        config.out_dir = out_dir;
    }
    if let Some(policy) = cli.edit_clamp {
        config.edit_clamp = policy;
    }
    if cli.max_background_bytes.is_some() {
        config.max_background_bytes = cli.max_background_bytes;
    }

    let result = match cli.command {
        Command::Run { script } => run_script(&config, &script).await,
        Command::Inspect { file } => inspect(&file).await,
        Command::Palette => {
            print_palette();
            Ok(())
        }
    };
    if let Err(err) = &result {
        tracing::error!(code = err.error_code(), error = %err, "floorplan failed");
    }
    result
}

async fn read(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

async fn run_script(config: &AppConfig, path: &Path) -> Result<(), CliError> {
    let text = read(path).await?;
    let core = EngineCore::new(config.engine_config());
    let mut session = Session::new(core, config.out_dir.clone(), script::script_dir(path));
    let steps = script::replay(&mut session, &text).await?;
    tracing::info!(steps, script = %path.display(), "script complete");

    for notice in session.notices() {
        println!("[{}] {}", level_tag(notice.level), notice.message);
    }
    for export in session.exports() {
        println!("exported {}", export.display());
    }
    print_floors(session.core());
    Ok(())
}

async fn inspect(path: &Path) -> Result<(), CliError> {
    let text = read(path).await?;
    let doc = canvas::export::import(&text)?;
    let floor = &doc.floor;
    println!("{} ({}x{})", floor.name, floor.width, floor.height);
    println!("  exported {} (format {})", doc.export_date, doc.version);
    println!("  background: {}", if floor.background_image.is_some() { "yes" } else { "none" });
    println!("  objects: {}", floor.objects.len());
    for obj in &floor.objects {
        println!(
            "    {} {:<16} {:<13} at ({}, {}) size {}x{} rot {}",
            registry::display_meta(obj.kind).glyph,
            obj.name,
            obj.kind.wire_name(),
            obj.x,
            obj.y,
            obj.width,
            obj.height,
            obj.rotation
        );
    }
    Ok(())
}

fn print_palette() {
    for entry in registry::palette() {
        println!(
            "{} {:<14} {:<13} {:>3}x{:<3} {:<14} {}",
            entry.meta.glyph,
            entry.label,
            entry.kind.wire_name(),
            entry.size.width,
            entry.size.height,
            entry.meta.color,
            entry.description
        );
    }
}

fn print_floors(core: &EngineCore) {
    let active = core.store.active_id();
    for floor in core.store.floors() {
        let marker = if floor.id == active { "*" } else { " " };
        println!("{marker} {} ({}x{}) objects={}", floor.name, floor.width, floor.height, floor.objects.len());
        for obj in &floor.objects {
            println!("    {} at ({}, {}) rot {}", obj.name, obj.x, obj.y, obj.rotation);
        }
    }
}

fn level_tag(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    }
}
