//! Flamegraph Export CLI
//!
//! Exports flamegraph profiles as image snapshots, JSON dumps, and
//! server-rendered pprof/html documents.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flamegraph_export::commands::{
    display_version, execute_export, render_url_for, validate_args, validate_profile_file,
    ExportArgs, ExportKind,
};
use flamegraph_export::export::{MonthNumbering, RemoteFormat};
use flamegraph_export::surface::SurfaceConfig;
use flamegraph_export::utils::config::{
    DEFAULT_EXPORT_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_SERVER_URL, DEFAULT_SNAPSHOT_WIDTH,
};

/// Flamegraph Export - download flamegraph profiles in other formats
#[derive(Parser, Debug)]
#[command(name = "flame-export")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Rendering server base URL
    #[arg(long, global = true, env = "FLAME_EXPORT_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Directory exports are saved into
    #[arg(long, global = true, env = "FLAME_EXPORT_OUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Number months 01-12 in file names instead of the legacy 00-11
    #[arg(long, global = true)]
    calendar_month: bool,
}

/// Profile input shared by the export commands
#[derive(Args, Debug)]
struct ProfileArg {
    /// Path to flamebearer profile JSON
    #[arg(short, long)]
    profile: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Save an image snapshot of the flamegraph
    ///
    /// A rendered profile is always saved as SVG. Pass --surface to save a
    /// pre-rendered PNG or SVG instead.
    Snapshot {
        /// Path to flamebearer profile JSON (names the file and is rendered
        /// when no --surface is given)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Pre-rendered PNG/SVG to snapshot instead of rendering the profile
        #[arg(long)]
        surface: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_SNAPSHOT_WIDTH)]
        width: usize,
    },

    /// Save the raw profile as JSON
    Json {
        #[command(flatten)]
        input: ProfileArg,

        /// File name (without .json)
        #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
        name: String,
    },

    /// Download the server-rendered pprof document
    Pprof {
        #[command(flatten)]
        input: ProfileArg,
    },

    /// Download the server-rendered standalone HTML report
    Html {
        #[command(flatten)]
        input: ProfileArg,
    },

    /// Print the render URL for a profile
    Url {
        #[command(flatten)]
        input: ProfileArg,

        /// Render format (pprof or html)
        #[arg(short, long, default_value = "pprof")]
        format: RemoteFormat,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let month_numbering = if cli.calendar_month {
        MonthNumbering::Calendar
    } else {
        MonthNumbering::ZeroBased
    };

    let base = ExportArgs {
        output_dir: cli.out_dir,
        server_url: cli.server.clone(),
        month_numbering,
        ..Default::default()
    };

    // Execute command
    let args = match cli.command {
        Commands::Snapshot {
            profile,
            surface,
            title,
            width,
        } => {
            let mut config = SurfaceConfig::new().with_width(width);
            if let Some(title_str) = title {
                config = config.with_title(title_str);
            }

            ExportArgs {
                kind: ExportKind::Snapshot,
                profile,
                surface_image: surface,
                surface_config: config,
                ..base
            }
        }

        Commands::Json { input, name } => ExportArgs {
            kind: ExportKind::Json,
            profile: Some(input.profile),
            export_name: name,
            ..base
        },

        Commands::Pprof { input } => ExportArgs {
            kind: ExportKind::Pprof,
            profile: Some(input.profile),
            ..base
        },

        Commands::Html { input } => ExportArgs {
            kind: ExportKind::Html,
            profile: Some(input.profile),
            ..base
        },

        Commands::Url { input, format } => {
            let url = render_url_for(&input.profile, &cli.server, format)?;
            println!("{}", url);
            return Ok(());
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
            return Ok(());
        }

        Commands::Version => {
            display_version();
            return Ok(());
        }
    };

    // Validate args first
    validate_args(&args)?;

    // Execute export
    execute_export(args)?;

    Ok(())
}
