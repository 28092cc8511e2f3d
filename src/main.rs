use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use playlister::{
    config::Config,
    domain::{Comparator, ExportFilter, PlaylistSnapshot, Provider, to_csv},
    logging::init_tracing,
    services::{
        playlist::PlaylistService,
        youtube::{YoutubeHttpAdapter, YoutubeImportService},
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, global = true, env = "PLAYLISTER_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directives, overridden by RUST_LOG
    #[arg(long, default_value = "warn", global = true, env = "PLAYLISTER_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the playlists a provider account can import
    Playlists {
        #[arg(short, long, value_enum)]
        provider: Provider,

        /// OAuth access token for the provider
        #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },
    /// Import a playlist and write it as a snapshot JSON file
    Import {
        #[arg(short, long, value_enum)]
        provider: Provider,

        /// Playlist id (YouTube) or URL (Apple Music)
        #[arg(long)]
        playlist_id: String,

        /// Where to write the snapshot (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// OAuth access token for the provider
        #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },
    /// Compare two snapshots and export the result
    Compare {
        /// Left snapshot JSON file
        #[arg(short, long)]
        left: PathBuf,

        /// Right snapshot JSON file
        #[arg(short, long)]
        right: PathBuf,

        /// Which partitions to export
        #[arg(short, long, value_enum, default_value_t = ExportFilter::All)]
        filter: ExportFilter,

        /// Where to write the export (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the full comparison as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

fn read_snapshot(path: &Path) -> Result<PlaylistSnapshot> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Failed to parse snapshot: {}", path.display()))
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{contents}").wrap_err("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn playlist_service(
    config: &Config,
    access_token: Option<String>,
) -> Result<PlaylistService<YoutubeHttpAdapter>> {
    let youtube = match access_token {
        Some(token) => Some(YoutubeImportService::new(YoutubeHttpAdapter::new(
            config.youtube_api_base()?,
            token,
        ))),
        None => None,
    };
    Ok(PlaylistService::new(youtube))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    tracing::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load playlister config")?;

    match args.command {
        Commands::Playlists {
            provider,
            access_token,
        } => {
            let service = playlist_service(&config, access_token)?;
            let playlists = service.list_playlists(provider).await?;
            if playlists.is_empty() {
                eprintln!("No playlists found for {provider}");
            }
            for playlist in playlists {
                match playlist.item_count {
                    Some(count) => println!("{}\t{} ({count} items)", playlist.id, playlist.title),
                    None => println!("{}\t{}", playlist.id, playlist.title),
                }
            }
        }
        Commands::Import {
            provider,
            playlist_id,
            output,
            access_token,
        } => {
            let service = playlist_service(&config, access_token)?;
            let snapshot = service.import_playlist(provider, &playlist_id).await?;
            let json =
                serde_json::to_string_pretty(&snapshot).wrap_err("Failed to serialize snapshot")?;
            write_output(output.as_deref(), &json)?;
            eprintln!(
                "Imported \"{}\" ({} tracks)",
                snapshot.name,
                snapshot.tracks.len()
            );
        }
        Commands::Compare {
            left,
            right,
            filter,
            output,
            json,
        } => {
            let left = read_snapshot(&left)?;
            let right = read_snapshot(&right)?;

            let comparator = Comparator::new(config.duration_tolerance_secs());
            let result = comparator.compare(left, right);
            let summary = result.summary();
            eprintln!(
                "{} ({} tracks) vs {} ({} tracks): {} only in left, {} only in right, {} in both",
                result.left.name,
                summary.left_total,
                result.right.name,
                summary.right_total,
                summary.only_in_left,
                summary.only_in_right,
                summary.in_both,
            );

            let contents = if json {
                serde_json::to_string_pretty(&result).wrap_err("Failed to serialize comparison")?
            } else {
                to_csv(&result, Some(filter)).wrap_err("Failed to build CSV export")?
            };
            let output = output.map(|path| config.export_path(&path));
            write_output(output.as_deref(), &contents)?;
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                println!("{}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
