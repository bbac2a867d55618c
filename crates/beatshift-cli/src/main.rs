//! beatshift: move the notes of a song file sideways in time

mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use beatshift_core::{BeatOffset, ShiftStrategy};
use beatshift_services::{FilePreferences, Song, SongDocument};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beatshift", version, about = "Move song notes sideways by a number of beats")]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shift every note of a song
    Shift {
        /// Song file (JSON)
        #[arg(long)]
        song: PathBuf,
        /// Beats to move; negative is left, positive is right
        #[arg(long, allow_hyphen_values = true)]
        beats: String,
        /// overflow or wrapAround (defaults to the last one used)
        #[arg(long)]
        strategy: Option<String>,
        /// Output file (defaults to overwriting the song file)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print bars, channels and notes of a song
    Show {
        #[arg(long)]
        song: PathBuf,
    },
}

fn log_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("beatshift=debug".parse()?)
        .add_directive("beatshift_services=debug".parse()?))
}

fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter()?)
        .init();
    Ok(())
}

fn run_shift(
    prefs: FilePreferences,
    song_path: PathBuf,
    beats: &str,
    strategy: Option<&str>,
    out: Option<PathBuf>,
) -> Result<()> {
    let offset: BeatOffset = beats.parse()?;
    let song = Song::load(&song_path)
        .with_context(|| format!("Failed to load song {}", song_path.display()))?;

    let mut doc = SongDocument::with_preferences(song, Box::new(prefs));
    let strategy = match strategy {
        Some(s) => s.parse::<ShiftStrategy>()?,
        None => doc.preferred_strategy(),
    };
    tracing::debug!("Shifting {} by {} using {}", song_path.display(), offset, strategy);

    let report = doc.move_notes_sideways(offset, strategy)?;
    let out = out.unwrap_or(song_path);
    doc.song()
        .save(&out)
        .with_context(|| format!("Failed to write song {}", out.display()))?;

    println!("{}", summary::report_line(&report));
    println!("Wrote {}", out.display());
    Ok(())
}

fn run_show(song_path: PathBuf) -> Result<()> {
    let song = Song::load(&song_path)
        .with_context(|| format!("Failed to load song {}", song_path.display()))?;
    print!("{}", summary::describe_song(&song));
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let prefs = match cli.prefs {
        Some(path) => FilePreferences::open(path),
        None => FilePreferences::open_default(),
    };
    tracing::debug!("Using preferences at {}", prefs.path().display());

    match cli.command {
        Command::Shift { song, beats, strategy, out } => {
            run_shift(prefs, song, &beats, strategy.as_deref(), out)
        }
        Command::Show { song } => run_show(song),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_enables_debug_for_workspace_crates() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("beatshift=debug"));
        assert!(filter.contains("beatshift_services=debug"));
    }
}
