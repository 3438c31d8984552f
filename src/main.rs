use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discografy::{cli, config, error, types::PkceToken, warning};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Print the deduplicated track list of an artist
    Tracks(TracksOptions),

    /// Create a playlist with every track of an artist
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Spotify artist id, uri or URL
    artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Spotify artist id, uri or URL
    artist: String,

    /// Playlist name (defaults to "<artist> - Complete Discography")
    #[clap(long)]
    name: Option<String>,

    /// Make the playlist public
    #[clap(long)]
    public: bool,

    /// Do not follow the artist afterwards
    #[clap(long)]
    no_follow: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(cfg, Arc::clone(&oauth_result)).await;
        }
        Command::Tracks(opt) => cli::tracks(cfg, opt.artist).await,
        Command::Playlist(opt) => {
            cli::playlist(cfg, opt.artist, opt.name, opt.public, !opt.no_follow).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
