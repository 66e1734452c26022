use clap::Parser;

/// Aurora - stream your music server's playlists from the terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "aurora", version, about)]
pub struct Args {
    /// Music server origin (default: http://localhost:3000)
    #[arg(long, short = 's')]
    pub server: Option<String>,

    /// Initial volume between 0.0 and 1.0
    #[arg(long, short = 'v')]
    pub volume: Option<f32>,

    /// Disable playback notifications
    #[arg(long)]
    pub no_notifications: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
