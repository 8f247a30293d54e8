use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "paywave")]
#[command(version)]
#[command(about = "A TUI client for the PayWave consumer payments demo")]
pub struct Args {
    /// Tick rate in ticks per second (drives the header clock)
    #[arg(short, long, default_value_t = 1.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Data backend to use (mock, remote)
    #[arg(short, long, default_value = "mock")]
    pub backend: String,

    /// Custom record API URL (overrides the remote default)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
