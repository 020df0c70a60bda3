use clap::Parser;
use tomata_core::Style;

mod alerts;
mod app;
mod prompt;
mod screen;

#[derive(Parser)]
#[command(
    name = "tomata",
    version,
    about = "Terminal Pomodoro timer with a big glyph countdown and tagged session history"
)]
pub struct Cli {
    /// Preset the session tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Glyph style for the countdown display (electronic, colossal, shadow)
    #[arg(short, long, value_parser = parse_style)]
    pub style: Option<Style>,

    /// Work segment length in minutes (overrides the config file)
    #[arg(short, long)]
    pub work: Option<f64>,

    /// Print the ranked tag summary and exit
    #[arg(long)]
    pub stats: bool,

    /// Emit --stats output as JSON
    #[arg(long, requires = "stats")]
    pub json: bool,

    /// Delete all tag history (after confirmation) and exit
    #[arg(long, conflicts_with_all = ["stats", "tag"])]
    pub clear: bool,
}

fn parse_style(s: &str) -> Result<Style, String> {
    s.parse::<Style>().map_err(|err| err.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = app::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
