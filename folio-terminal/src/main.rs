/// Folio Terminal Preview
///
/// Runs the page's background animations as ASCII art.
/// Controls:
///   - Mouse: Tilt the backdrop sphere
///   - Tab/Space: Switch between backdrop and node graph
///   - Q/ESC: Quit
use clap::Parser;
use folio_core::FolioConfig;
use folio_terminal::{TerminalApp, View};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio-terminal", about = "Preview the portfolio animations in a terminal")]
struct Args {
    /// Animation to start with
    #[arg(long, value_enum, default_value_t = View::Network)]
    view: View,

    /// Seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// JSON file overriding animation constants
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> io::Result<FolioConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            FolioConfig::from_json(&json)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
        None => Ok(FolioConfig::default()),
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    log::info!("starting {:?} view at {} fps", args.view, args.fps);

    let mut app = TerminalApp::new(args.view, config, args.seed, args.fps)?;
    app.run()?;

    println!("Bye!");
    Ok(())
}
