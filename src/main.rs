use clap::Parser;
use get_grip::app;
use get_grip::config::{self, Config};
use get_grip::devices::SimulatedSelector;
use get_grip::input::spawn_console_reader;
use get_grip::present::{JsonPresenter, Presenter, TerminalPresenter};
use log::{error, info};
use std::sync::Arc;
use tokio::signal;

#[derive(Parser)]
#[command(name = "get-grip")]
#[command(about = "Grip-strength party game for hand dynamometers")]
#[command(after_help = "Commands: connect (c), start/end (s), quit (q)")]
struct Cli {
    /// Round length in milliseconds
    #[arg(long)]
    round_ms: Option<u64>,

    /// Number of simulated dynamometers in range
    #[arg(long)]
    devices: Option<usize>,

    /// Simulated sensor sample interval in milliseconds
    #[arg(long)]
    sample_ms: Option<u64>,

    /// Minimum time between rendered frames in milliseconds
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Emit frames as JSON lines instead of drawing the terminal view
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.round_ms {
            config.round.duration_ms = ms;
        }
        if let Some(count) = self.devices {
            config.simulation.device_count = count;
        }
        if let Some(ms) = self.sample_ms {
            config.simulation.sample_interval_ms = ms;
        }
        if let Some(ms) = self.frame_ms {
            config.display.frame_interval_ms = ms;
        }
        if self.json {
            config.display.json = true;
        }
    }
}

fn init_logger() {
    // Frames go to stdout; keep the log on stderr quiet by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();
}

#[tokio::main]
async fn main() {
    config::load_dotenv();
    init_logger();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    info!("Starting Get a Grip");
    info!("  Round length: {:?}", config.round.duration());
    info!("  Simulated devices: {}", config.simulation.device_count);

    let selector = Arc::new(SimulatedSelector::new(config.simulation.clone()));
    let mut presenter: Box<dyn Presenter> = if config.display.json {
        Box::new(JsonPresenter::new(std::io::stdout()))
    } else {
        Box::new(TerminalPresenter::new(std::io::stdout()))
    };

    let (events_tx, events_rx) = app::event_channel();
    let console = spawn_console_reader(tokio::io::stdin(), events_tx.clone());

    app::spawn_quit_on(signal::ctrl_c(), events_tx.clone());

    if let Err(e) = app::run(&config, selector, presenter.as_mut(), events_tx, events_rx).await {
        error!("Game session failed: {}", e);
    }

    console.abort();
    info!("Get a Grip stopped");
    // A blocking stdin read would otherwise hold the runtime open.
    std::process::exit(0);
}
