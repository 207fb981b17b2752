use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::KeyEventKind;

use tasktop::app::App;
use tasktop::MonitorError;
use tasktop::config::{Config, default_log_path, load_config, load_config_from_path};
use tasktop::event::{Event, EventHandler};
use tasktop::logging::{LogTarget, init_tracing};
use tasktop::system::channel::{SnapshotReceiver, snapshot_channel};
use tasktop::system::sampler::{SamplingLoop, validate_sample_window};
use tasktop::system::sysinfo_provider::{SysinfoProvider, cpu_measurement_window};
use tasktop::ui;
use tasktop::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "tasktop", about = "Terminal task manager with live metric history")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling window in seconds; also the refresh cadence. Windows below
    /// the CPU measurement floor (about 200 ms on most platforms) are
    /// stretched to it.
    #[arg(long)]
    sample_window: Option<f64>,

    /// Number of points kept per chart
    #[arg(long)]
    history_capacity: Option<usize>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Log file (interactive mode logs here instead of the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one JSON snapshot per line instead of starting the UI.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Stop after this many snapshots (headless mode only).
    #[arg(long)]
    cycles: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_fallback) = load_config_for_cli(&cli)?;
    config.validate()?;

    let target = if cli.headless {
        LogTarget::Stderr
    } else {
        let path = config
            .logging
            .file
            .clone()
            .or_else(default_log_path)
            .ok_or_else(|| eyre!("no log file configured and no cache directory found"))?;
        LogTarget::File(path)
    };
    init_tracing(&config.logging.level, config.logging.json, target)?;

    if let Some(err) = config_fallback {
        tracing::warn!(error = %err, "using default config");
    }
    let requested = validate_sample_window(config.sampling.sample_window_secs)?;
    let measured = cpu_measurement_window(requested);
    if measured > requested {
        tracing::warn!(
            requested_ms = requested.as_millis() as u64,
            measured_ms = measured.as_millis() as u64,
            "sample window is below the CPU measurement floor; cycles will take longer"
        );
    }

    let (publisher, receiver) = snapshot_channel();
    let sampler = SamplingLoop::new(
        SysinfoProvider::new(),
        config.sampling.sample_window_secs,
        config.sampling.fields(),
        publisher,
    )?
    .spawn()?;

    let result = if cli.headless {
        run_headless(receiver, cli.cycles).await
    } else {
        run_tui(receiver, &config).await
    };

    sampler.shutdown();
    result
}

async fn run_tui(receiver: SnapshotReceiver, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, receiver, config).await;
    ratatui::restore();
    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    receiver: SnapshotReceiver,
    config: &Config,
) -> Result<()> {
    let mut events = EventHandler::new(receiver.clone());
    let mut app = App::new(
        receiver,
        config.history.capacity,
        Theme::from_config(&config.ui.theme),
    )?;

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = app.map_key(key);
                app.dispatch(action);
                true
            }
            Event::Key(_) => false,
            Event::Metrics => app.refresh_data(),
            Event::MetricsClosed => {
                app.on_metrics_closed();
                true
            }
            Event::Resize => true,
        };
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

async fn run_headless(mut receiver: SnapshotReceiver, cycles: Option<u64>) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let mut printed = 0u64;

    while cycles.is_none_or(|limit| printed < limit) {
        if !receiver.changed().await {
            return Err(eyre!("sampler stopped unexpectedly"));
        }
        if let Some(snapshot) = receiver.take_latest() {
            serde_json::to_writer(&mut stdout, snapshot.as_ref())?;
            writeln!(stdout)?;
            stdout.flush()?;
            printed += 1;
        }
    }

    if receiver.skipped_cycles() > 0 {
        tracing::info!(skipped = receiver.skipped_cycles(), "headless run skipped cycles");
    }
    Ok(())
}

/// An explicit `--config` must load. The default location falls back to
/// defaults and hands back the reason for logging.
fn load_config_for_cli(cli: &Cli) -> Result<(Config, Option<MonitorError>)> {
    let (mut config, fallback) = match &cli.config {
        Some(path) => (load_config_from_path(path)?, None),
        None => load_config(),
    };

    if let Some(window) = cli.sample_window {
        config.sampling.sample_window_secs = window;
    }
    if let Some(capacity) = cli.history_capacity {
        config.history.capacity = capacity;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    Ok((config, fallback))
}
