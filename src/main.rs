use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use triview::controller::Controller;
use triview::domain::{self, AppConfig, AppError};
use triview::model::{Model, Status};
use triview::ui;

/// Render one person dataset through three interchangeable table views.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Endpoint serving the person dataset
    #[arg(long, default_value = domain::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// How many records to request
    #[arg(long, default_value_t = domain::DEFAULT_RESULT_COUNT)]
    results: usize,

    /// Quiet period in milliseconds before an edited filter value is applied
    #[arg(long, default_value_t = domain::DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Timeout in milliseconds of one input poll
    #[arg(long, default_value_t = domain::DEFAULT_EVENT_POLL_MS)]
    poll_ms: u64,

    /// Append logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug details instead of the default info level
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let config = AppConfig::default()
        .with_endpoint(cli.endpoint)
        .with_result_count(cli.results)
        .with_debounce(Duration::from_millis(cli.debounce_ms))
        .with_event_poll(Duration::from_millis(cli.poll_ms));

    let mut terminal = ratatui::init();
    let outcome = run(config, &mut terminal);
    ratatui::restore();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig, terminal: &mut DefaultTerminal) -> Result<(), AppError> {
    info!("Starting triview");

    let controller = Controller::new(&config);
    let mut model = Model::new(config);

    while model.status != Status::Quitting {
        // Render the current view
        terminal.draw(|frame| ui::draw(&mut model, frame))?;

        // Handle events and map to a Message. The update runs every pass so
        // the fetch outcome and the debounce deadline are picked up even
        // when no key arrived.
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }

    Ok(())
}

/// Logs go to a file or nowhere; the terminal belongs to the UI.
fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::options().create(true).append(true).open(path)?;
    let default = if cli.verbose {
        "triview=debug"
    } else {
        "triview=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(())
}
