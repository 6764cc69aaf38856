// algostep: step-through algorithm visualizer with time-travel playback

use std::io;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use algostep::algorithms::{InputKind, Registry};
use algostep::config::{CliOptions, Config, USAGE};
use algostep::input::{InputGenerator, TraceInput};
use algostep::materialize::Materializer;
use algostep::ui::App;

fn main() -> ExitCode {
    let options = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so they never mix with --json output
    let filter = EnvFilter::try_from_env("ALGOSTEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if options.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let registry = Registry::builtin();

    if options.list {
        for info in registry.iter() {
            println!(
                "{:<14} {:<10} {:<22} avg {}",
                info.id,
                info.category.name(),
                info.name,
                info.complexity.average
            );
        }
        return Ok(());
    }

    let mut inputs = match options.seed {
        Some(seed) => InputGenerator::seeded(seed, config.input),
        None => InputGenerator::new(config.input),
    };

    if options.json {
        let size = options.size.unwrap_or(config.input.default_size);
        let values = inputs.array(size, options.shape)?;
        let kind = registry
            .get(&options.algorithm)
            .map(|info| info.input_kind())
            .unwrap_or(InputKind::Array);
        let input = TraceInput::prepare(kind, &values, options.target, options.start)?;
        let trace = Materializer::new(registry, &config).materialize(&options.algorithm, &input)?;
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    let mut app = App::new(registry, &config, inputs, &options)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
