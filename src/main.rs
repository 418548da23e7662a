use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use termfolio::app::runtime::run_event_loop;
use termfolio::app::App;
use termfolio::config::Config;
use termfolio::config_io::{self, DirectoryContext};
use termfolio::services::links::{ResumeDownload, SystemLinkOpener};
use termfolio::services::terminal_modes::{self, TerminalModes};
use termfolio::services::time_source::RealTimeSource;
use termfolio::services::{log_dirs, tracing_setup};

/// A personal portfolio rendered as a terminal window
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "A personal portfolio rendered as a terminal window", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to a portfolio content file (JSON), replacing the built-in content
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Theme name or path to a theme file
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Leave the mouse to the terminal (no click or wheel handling)
    #[arg(long)]
    no_mouse: bool,

    /// Path to log file (default: per-process file in the state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Load the config file and apply command-line overrides.
fn effective_config(args: &Args, dir_context: &DirectoryContext) -> AnyhowResult<Config> {
    let mut config = config_io::load_config(dir_context, args.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(content) = &args.content {
        config.content = Some(content.clone());
    }
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if args.no_mouse {
        config.navigation.mouse = false;
    }
    Ok(config)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    let dir_context = DirectoryContext::from_system();

    // Handle --dump-config early (no terminal setup needed)
    if args.dump_config {
        let config = effective_config(&args, &dir_context)?;
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(log_dirs::main_log_path);
    tracing_setup::init_global(&log_file);

    // Clean up stale log files from dead processes on startup
    log_dirs::cleanup_stale_logs();

    tracing::info!("termfolio starting");

    let config = effective_config(&args, &dir_context)?;
    let portfolio = config_io::load_content(&config).context("Failed to load content")?;
    let resume = ResumeDownload::new(
        config_io::resume_source(&config, &dir_context),
        dir_context.download_dir.clone(),
        config.resume.file_name.clone(),
    );

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut terminal_modes = TerminalModes::enable(config.navigation.mouse)
        .context("Failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut app = App::new(
        config,
        portfolio,
        resume,
        RealTimeSource::shared(),
        Box::new(SystemLinkOpener),
    );
    let result = run_event_loop(&mut app, &mut terminal, |timeout| {
        if event_poll(timeout)? {
            Ok(Some(event_read()?))
        } else {
            Ok(None)
        }
    });

    terminal_modes.undo();
    if let Err(e) = &result {
        tracing::error!("termfolio exited with error: {:#}", e);
    }
    tracing::info!("termfolio exiting");
    result
}
