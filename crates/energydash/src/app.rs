//! Application entry point and dispatch.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use energydash_cli::{CLIReportPresenter, JsonReportPresenter, ReportPresenter};
use energydash_core::constants::MAX_FREEFORM_GROUPS;
use energydash_core::dataset::Dataset;
use energydash_core::handlers::{calculate_anova, calculate_generalized_anova, update_graph};
use energydash_tui::{TuiApp, TuiLogWriter, TuiMessage};
use energydash_web::AppState;

use crate::config::{AppConfig, Command};
use crate::errors::AppError;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        energydash_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(());
    }

    match config.selected_command() {
        Command::Tui => run_tui(config),
        Command::Serve => {
            init_tracing();
            run_serve(config)
        }
        Command::Report => {
            init_tracing();
            run_report(config)
        }
        Command::Anova { groups } => {
            init_tracing();
            run_anova(config, &groups)
        }
    }
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();
}

fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    Dataset::load(&config.data)
        .with_context(|| format!("failed to load dataset from {}", config.data.display()))
}

fn presenter(config: &AppConfig) -> Box<dyn ReportPresenter> {
    if config.json {
        Box::new(JsonReportPresenter)
    } else {
        Box::new(CLIReportPresenter::new(config.quiet))
    }
}

fn run_report(config: &AppConfig) -> Result<()> {
    let dataset = load_dataset(config)?;

    let sizes: Vec<&str> = match config.input_size.as_deref() {
        Some(size) if !dataset.has_input_size(size) => {
            return Err(AppError::UnknownInputSize(size.to_string()).into());
        }
        Some(size) => vec![size],
        None => dataset.input_sizes(),
    };

    let presenter = presenter(config);
    let mut out = io::stdout().lock();
    presenter.present_dataset(&mut out, &dataset)?;
    for size in sizes {
        presenter.present_graph(&mut out, size, &update_graph(&dataset, size))?;
        presenter.present_anova(
            &mut out,
            &format!("ANOVA Calculator: {size}"),
            &calculate_anova(&dataset, size),
        )?;
    }
    out.flush()?;
    Ok(())
}

fn run_anova(config: &AppConfig, groups: &[String]) -> Result<()> {
    if groups.len() > MAX_FREEFORM_GROUPS {
        return Err(AppError::TooManyGroups {
            max: MAX_FREEFORM_GROUPS,
            given: groups.len(),
        }
        .into());
    }

    let fields: Vec<Option<&str>> = groups.iter().map(|g| Some(g.as_str())).collect();
    let update = calculate_generalized_anova(1, &fields);
    if update.table.is_empty() {
        anyhow::bail!("{}", update.conclusion);
    }

    let mut out = io::stdout().lock();
    presenter(config).present_anova(&mut out, "Generalized ANOVA Calculator", &update)?;
    out.flush()?;
    Ok(())
}

fn run_serve(config: &AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let dataset = load_dataset(config)?;
    let state = AppState::new(Arc::new(dataset), config.preferred_input_size());

    if !config.quiet {
        println!(
            "{}",
            energydash_cli::ui::highlight(&format!("Dashboard running at http://{addr}/"))
        );
        println!("Press Ctrl+C to stop");
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(energydash_web::serve(state, addr))?;
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    // Create crossbeam channel for TUI messages
    let (tx, rx) = crossbeam_channel::unbounded::<TuiMessage>();

    // Log lines go to the log panel while the TUI owns the terminal
    tracing_subscriber::fmt()
        .with_writer(TuiLogWriter::new(tx))
        .with_ansi(false)
        .without_time()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let dataset = load_dataset(config)?;
    let mut app = TuiApp::new(Arc::new(dataset), config.preferred_input_size(), rx);

    // Run TUI event loop on the main thread
    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    Ok(())
}
