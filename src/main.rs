use botparams::cli::Cli;
use botparams::config::Config;
use botparams::error::{BotParamsError, Result};
use botparams::{pipeline, report, selection};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Err(BotParamsError::InvalidSelection { input }) => {
            tracing::debug!("Rejected crawler selection: {:?}", input);
            println!("{}", selection::INVALID_SELECTION_MESSAGE);
            std::process::exit(1);
        }
        other => other,
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose {
        "botparams=debug"
    } else {
        "botparams=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration and compile the catalog before touching the log
    let config = Config::resolve(cli.config.as_deref())?;
    let catalog = config.catalog()?;
    tracing::debug!("Loaded {} crawler patterns", catalog.len());

    // Let the user pick a crawler
    let crawler = match cli.crawler.as_deref() {
        Some(value) => selection::from_argument(&catalog, value)?,
        None => {
            let stdin = std::io::stdin();
            selection::prompt(&catalog, stdin.lock(), std::io::stdout())?
        }
    };

    tracing::info!(
        "Bot user-agent picked. Analyzing log file with bot regex pattern: {}",
        crawler.pattern
    );

    let matcher = crawler.matcher.clone();
    let analysis = pipeline::analyze_log(
        &cli.access_log,
        matcher,
        config.extraction.progress_interval,
    )?;

    tracing::info!(
        "Matched {} of {} lines, {} distinct parameters ({} ms)",
        analysis.stats.urls_matched,
        analysis.stats.lines_read,
        analysis.rows.len(),
        analysis.elapsed_ms
    );

    // Export the full table, then show the head of it
    let output = cli.output.unwrap_or(config.output.path);
    report::write_csv(&analysis.rows, &output)?;
    tracing::info!("Summary written to {}", output.display());

    let top = cli.top.unwrap_or(config.output.console_rows);
    println!("{}", report::console_table(&analysis.rows, top));

    Ok(())
}
