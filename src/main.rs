use anyhow::Context;
use chrono::Local;
use hedgeblotter::config::{Config, OutputFormat};
use hedgeblotter::domain::PriceSnapshot;
use hedgeblotter::error::AppError;
use hedgeblotter::{ingest, report, CsvPriceSource, PriceSource};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let vanilla = ingest::load_vanilla_file(&config.vanilla_csv)
        .map_err(AppError::from)
        .with_context(|| format!("loading vanilla trades from {}", config.vanilla_csv))?;
    let exotic = ingest::load_exotic_file(&config.exotic_csv)
        .map_err(AppError::from)
        .with_context(|| format!("loading exotic trades from {}", config.exotic_csv))?;

    let prices: Option<PriceSnapshot> = match &config.prices_csv {
        None => None,
        Some(path) => {
            let source = CsvPriceSource::new(path);
            let tickers = report::referenced_tickers(&vanilla, &exotic);
            let (from, to) = config
                .history_window(Local::now().date_naive())
                .map_err(AppError::from)?;
            let history = source
                .fetch_history(&tickers, from, to)
                .await
                .map_err(AppError::from)?;
            tracing::info!(tickers = tickers.len(), series = history.len(), "Fetched price history");
            Some(PriceSnapshot::from_series(&history, config.as_of_date))
        }
    };

    let blotter = report::build_report(&vanilla, &exotic, &[], prices.as_ref(), config.as_of_date)
        .map_err(AppError::from)?;

    match config.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&blotter).map_err(AppError::from)?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", report::render_text(&blotter)),
    }

    Ok(())
}
