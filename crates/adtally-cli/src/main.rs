mod collect;
mod prompt;
mod report;

use std::path::PathBuf;

use adtally_core::{parse_day_count, parse_target_date, InputError, RunRequest};
use adtally_scraper::{CategoryScanner, ListingClient};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adtally")]
#[command(about = "Count classified listings per category and label, one report per day")]
struct Cli {
    /// Count a single calendar date (YYYY-MM-DD, at most 60 days ago)
    #[arg(long, conflicts_with = "days")]
    date: Option<String>,

    /// Count today and the N days before it (0-59)
    #[arg(long)]
    days: Option<String>,

    /// Directory for the per-day reports (overrides ADTALLY_REPORT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    /// The run requested by flags, or `None` when the user should be prompted.
    fn run_request(&self, today: NaiveDate) -> Result<Option<RunRequest>, InputError> {
        if let Some(raw) = &self.date {
            return parse_target_date(raw, today).map(|d| Some(RunRequest::Date(d)));
        }
        if let Some(raw) = &self.days {
            return parse_day_count(raw).map(|n| Some(RunRequest::Days(n)));
        }
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = adtally_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let now = Local::now().naive_local();
    let today = now.date();

    let request = match cli.run_request(today)? {
        Some(request) => request,
        None => {
            let stdin = std::io::stdin();
            prompt::prompt_run_request(&mut stdin.lock(), &mut std::io::stdout(), today)?
        }
    };

    let categories = adtally_core::load_categories(&config.categories_path)?;
    let scanners = categories
        .categories
        .into_iter()
        .map(CategoryScanner::new)
        .collect::<Result<Vec<_>, _>>()?;
    let client = ListingClient::from_app_config(&config)?;

    let report_dir = cli.output_dir.unwrap_or_else(|| config.report_dir.clone());
    std::fs::create_dir_all(&report_dir)
        .with_context(|| format!("creating report directory {}", report_dir.display()))?;

    let target_dates = request.target_dates(today);
    tracing::info!(
        days = target_dates.len(),
        categories = scanners.len(),
        "counting run started"
    );

    let totals = collect::run_days(&client, &scanners, &target_dates, now, |day| {
        let path = report::write_day_report(&report_dir, day)?;
        println!("{}: wrote {}", day.date, path.display());
        Ok(())
    })
    .await?;

    println!(
        "done: {} report(s), {} listing(s) counted, {} page(s) fetched",
        totals.days, totals.listings_counted, totals.pages_fetched
    );
    Ok(())
}
