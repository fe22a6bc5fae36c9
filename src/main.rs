//! CLI entry point for the suicide statistics pipeline.
//!
//! Checks credentials, loads the dataset once, then filters and aggregates it
//! into the tables a dashboard renders, written as JSON or CSV.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;
use suicide_stats::analyzers::report::{DashboardReport, filter_options};
use suicide_stats::analyzers::views::{EconomicView, top_countries};
use suicide_stats::analyzers::{
    CountrySelection, FilterSpec, GroupKey, IncomeScheme, aggregate_with, filter, top_n_by_rate,
};
use suicide_stats::auth::{AuthState, CredentialTable, Credentials};
use suicide_stats::dataset::Dataset;
use suicide_stats::observation::{AgeGroup, Sex};
use suicide_stats::output::{print_pretty, write_buckets_csv, write_json};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "suicide_stats")]
#[command(about = "Filter and aggregate global suicide statistics", long_about = None)]
struct Cli {
    /// CSV dataset to load
    #[arg(long, env = "SUICIDE_DATA", default_value = "Suicide_dashboard.csv", global = true)]
    data: String,

    /// JSON file mapping usernames to passwords
    #[arg(long, env = "DASHBOARD_CREDENTIALS", default_value = "credentials.json", global = true)]
    credentials: String,

    #[arg(short, long, env = "DASHBOARD_USERNAME", default_value = "", global = true, hide_env_values = true)]
    username: String,

    #[arg(long, env = "DASHBOARD_PASSWORD", default_value = "", global = true, hide_env_values = true)]
    password: String,

    /// GDP-per-capita band boundaries to classify income levels with
    #[arg(long, value_enum, default_value_t = SchemeArg::Dashboard, global = true)]
    income_scheme: SchemeArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries, years, sexes, age groups and generations available
    Options,
    /// Build every dashboard table for a filter selection
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        /// Which economic-factor chart to compute
        #[arg(long, value_enum, default_value_t = ViewArg::TimeTrends)]
        view: ViewArg,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Group filtered rows and compute rates per 100k
    Aggregate {
        #[command(flatten)]
        filter: FilterArgs,

        /// Comma-separated grouping keys (country, year, sex, age_group, generation, income_level)
        #[arg(short, long, value_delimiter = ',', required = true)]
        by: Vec<GroupKey>,

        /// Keep only the N highest-rate buckets
        #[arg(long)]
        top: Option<usize>,

        /// Write CSV here instead of JSON to stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Rank countries by rate and classify their risk level
    Top {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short, default_value_t = 10)]
        n: usize,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Country to include (repeatable); omit or pass "All" for every country
    #[arg(short, long = "country", value_name = "NAME")]
    countries: Vec<String>,

    /// First year, inclusive (default: earliest in the dataset)
    #[arg(long)]
    year_min: Option<i32>,

    /// Last year, inclusive (default: latest in the dataset)
    #[arg(long)]
    year_max: Option<i32>,

    /// Sex to include (repeatable); defaults to both
    #[arg(long = "sex", value_name = "SEX")]
    sexes: Vec<Sex>,

    /// Age group to include, e.g. "15-24 years" (repeatable); defaults to all
    #[arg(long = "age", value_name = "AGE_GROUP")]
    ages: Vec<AgeGroup>,
}

impl FilterArgs {
    fn to_spec(&self, dataset: &Dataset) -> Result<FilterSpec> {
        let bounds = dataset.year_bounds();
        let year_min = self
            .year_min
            .or(bounds.map(|(min, _)| min))
            .context("Dataset is empty; pass --year-min explicitly")?;
        let year_max = self
            .year_max
            .or(bounds.map(|(_, max)| max))
            .context("Dataset is empty; pass --year-max explicitly")?;

        let sexes: BTreeSet<Sex> = if self.sexes.is_empty() {
            Sex::ALL.into_iter().collect()
        } else {
            self.sexes.iter().copied().collect()
        };

        let ages: BTreeSet<AgeGroup> = if self.ages.is_empty() {
            AgeGroup::ORDERED
                .into_iter()
                .chain([AgeGroup::Unclassified])
                .collect()
        } else {
            self.ages.iter().copied().collect()
        };

        let countries = CountrySelection::from_names(self.countries.iter().cloned());

        Ok(FilterSpec::new(year_min, year_max, sexes, ages, countries)?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    /// 3000 / 9000 / 25000
    Dashboard,
    /// 1000 / 4000 / 12000
    Legacy,
}

impl From<SchemeArg> for IncomeScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Dashboard => IncomeScheme::Dashboard,
            SchemeArg::Legacy => IncomeScheme::Legacy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    TimeTrends,
    GdpCorrelation,
    CountryOverview,
}

impl From<ViewArg> for EconomicView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::TimeTrends => EconomicView::TimeTrends,
            ViewArg::GdpCorrelation => EconomicView::GdpCorrelation,
            ViewArg::CountryOverview => EconomicView::CountryOverview,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/suicide_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("suicide_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let gate = CredentialTable::load(&cli.credentials)?;
    let credentials = Credentials::new(cli.username.as_str(), cli.password.as_str());
    if !AuthState::evaluate(&gate, &credentials).is_authorized() {
        bail!("Authentication failed. Please verify your credentials.");
    }

    let dataset = Dataset::load(&cli.data)
        .inspect_err(|e| error!(error = %e, "Dataset unavailable, halting"))?;
    let bands = IncomeScheme::from(cli.income_scheme).bands();

    match cli.command {
        Commands::Options => {
            write_json(None, &filter_options(&dataset))?;
        }
        Commands::Report {
            filter,
            view,
            output,
        } => {
            let spec = filter.to_spec(&dataset)?;
            print_pretty(&spec);
            let report = DashboardReport::build(&dataset, &spec, &bands, view.into())?;
            write_json(output.as_deref(), &report)?;
        }
        Commands::Aggregate {
            filter: filter_args,
            by,
            top,
            output,
        } => {
            let spec = filter_args.to_spec(&dataset)?;
            let filtered = filter(dataset.observations(), &spec);
            let mut buckets = aggregate_with(&filtered, &by, &bands)?;
            if let Some(n) = top {
                buckets = top_n_by_rate(&buckets, n);
            }
            info!(matched = filtered.len(), buckets = buckets.len(), "Aggregation complete");

            match output {
                Some(path) => write_buckets_csv(&path, &buckets)?,
                None => write_json(None, &buckets)?,
            }
        }
        Commands::Top { filter: filter_args, n } => {
            let spec = filter_args.to_spec(&dataset)?;
            let filtered = filter(dataset.observations(), &spec);
            write_json(None, &top_countries(&filtered, n)?)?;
        }
    }

    Ok(())
}
