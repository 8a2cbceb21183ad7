use anyhow::{Context, Result};
use bikeshare_stats::analytics::{parse_month, parse_weekday};
use bikeshare_stats::{
    config_error, filter, City, Dataset, DatasetSchema, FilterSpec, JsonFormatter, Prompter,
    StatisticsAggregator, SummaryReport, TextFormatter, TripCsvParser, TripRecord,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(
    name = "bikeshare-stats",
    version,
    about = "Explore US bikeshare trip statistics"
)]
struct Arguments {
    /// City to analyze: chicago, new york or washington. Prompts interactively when omitted
    #[arg(long, value_name = "CITY")]
    city: Option<String>,

    /// Month to filter by (name, 1-12 or "all")
    #[arg(long, value_name = "MONTH")]
    month: Option<String>,

    /// Day of week to filter by (name, 0-6 with Monday = 0, or "all")
    #[arg(long, value_name = "DAY")]
    day: Option<String>,

    /// Directory containing the city CSV files
    #[arg(long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Output format for results
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,

    /// File to write results to; "-" writes to stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    outfile: Option<String>,

    /// Only load the first N trips of the city file
    #[arg(long, value_name = "N")]
    sample_size: Option<usize>,

    /// Page through the filtered raw trips after the report; with JSON output
    /// the trips are included under "trips" instead
    #[arg(long)]
    raw: bool,

    /// Colorize section headings
    #[arg(long)]
    color: bool,

    /// Don't print progress or timing information
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Debug, ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Arguments::parse();
    let selection = validate_arguments(&args)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match selection {
        Some((city, spec)) => {
            let (schema, filtered) = run_query(&args, city, spec)?;
            if args.raw && is_text(&args) {
                prompter.page_raw_rows(&text_formatter(&args), &filtered, &schema)?;
            }
        }
        None => loop {
            let (city, spec) = prompter.ask_filters()?;
            let (schema, filtered) = run_query(&args, city, spec)?;
            if is_text(&args) {
                prompter.page_raw_rows(&text_formatter(&args), &filtered, &schema)?;
            }

            if !prompter.confirm("\nWould you like to restart? Enter yes or no.\n")? {
                break;
            }
        },
    }

    Ok(())
}

/// Check the command line and resolve a non-interactive selection, if any
fn validate_arguments(
    args: &Arguments,
) -> bikeshare_stats::Result<Option<(City, FilterSpec)>> {
    if !args.data_dir.is_dir() {
        return Err(config_error(
            format!("Data directory is not a directory: {}", args.data_dir.display()),
            Some("data_dir"),
        ));
    }

    if args.sample_size == Some(0) {
        return Err(config_error("Sample size must be greater than 0", Some("sample_size")));
    }

    let Some(city) = &args.city else {
        if args.month.is_some() || args.day.is_some() {
            return Err(config_error("--month and --day require --city", Some("city")));
        }
        return Ok(None);
    };

    let city: City = city.parse()?;
    let month = args.month.as_deref().map(parse_month).transpose()?.flatten();
    let weekday = args.day.as_deref().map(parse_weekday).transpose()?.flatten();
    let spec = FilterSpec::new(month, weekday)?;

    Ok(Some((city, spec)))
}

/// Load, filter and summarize one city, then emit the report
fn run_query(
    args: &Arguments,
    city: City,
    spec: FilterSpec,
) -> Result<(DatasetSchema, Vec<TripRecord>)> {
    let start_time = Instant::now();

    let dataset = load_dataset(args, city)?;
    if dataset.schema != city.expected_schema() {
        debug!(
            "{} file schema {:?} differs from the published layout",
            city, dataset.schema
        );
    }

    let filtered = filter(&dataset.records, &spec);
    if filtered.is_empty() {
        warn!("No trips in {} match month={:?} day={:?}", city, spec.month(), spec.weekday());
    }

    let report = StatisticsAggregator::with_filter(spec).aggregate(&filtered, &dataset.schema);
    let trips = args.raw.then_some(filtered.as_slice());
    output_report(&report, trips, args, city, dataset.len())?;

    if !args.quiet {
        eprintln!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());
    }

    Ok((dataset.schema, filtered))
}

fn load_dataset(args: &Arguments, city: City) -> Result<Dataset> {
    let path = city.data_path(&args.data_dir);
    let mut parser = TripCsvParser::new();
    if let Some(sample_size) = args.sample_size {
        parser = parser.with_limit(sample_size);
    }

    let spinner = (!args.quiet).then(|| create_spinner(&format!("Loading {}", path.display())));
    let dataset = parser.parse_file(&path).with_context(|| {
        format!(
            "Failed to load trips for {} from {}",
            city.title(),
            path.display()
        )
    });

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let dataset = dataset?;
    info!("Loaded {} trips for {}", dataset.len(), city);
    Ok(dataset)
}

/// Emit the report; `trips` are embedded only in JSON output
fn output_report(
    report: &SummaryReport,
    trips: Option<&[TripRecord]>,
    args: &Arguments,
    city: City,
    total_records: usize,
) -> Result<()> {
    let output = match args.output_format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new()
                .with_pretty(true)
                .with_metadata(env!("CARGO_PKG_VERSION"), Some(city), total_records);
            match trips {
                Some(trips) => formatter.format_with_trips(report, trips)?,
                None => formatter.format(report)?,
            }
        }
        OutputFormat::Text => {
            let mut text = format!("\n{}\n{}\n", city, "-".repeat(40));
            text.push_str(&text_formatter(args).with_city(city).format_report(report)?);
            text
        }
    };

    match args.outfile.as_deref() {
        Some(outfile) if outfile != "-" => {
            fs::write(outfile, output)?;
            info!("Results written to {}", outfile);
        }
        _ => println!("{}", output),
    }

    Ok(())
}

fn is_text(args: &Arguments) -> bool {
    matches!(args.output_format, OutputFormat::Text)
}

fn text_formatter(args: &Arguments) -> TextFormatter {
    TextFormatter::new().with_color(args.color)
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}");
    if let Ok(style) = style {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
