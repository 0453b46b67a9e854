mod render;

use chrono::NaiveDateTime;
use clap::Parser;
use csv::ReaderBuilder;
use fib_core::{FibConfig, LabelStyle, LevelSet, RetracementCalculator, Scenarios};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Fibonacci retracement entry/stop/target calculator")]
struct Args {
    /// High price of the swing
    #[clap(long, required_unless_present = "csv", allow_hyphen_values = true)]
    high: Option<String>,

    /// Low price of the swing
    #[clap(long, required_unless_present = "csv", allow_hyphen_values = true)]
    low: Option<String>,

    /// Risk/reward ratio; omit to use the 2-3 entry range
    #[clap(long, allow_hyphen_values = true)]
    rr: Option<String>,

    /// Also compute the 261.8%, 361.8% and 423.6% levels
    #[clap(long)]
    extended: bool,

    /// Label levels as "0.236" instead of "23.6%"
    #[clap(long)]
    decimal_labels: bool,

    /// JSON file holding calculator settings
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// CSV file of swings, header row then columns time,high,low
    #[clap(long)]
    csv: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug)]
struct CsvRecord {
    time: NaiveDateTime,
    high: String,
    low: String,
}

#[derive(Serialize)]
struct SwingOutput<'a> {
    time: String,
    #[serde(flatten)]
    scenarios: &'a Scenarios,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(
        "rr mode {}, {} levels, {} labels",
        config.rr_mode.kind(),
        config.level_set,
        config.label_style
    );
    let mut calc = RetracementCalculator::new(config);

    if let Some(path) = &args.csv {
        return process_csv_file(path, &mut calc, args.rr.as_deref(), args.json);
    }

    let (high, low) = match (&args.high, &args.low) {
        (Some(high), Some(low)) => (high.as_str(), low.as_str()),
        _ => return Err("--high and --low are required without --csv".into()),
    };
    let scenarios = calc.calculate_text(high, low, args.rr.as_deref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(scenarios)?);
    } else {
        print!("{}", render::render_scenarios(scenarios));
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<FibConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)?;
            let conf: HashMap<String, serde_json::Value> = serde_json::from_reader(file)?;
            FibConfig::new(Some(conf))?
        }
        None => FibConfig::default(),
    };
    if args.extended {
        config.level_set = LevelSet::Extended;
    }
    if args.decimal_labels {
        config.label_style = LabelStyle::Decimal;
    }
    Ok(config)
}

fn process_csv_file(
    path: &Path,
    calc: &mut RetracementCalculator,
    rr: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    info!("Processing file: {:?}", path);
    let file = File::open(path)?;
    let (swings, skipped) = process_swings(file, calc, rr)?;

    if json {
        let outputs = swings
            .iter()
            .map(|(time, scenarios)| {
                serde_json::to_value(SwingOutput {
                    time: time.clone(),
                    scenarios,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for (time, scenarios) in &swings {
            println!("# {}", time);
            println!("{}", render::render_scenarios(scenarios));
        }
    }
    info!(
        "Analysis completed for {:?}: {} swings, {} skipped",
        path,
        swings.len(),
        skipped
    );
    Ok(())
}

/// Compute every readable swing; bad rows are logged and counted, not fatal
fn process_swings<R: Read>(
    reader: R,
    calc: &mut RetracementCalculator,
    rr: Option<&str>,
) -> Result<(Vec<(String, Scenarios)>, usize), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut swings = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping malformed row: {}", e);
                skipped += 1;
                continue;
            }
        };
        let csv_record = match parse_csv_record(&record) {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable row {:?}: {}", record, e);
                skipped += 1;
                continue;
            }
        };

        let time = csv_record.time.format("%Y-%m-%d %H:%M:%S").to_string();
        match calc.calculate_text(&csv_record.high, &csv_record.low, rr) {
            Ok(s) => swings.push((time, s.clone())),
            Err(e) if e.is_input_err() => {
                warn!("skipping swing at {}: {}", time, e);
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok((swings, skipped))
}

fn parse_csv_record(record: &csv::StringRecord) -> Result<CsvRecord, Box<dyn Error>> {
    if record.len() < 3 {
        return Err(format!("expected 3 columns, got {}", record.len()).into());
    }
    let time = NaiveDateTime::parse_from_str(record[0].trim(), "%Y-%m-%d %H:%M:%S")?;

    Ok(CsvRecord {
        time,
        high: record[1].to_string(),
        low: record[2].to_string(),
    })
}
