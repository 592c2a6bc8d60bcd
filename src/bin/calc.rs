//! Command line front end for the calculators
//!
//! ```text
//! calc list
//! calc run sip monthlyInvestment=10000 expectedReturn=12 years=10
//! calc run emi principal=5000000 interestRate=8.5 tenureMonths=240 --csv schedule.csv
//! calc sweep swp --field monthlyWithdrawal --from 5000 --to 20000 --step 1000 \
//!     initialCorpus=1000000 years=20
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use financial_calculators::{Assumptions, CalculatorId, CalculatorRequest, CalculatorResponse};
use rayon::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "calc", version, about = "SIP, EMI, PPF, FD, NPS, SWP and other financial calculators")]
struct Cli {
    /// JSON file overriding statutory assumptions (gratuity cap, PPF limits, NPS rules)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available calculators
    List,

    /// Run one calculation
    Run {
        /// Calculator slug, e.g. sip, emi, goal-planner
        calculator: String,

        /// Inputs as key=value, named as in the page query string
        params: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Also write the yearly breakdown to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Evaluate a calculator across a range of one input
    Sweep {
        calculator: String,

        /// Input to vary
        #[arg(long)]
        field: String,

        #[arg(long)]
        from: f64,

        #[arg(long)]
        to: f64,

        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Fixed inputs as key=value
        params: Vec<String>,

        #[arg(long, default_value = "sweep_output.csv")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_file(path)?,
        None => Assumptions::default(),
    };

    match cli.command {
        Command::List => list(),
        Command::Run { calculator, params, format, csv } => {
            run(&assumptions, &calculator, &params, format, csv)
        }
        Command::Sweep { calculator, field, from, to, step, params, output } => {
            sweep(&assumptions, &calculator, &field, (from, to, step), &params, output)
        }
    }
}

fn list() -> Result<()> {
    for id in CalculatorId::all() {
        let info = id.info();
        println!("{:<22} {:<32} {}", id.slug(), info.title, info.description);
    }
    Ok(())
}

fn run(
    assumptions: &Assumptions,
    calculator: &str,
    params: &[String],
    format: OutputFormat,
    csv: Option<PathBuf>,
) -> Result<()> {
    let pairs = parse_pairs(params)?;
    let request = CalculatorRequest::from_query(calculator, pairs)?;
    let response = request.evaluate(assumptions)?;

    match format {
        OutputFormat::Summary => {
            println!("{}", request.id().info().title);
            for (label, value) in response.summary() {
                println!("  {:<34} {}", label, value);
            }
        }
        OutputFormat::Json => {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &response)?;
            println!();
        }
    }

    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let rows = response.write_breakdown_csv(file)?;
        println!("Breakdown ({} rows) written to {}", rows, path.display());
    }

    Ok(())
}

fn sweep(
    assumptions: &Assumptions,
    calculator: &str,
    field: &str,
    (from, to, step): (f64, f64, f64),
    params: &[String],
    output: PathBuf,
) -> Result<()> {
    if step <= 0.0 || to < from {
        bail!("sweep needs from <= to and a positive step");
    }

    let start = Instant::now();
    let base = parse_pairs(params)?;
    let count = ((to - from) / step).floor() as usize + 1;
    let points: Vec<f64> = (0..count).map(|k| from + k as f64 * step).collect();

    println!("Running {} {} calculations over {}...", points.len(), calculator, field);

    // Each point is independent; failures are kept per point so one bad
    // value doesn't abort the whole sweep.
    let results: Vec<(f64, Result<CalculatorResponse, String>)> = points
        .par_iter()
        .map(|&value| {
            let mut pairs = base.clone();
            pairs.retain(|(k, _)| k != field);
            pairs.push((field.to_string(), number_param(value)));

            let outcome = CalculatorRequest::from_query(calculator, pairs)
                .and_then(|request| request.evaluate(assumptions))
                .map_err(|e| e.to_string());
            (value, outcome)
        })
        .collect();

    let mut header: Option<Vec<String>> = None;
    let mut table = csv::Writer::from_path(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut failures = 0;

    for (value, outcome) in &results {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{}={} skipped: {}", field, value, e);
                failures += 1;
                continue;
            }
        };

        let headline = headline_numbers(response)?;
        if header.is_none() {
            let mut columns = vec![field.to_string()];
            columns.extend(headline.iter().map(|(k, _)| k.clone()));
            table.write_record(&columns)?;
            header = Some(columns);
        }

        let mut record = vec![number_param(*value)];
        record.extend(headline.iter().map(|(_, v)| v.to_string()));
        table.write_record(&record)?;
    }
    table.flush()?;

    println!(
        "{} rows written to {} in {:?} ({} skipped)",
        results.len() - failures,
        output.display(),
        start.elapsed(),
        failures
    );
    Ok(())
}

/// Top-level scalar fields of a response, in key order
fn headline_numbers(response: &CalculatorResponse) -> Result<Vec<(String, Value)>> {
    let Value::Object(map) = serde_json::to_value(response)? else {
        return Err(anyhow!("response is not a JSON object"));
    };

    Ok(map
        .into_iter()
        .filter(|(_, v)| v.is_number() || v.is_boolean())
        .collect())
}

fn parse_pairs(params: &[String]) -> Result<Vec<(String, String)>> {
    params
        .iter()
        .map(|p| {
            p.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| anyhow!("expected key=value, got '{}'", p))
        })
        .collect()
}

/// Whole numbers print without a decimal point so integer inputs still parse
fn number_param(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
