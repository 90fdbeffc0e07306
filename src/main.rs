//! Bond Calculator CLI
//!
//! Command-line front end for pricing bonds, solving for yield and running
//! CSV batches

use anyhow::{Context, Result};
use bond_calculator::{
    batch::{write_results, BatchConfig, BatchRunner},
    bond::load_requests,
    input::{parse_field, parse_years, InputField},
    valuation::{cashflow_schedule, find_yield, price},
    BondParameters,
};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bondcalc", version, about = "Fixed-coupon bond price and yield calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a bond from its discount rate
    Price {
        #[command(flatten)]
        bond: BondArgs,

        /// Discount rate as a fraction (0.15 = 15%)
        #[arg(long)]
        rate: String,

        /// Also print the per-period cashflow schedule
        #[arg(long)]
        schedule: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Solve for the yield implied by a price
    Yield {
        #[command(flatten)]
        bond: BondArgs,

        /// Observed price
        #[arg(long)]
        price: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every row of a CSV file (Id,Coupon,Years,Face,Rate,Price)
    Batch {
        /// Input CSV path
        input: PathBuf,

        /// Output CSV path (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Evaluate on the current thread only
        #[arg(long)]
        sequential: bool,

        /// Validate rows and report unreachable yields as errors
        #[arg(long)]
        checked: bool,
    },
}

/// Bond terms shared by `price` and `yield`
#[derive(Args)]
struct BondArgs {
    /// Coupon rate as a fraction (0.10 = 10%)
    #[arg(long)]
    coupon: String,

    /// Term in whole years
    #[arg(long)]
    years: String,

    /// Face value
    #[arg(long)]
    face: String,
}

impl BondArgs {
    fn to_params(&self) -> Result<BondParameters> {
        let params = BondParameters::new(
            parse_field(InputField::Coupon, &self.coupon)?,
            parse_years(&self.years)?,
            parse_field(InputField::Face, &self.face)?,
        );
        params.validate()?;
        Ok(params)
    }
}

fn run_price(bond: &BondArgs, rate: &str, schedule: bool, json_output: bool) -> Result<()> {
    let params = bond.to_params()?;
    let rate = parse_field(InputField::Rate, rate)?;
    let value = price(params.coupon_rate, params.years, params.face_value, rate);

    let rows = schedule.then(|| {
        cashflow_schedule(params.coupon_rate, params.years, params.face_value, rate)
    });

    if json_output {
        let body = json!({
            "params": params,
            "discount_rate": rate,
            "price": value,
            "schedule": rows,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Price: {:.7}", value);

    if let Some(rows) = rows {
        println!();
        println!("{:>6} {:>14} {:>14} {:>12} {:>14}", "Period", "Coupon", "Principal", "DF", "PV");
        println!("{}", "-".repeat(64));
        for row in &rows {
            println!(
                "{:>6} {:>14.2} {:>14.2} {:>12.8} {:>14.7}",
                row.period, row.coupon, row.principal, row.discount_factor, row.present_value
            );
        }
    }

    Ok(())
}

fn run_yield(bond: &BondArgs, target: &str, json_output: bool) -> Result<()> {
    let params = bond.to_params()?;
    let target = parse_field(InputField::Price, target)?;
    let value = find_yield(params.coupon_rate, params.years, params.face_value, target);

    if json_output {
        let body = json!({
            "params": params,
            "price": target,
            "yield": value,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("Yield: {:.7}", value);
    }

    Ok(())
}

fn run_batch(input: &Path, output: Option<&PathBuf>, sequential: bool, checked: bool) -> Result<()> {
    let requests = load_requests(input)
        .with_context(|| format!("Failed to load requests from {}", input.display()))?;

    let runner = BatchRunner::new(BatchConfig {
        parallel: !sequential,
        checked,
    });
    let outcomes = runner.run(&requests);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            write_results(BufWriter::new(file), &outcomes)?;
            eprintln!("Results for {} requests written to {}", outcomes.len(), path.display());
        }
        None => write_results(io::stdout().lock(), &outcomes)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Price {
            bond,
            rate,
            schedule,
            json,
        } => run_price(bond, rate, *schedule, *json),
        Commands::Yield { bond, price, json } => run_yield(bond, price, *json),
        Commands::Batch {
            input,
            output,
            sequential,
            checked,
        } => run_batch(input, output.as_ref(), *sequential, *checked),
    }
}
