//! Offline ranking: `topsis <input.csv> <weights> <impacts> <output.csv>`.
//!
//! Example: `topsis data.csv "1,1,1,2" "+,+,-,+" result.csv`

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use topsis_mailer::{evaluate, init_tracing, DecisionTable};

const USAGE: &str = "usage: topsis <input.csv> <weights> <impacts> <output.csv>";

fn run(args: &[String]) -> Result<()> {
    let [input, weights, impacts, output] = args else {
        anyhow::bail!("{USAGE}");
    };

    let file = fs::File::open(input).with_context(|| format!("opening {input}"))?;
    let table = DecisionTable::from_csv_reader(file)?;
    let ranked = evaluate(&table, weights, impacts)?;

    let out = fs::File::create(output).with_context(|| format!("creating {output}"))?;
    ranked
        .write_csv(out)
        .with_context(|| format!("writing {output}"))?;

    tracing::info!(alternatives = ranked.len(), output = %output, "ranking written");
    if let Some(best) = ranked.by_rank().first() {
        println!(
            "{} ranked first (score {:.2}); results written to {output}",
            best.alternative(),
            best.rounded_score()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing("warn");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
