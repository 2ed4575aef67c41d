use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use physiosim_core::legacy::{self, LegacyRequest};
use physiosim_core::{explain, AppConfig, Integrator, ScenarioId, SimulationResult};

#[derive(Parser)]
#[command(name = "physiosim", about = "Cardiovascular scenario simulator")]
struct Cli {
    /// TOML config file; PHYSIOSIM__* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Command {
    /// Integrate a scenario and print the vitals series
    Simulate {
        #[arg(long, default_value = "baseline")]
        scenario: String,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
        /// Rows printed in table mode
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Print only the narrated summary
    Explain {
        #[arg(long, default_value = "baseline")]
        scenario: String,
    },
    /// List scenarios and their parameters
    Scenarios,
    /// Keyword-driven random series
    Legacy {
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let integrator = Integrator::new(cfg.solver.clone());

    match cli.cmd {
        Command::Simulate { scenario, format, rows } => {
            let report = integrator.report(ScenarioId::from_name(&scenario))?;
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Table => {
                    println!("scenario: {}", report.scenario);
                    print_table(&report.result, rows);
                    println!();
                    println!("{}", report.explanation);
                    println!("digest: {}", hex::encode(report.result.digest()));
                }
            }
        }
        Command::Explain { scenario } => {
            let id = ScenarioId::from_name(&scenario);
            let result = integrator.simulate(id)?;
            println!("{}", explain(id, &result)?);
        }
        Command::Scenarios => {
            println!(
                "{:<14} {:>6} {:>6} {:>10} {:>11} {:>11}",
                "scenario", "k1", "k2", "set_point", "resistance", "blood_loss"
            );
            for id in ScenarioId::ALL {
                let p = id.parameters();
                println!(
                    "{:<14} {:>6} {:>6} {:>10} {:>11} {:>11}",
                    id.as_str(),
                    p.k1,
                    p.k2,
                    p.set_point,
                    p.resistance,
                    p.blood_loss
                );
            }
        }
        Command::Legacy { event, samples, seed } => {
            let series = legacy::generate(&LegacyRequest { event, samples, seed }, &cfg.legacy)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }
    Ok(())
}

fn print_table(result: &SimulationResult, rows: usize) {
    println!("{:>8} {:>10} {:>10} {:>8}", "t", "BP", "HR", "O2");
    for i in table_indices(result.len(), rows) {
        println!(
            "{:>8.2} {:>10.2} {:>10.2} {:>8.2}",
            result.time[i], result.blood_pressure[i], result.heart_rate[i], result.oxygen_saturation[i]
        );
    }
}

/// Evenly spaced sample indices, always ending on the last sample.
fn table_indices(n: usize, rows: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = match rows.clamp(1, n) {
        1 => vec![n - 1],
        r => (0..r).map(|i| i * (n - 1) / (r - 1)).collect(),
    };
    indices.dedup();
    indices
}
