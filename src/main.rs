use clap::Parser;
use lsm_ampcalc::{
    bounds_for, cli::*, compute_level_costs, compute_ratios, estimate_bounds,
    level_cost::ImpliedAmplification, report, BoundResult, LevelCostReport, ModelConfig, Result,
};
use serde::Serialize;
use std::process;

#[derive(Serialize)]
struct FullReport {
    levels: LevelCostReport,
    implied: Option<ImpliedAmplification>,
    implied_bound: Option<BoundResult>,
    bounds: Vec<BoundResult>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };

    let mut output = match &cli.command {
        Commands::Levels(args) => {
            args.apply(&mut config.levels);
            let levels = compute_level_costs(&config.levels)?;
            if cli.json {
                report::to_json(&levels)?
            } else {
                report::render_levels(&levels)
            }
        }

        Commands::Bounds(args) => {
            args.apply(&mut config.throughput);
            let bounds = estimate_bounds(&config.throughput)?;
            if cli.json {
                report::to_json(&bounds)?
            } else {
                report::render_bounds(&bounds)
            }
        }

        Commands::Ratios(args) => {
            let ratios = compute_ratios(&args.sample());
            let bound = match (args.bound, ratios.compression_ratio, ratios.write_amplification) {
                (true, Some(cr), Some(wa)) => Some(bounds_for(&config.throughput, cr, wa)?),
                (true, _, _) => {
                    log::warn!("bound needs both compression and write counters");
                    None
                }
                _ => None,
            };
            if cli.json {
                report::to_json(&(ratios, bound))?
            } else {
                let mut text = report::render_ratios(&ratios);
                if let Some(b) = bound {
                    text.push('\n');
                    text.push_str(&report::render_bounds(&[b]));
                }
                text
            }
        }

        Commands::All { levels, bounds } => {
            levels.apply(&mut config.levels);
            bounds.apply(&mut config.throughput);
            let level_report = compute_level_costs(&config.levels)?;
            let implied = level_report.implied_amplification();
            let implied_bound = match implied {
                Some(i) => Some(bounds_for(
                    &config.throughput,
                    i.compression_ratio,
                    i.write_amplification,
                )?),
                None => None,
            };
            let grid = estimate_bounds(&config.throughput)?;
            let full = FullReport {
                levels: level_report,
                implied,
                implied_bound,
                bounds: grid,
            };
            if cli.json {
                report::to_json(&full)?
            } else {
                let mut text = report::render_levels(&full.levels);
                if let (Some(i), Some(b)) = (full.implied, full.implied_bound) {
                    text.push_str(&format!(
                        "\nimplied CR {:.4}, WA {:.4}\n",
                        i.compression_ratio, i.write_amplification
                    ));
                    text.push_str(&report::render_bounds(&[b]));
                }
                text.push('\n');
                text.push_str(&report::render_bounds(&full.bounds));
                text
            }
        }
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    print!("{}", output);
    if let Some(path) = &cli.output {
        report::save(path, &output)?;
    }

    Ok(())
}
