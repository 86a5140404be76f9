use std::path::PathBuf;

use clap::Parser;
use solar_power_estimator::config::{EstimatorConfig, load_config};
use solar_power_estimator::elements::StateVector;
use solar_power_estimator::export::{power_csv, summary};
use solar_power_estimator::importer;
use solar_power_estimator::oracle::{CrossSectionOracle, PanelArrayOracle, RecordedOracle};
use solar_power_estimator::pipeline::{TimeStep, estimate_power_series};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Estimate per-timestep solar panel power from state and attitude CSVs"
)]
struct Cli {
    /// Estimator configuration (YAML or TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// State-vector CSV with co-tabulated Sun positions
    #[arg(long)]
    states: PathBuf,

    /// Attitude quaternion CSV (STK export format, scalar-last)
    #[arg(long)]
    attitude: PathBuf,

    /// Optional measured cross-section CSV; replayed instead of the analytic panel oracle
    #[arg(long)]
    areas: Option<PathBuf>,

    /// Output power-series CSV (use `-` for stdout)
    #[arg(long, default_value = "artifacts/power.csv")]
    output: PathBuf,

    /// Optional JSON run-summary sidecar
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EstimatorConfig::default(),
    };

    let states = importer::read_state_series(&cli.states)?;
    let attitudes = importer::read_attitude_series(&cli.attitude)?;
    if states.len() != attitudes.len() {
        anyhow::bail!(
            "state series has {} rows but attitude series has {}",
            states.len(),
            attitudes.len()
        );
    }

    let steps: Vec<TimeStep> = states
        .iter()
        .zip(&attitudes)
        .map(|(state, attitude)| TimeStep {
            state: StateVector {
                position_km: state.position_km,
                velocity_km_s: state.velocity_km_s,
                epoch_jd: state.epoch_jd,
            },
            q_eci2body: attitude.q_eci2body,
            sun_position_km: state.sun_position_km,
        })
        .collect();

    let mut oracle: Box<dyn CrossSectionOracle> = match &cli.areas {
        Some(path) => {
            let areas_m2 = importer::read_scalar_series(path, "Effective Area (m^2)")?;
            if areas_m2.len() != states.len() {
                anyhow::bail!(
                    "area series has {} rows but state series has {}",
                    areas_m2.len(),
                    states.len()
                );
            }
            let fractions = areas_m2
                .into_iter()
                .map(|a| a / config.reference_area_m2)
                .collect();
            Box::new(RecordedOracle::new(
                path.display().to_string(),
                fractions,
            ))
        }
        None => Box::new(PanelArrayOracle::single_panel()),
    };

    let series = estimate_power_series(&config, &steps, oracle.as_mut())?;

    let mut writer = power_csv::writer_for_path(&cli.output)?;
    power_csv::write_header(writer.as_mut())?;
    for sample in &series {
        power_csv::Record {
            epoch_jd: sample.epoch_jd,
            illuminated_fraction: sample.illuminated_fraction,
            watts: sample.watts,
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;

    let watts: Vec<f64> = series.iter().map(|s| s.watts).collect();
    let run = summary::RunSummary::from_watts(&watts);
    if let Some(path) = &cli.summary {
        summary::write_summary(path, &run)?;
    }

    println!("=== Power Estimation ===");
    println!("Samples        : {}", run.sample_count);
    println!(
        "Sunlit samples : {} ({:.1}%)",
        run.sunlit_count,
        if run.sample_count == 0 {
            0.0
        } else {
            100.0 * run.sunlit_count as f64 / run.sample_count as f64
        }
    );
    println!("Peak power     : {:.3} W", run.peak_watts);
    println!("Mean power     : {:.3} W", run.mean_watts);

    Ok(())
}
