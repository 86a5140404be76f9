use std::path::PathBuf;

use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use solar_power_estimator::comparator;
use solar_power_estimator::importer;
use solar_power_estimator::pipeline::PowerSample;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plot a computed power series against reference data"
)]
struct Cli {
    /// Computed power CSV (epoch_jd,illuminated_fraction,watts)
    #[arg(long)]
    computed: PathBuf,

    /// Reference CSV with a `Power (W)` column
    #[arg(long)]
    reference: PathBuf,

    #[arg(long, default_value = "artifacts/power.png")]
    output: PathBuf,

    /// Plot running sums instead of instantaneous power
    #[arg(long, default_value_t = false)]
    cumulative: bool,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 900)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut computed = read_power_csv(&cli.computed)?;
    let mut reference = importer::read_scalar_series(&cli.reference, "Power (W)")?;

    // The comparator demands equal lengths; trailing rows of the longer
    // series carry no counterpart to compare against.
    let aligned = computed.len().min(reference.len());
    computed.truncate(aligned);
    reference.truncate(aligned);
    if aligned == 0 {
        anyhow::bail!("no overlapping samples between computed and reference series");
    }

    let comparison = comparator::compare(&computed, &reference)?;
    let (series_a, series_b, ylabel) = if cli.cumulative {
        (
            comparison.cumulative_computed,
            comparison.cumulative_reference,
            "Cumulative power (W·step)",
        )
    } else {
        (comparison.computed_w, comparison.reference_w, "Power (W)")
    };

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let y_max = series_a
        .iter()
        .chain(series_b.iter())
        .copied()
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .caption("Computed vs reference power", ("sans-serif", 24))
        .build_cartesian_2d(0f64..aligned as f64, 0f64..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc("Sample index")
        .y_desc(ylabel)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            series_a.iter().enumerate().map(|(i, w)| (i as f64, *w)),
            &BLUE,
        ))?
        .label("computed")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            series_b.iter().enumerate().map(|(i, w)| (i as f64, *w)),
            &RED,
        ))?
        .label("reference")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    println!("Wrote {}", cli.output.display());

    Ok(())
}

fn read_power_csv(path: &PathBuf) -> anyhow::Result<Vec<PowerSample>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();
    let col = |name: &str| -> anyhow::Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("missing column `{name}` in {}", path.display()))
    };
    let epoch_idx = col("epoch_jd")?;
    let fraction_idx = col("illuminated_fraction")?;
    let watts_idx = col("watts")?;

    let mut samples = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |idx: usize| -> anyhow::Result<f64> {
            row.get(idx)
                .ok_or_else(|| anyhow::anyhow!("short row in {}", path.display()))?
                .parse()
                .map_err(|e| anyhow::anyhow!("bad number in {}: {e}", path.display()))
        };
        samples.push(PowerSample {
            epoch_jd: field(epoch_idx)?,
            illuminated_fraction: field(fraction_idx)?,
            watts: field(watts_idx)?,
        });
    }
    Ok(samples)
}
