//! Export helpers for CSV and JSON artifacts.

pub mod power_csv {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "epoch_jd,illuminated_fraction,watts";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard power-series CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted per timestep.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub epoch_jd: f64,
        /// Illuminated fraction of the reference area; zero while eclipsed.
        pub illuminated_fraction: f64,
        pub watts: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.8},{:.6},{:.6}",
                self.epoch_jd, self.illuminated_fraction, self.watts,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Aggregate metrics for one estimation run, written as a JSON sidecar.
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub sample_count: usize,
        pub sunlit_count: usize,
        pub peak_watts: f64,
        pub mean_watts: f64,
        /// Running-sum of watts over the series; energy once scaled by the
        /// (constant) timestep length, which this crate does not assume.
        pub cumulative_watts: f64,
    }

    impl RunSummary {
        /// Build a summary from a per-timestep watts series.
        pub fn from_watts(watts: &[f64]) -> Self {
            let sample_count = watts.len();
            let sunlit_count = watts.iter().filter(|w| **w > 0.0).count();
            let peak_watts = watts.iter().copied().fold(0.0_f64, f64::max);
            let cumulative_watts: f64 = watts.iter().sum();
            let mean_watts = if sample_count == 0 {
                0.0
            } else {
                cumulative_watts / sample_count as f64
            };
            Self {
                sample_count,
                sunlit_count,
                peak_watts,
                mean_watts,
                cumulative_watts,
            }
        }
    }

    /// Write the run summary next to the main artifact.
    pub fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, summary)?;
        Ok(())
    }
}
