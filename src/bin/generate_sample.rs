use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const N_POINTS: usize = 200;
const RUN_MINUTES: f64 = 10.0;
const APEX_MINUTES: f64 = 5.2;
const PEAK_SIGMA: f64 = 0.18;

/// (transition name, apex height)
const TRANSITIONS: [(&str, f64); 6] = [
    ("y7", 1.0e6),
    ("y6", 6.4e5),
    ("b5", 3.1e5),
    ("y5", 1.2e5),
    ("y4", 4.5e4),
    ("b3", 9.0e3),
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let step = RUN_MINUTES / (N_POINTS - 1) as f64;
    let times: Vec<f64> = (0..N_POINTS).map(|i| i as f64 * step).collect();

    // Noise scales with each transition's height; intensities never go negative.
    let traces: Vec<Vec<f64>> = TRANSITIONS
        .iter()
        .map(|&(_, height)| {
            times
                .iter()
                .map(|&t| {
                    let signal = gaussian(t, APEX_MINUTES, PEAK_SIGMA, height);
                    (signal + rng.gauss(0.0, 0.01 * height)).max(0.0)
                })
                .collect()
        })
        .collect();

    write_tsv("sample_chromatogram.tsv", &times, &traces)?;
    write_parquet("sample_chromatogram.parquet", &times, &traces)?;

    println!(
        "Wrote {} transitions ({} time points each) to sample_chromatogram.tsv / .parquet",
        TRANSITIONS.len(),
        N_POINTS
    );
    Ok(())
}

fn write_tsv(path: &str, times: &[f64], traces: &[Vec<f64>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating {path}"))?;

    let mut header = vec!["time".to_string()];
    header.extend(TRANSITIONS.iter().map(|(name, _)| name.to_string()));
    writer.write_record(&header)?;

    for (i, t) in times.iter().enumerate() {
        let mut row = vec![format!("{t:.4}")];
        row.extend(traces.iter().map(|trace| format!("{:.2}", trace[i])));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    log::info!("wrote {path}");
    Ok(())
}

fn write_parquet(path: &str, times: &[f64], traces: &[Vec<f64>]) -> Result<()> {
    let mut fields = vec![Field::new("time", DataType::Float64, false)];
    fields.extend(
        TRANSITIONS
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(times.to_vec()))];
    columns.extend(
        traces
            .iter()
            .map(|trace| Arc::new(Float64Array::from(trace.clone())) as ArrayRef),
    );
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    log::info!("wrote {path}");
    Ok(())
}
