use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic employee dataset as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of employees to generate
    #[arg(long, default_value_t = 1470)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory the files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "EmployeeNumber")]
    employee_number: i64,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "MaritalStatus")]
    marital_status: &'static str,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "EnvironmentSatisfaction")]
    environment_satisfaction: i64,
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

    fn pick<T: Copy>(&mut self, weighted: &[(T, f64)]) -> T {
        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(value, weight) in weighted {
            if target < weight {
                return value;
            }
            target -= weight;
        }
        weighted[weighted.len() - 1].0
    }
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Row> {
    let genders = [("Male", 0.6), ("Female", 0.4)];
    let marital = [("Married", 0.46), ("Single", 0.32), ("Divorced", 0.22)];
    let satisfaction = [(1, 0.19), (2, 0.2), (3, 0.31), (4, 0.3)];

    (0..rows)
        .map(|i| {
            // Mostly 18–60, a few past 70 to exercise the unassigned age group.
            let age = rng.gauss(37.0, 9.0).round().clamp(18.0, 72.0) as i64;
            let base = 1500.0 + 140.0 * (age - 18) as f64;
            let mut income = (base * rng.gauss(1.6, 0.5).max(0.3)).round();
            // Sprinkle in executives so the capping has something to do.
            if rng.next_f64() < 0.03 {
                income *= 6.0;
            }

            Row {
                employee_number: i as i64 + 1,
                age,
                gender: rng.pick(&genders),
                marital_status: rng.pick(&marital),
                monthly_income: income,
                environment_satisfaction: rng.pick(&satisfaction),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("EmployeeNumber", DataType::Int64, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("MaritalStatus", DataType::Utf8, false),
        Field::new("MonthlyIncome", DataType::Float64, false),
        Field::new("EnvironmentSatisfaction", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.employee_number))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.age))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.gender))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.marital_status))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.monthly_income))),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| r.environment_satisfaction),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(args.rows, &mut rng);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let csv_path = args.out_dir.join("employee_sample.csv");
    write_csv(&csv_path, &rows).with_context(|| format!("writing {}", csv_path.display()))?;

    let parquet_path = args.out_dir.join("employee_sample.parquet");
    write_parquet(&parquet_path, &rows)
        .with_context(|| format!("writing {}", parquet_path.display()))?;

    log::info!(
        "Wrote {} employees to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    println!("Wrote {} employees to {}", rows.len(), args.out_dir.display());
    Ok(())
}
