use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{PredictionAdapter, PredictionResult};
use score_model::{LinearPipeline, ModelHandle, ModelLoader, ModelLocator};
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use student_schema::{StudentInput, ValidationErrors};

/// Student Score - offline tools for the math score model
#[derive(Parser)]
#[command(name = "student-score")]
#[command(about = "Inspect, check and run the student math score model", long_about = None)]
struct Cli {
    /// Model artifact to use instead of searching the default locations
    #[arg(short, long, env = "STUDENT_SCORE_MODEL_PATH", global = true)]
    model_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// The seven request fields, spelled as the HTTP API expects their values
#[derive(clap::Args)]
struct StudentArgs {
    /// male | female
    #[arg(long)]
    gender: String,

    /// group A .. group E
    #[arg(long)]
    race_ethnicity: String,

    /// some high school | high school | some college | associate's degree |
    /// bachelor's degree | master's degree
    #[arg(long)]
    parental_level_of_education: String,

    /// standard | free/reduced
    #[arg(long)]
    lunch: String,

    /// none | completed
    #[arg(long)]
    test_preparation_course: String,

    /// Reading score, 0-100
    #[arg(long, allow_negative_numbers = true)]
    reading_score: i64,

    /// Writing score, 0-100
    #[arg(long, allow_negative_numbers = true)]
    writing_score: i64,
}

impl StudentArgs {
    /// Run the arguments through the same validator the HTTP API uses
    fn validate(&self) -> std::result::Result<StudentInput, ValidationErrors> {
        StudentInput::from_json(&json!({
            "gender": self.gender,
            "race_ethnicity": self.race_ethnicity,
            "parental_level_of_education": self.parental_level_of_education,
            "lunch": self.lunch,
            "test_preparation_course": self.test_preparation_course,
            "reading_score": self.reading_score,
            "writing_score": self.writing_score,
        }))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the math score for one student
    Predict {
        #[command(flatten)]
        student: StudentArgs,
    },

    /// Show the model's features and weights
    Inspect,

    /// Exit non-zero if the model cannot be loaded
    Check,

    /// Measure single-prediction latency
    Benchmark {
        /// Number of predictions to make
        #[arg(long, default_value = "10000")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ModelLoader::new(ModelLocator::resolve(cli.model_path));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Predict { student } => handle_predict(&loader, &student)?,
        Commands::Inspect => handle_inspect(&loader)?,
        Commands::Check => handle_check(&loader)?,
        Commands::Benchmark { requests } => handle_benchmark(&loader, requests)?,
    }

    Ok(())
}

/// Load the model or fail with the loader's own error
fn load(loader: &ModelLoader) -> Result<LinearPipeline> {
    let (path, model) = loader.try_load().context("Failed to load model")?;
    println!("{} Loaded model from {}", "✓".green(), path.display());
    Ok(model)
}

/// Handle the 'predict' command
fn handle_predict(loader: &ModelLoader, student: &StudentArgs) -> Result<()> {
    // Validate before loading, like the HTTP API
    let input = match student.validate() {
        Ok(input) => input,
        Err(errors) => {
            println!("{}", "Invalid input:".bold().red());
            for error in errors.errors() {
                println!("  {} {}", "•".red(), error);
            }
            return Err(anyhow!(errors));
        }
    };

    let adapter = PredictionAdapter::new(ModelHandle::new(load(loader)?));
    let PredictionResult {
        predicted_math_score,
        message,
    } = adapter.predict(&input)?;

    println!(
        "{} {}",
        "Predicted math score:".bold().blue(),
        format!("{:.2}", predicted_math_score).green()
    );
    println!("{}", message);
    Ok(())
}

/// Handle the 'inspect' command
fn handle_inspect(loader: &ModelLoader) -> Result<()> {
    let model = load(loader)?;

    println!("{}", format!("Model: {}", model.name).bold().blue());
    println!("{}Target: {}", "• ".green(), model.target);
    println!("{}Intercept: {:.4}", "• ".green(), model.intercept);
    println!("{}Unknown categories: {:?}", "• ".green(), model.handle_unknown);

    println!("Numeric features:");
    for term in &model.numeric {
        println!(
            "  - {}: coefficient {:.4} (mean {:.2}, scale {:.2})",
            term.feature, term.coefficient, term.mean, term.scale
        );
    }

    println!("Categorical features:");
    for term in &model.categorical {
        println!("  - {}:", term.feature);
        for (category, weight) in &term.categories {
            println!("      {:<20} {:+.4}", category, weight);
        }
    }
    Ok(())
}

/// Handle the 'check' command
fn handle_check(loader: &ModelLoader) -> Result<()> {
    println!("Searching:");
    for path in loader.locator().candidates() {
        let marker = if path.is_file() { "✓".green() } else { "✗".red() };
        println!("  {} {}", marker, path.display());
    }

    let model = load(loader)?;
    println!(
        "{} Model '{}' is ready ({} features)",
        "✓".green(),
        model.name,
        model.feature_names().count()
    );
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(loader: &ModelLoader, requests: usize) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }

    let adapter = PredictionAdapter::new(ModelHandle::new(load(loader)?));
    let input = StudentInput::from_json(&json!({
        "gender": "female",
        "race_ethnicity": "group B",
        "parental_level_of_education": "bachelor's degree",
        "lunch": "standard",
        "test_preparation_course": "completed",
        "reading_score": 90,
        "writing_score": 88
    }))?;

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for _ in 0..requests {
        let start = Instant::now();
        adapter.predict(&input)?;
        timings.push(start.elapsed());
    }

    let summary = LatencySummary::from_timings(timings);

    println!("Benchmark results:");
    println!("Total time: {:?}", summary.total);
    println!("Average latency: {:?}", summary.average);
    println!("P50 latency: {:?}", summary.p50);
    println!("P95 latency: {:?}", summary.p95);
    println!("P99 latency: {:?}", summary.p99);
    println!("Throughput: {:.2} predictions/second", summary.throughput);

    Ok(())
}

/// Latency figures for a benchmark run
#[derive(Debug, PartialEq)]
struct LatencySummary {
    total: Duration,
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
    throughput: f64,
}

impl LatencySummary {
    /// Summarize per-request timings; `timings` must not be empty
    fn from_timings(mut timings: Vec<Duration>) -> Self {
        let count = timings.len().max(1);
        let total: Duration = timings.iter().sum();
        let average = average_latency(total, count);
        timings.sort();
        let percentile = |p: f64| {
            timings
                .get(((timings.len() as f64 * p) as usize).min(timings.len().saturating_sub(1)))
                .copied()
                .unwrap_or_default()
        };

        Self {
            total,
            average,
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
            throughput: count as f64 / total.as_secs_f64().max(f64::EPSILON),
        }
    }
}

/// Mean of `count` requests taking `total` altogether
fn average_latency(total: Duration, count: usize) -> Duration {
    let nanos = total.as_nanos() / count.max(1) as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
