use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use hr_ingest::logging::init_logging;
use hr_ingest::{
    check_all_employees_have_a_hire_record, load_employment_output, EmployeeProcessor,
    EmploymentProcessor, IngestConfig, EMPLOYEES_OUTPUT, EMPLOYEES_REVIEW_OUTPUT,
    EMPLOYMENT_OUTPUT,
};

/// Rows shown after each pipeline finishes
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "hr-ingest", version, about = "Clean client HR exports for database ingestion")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the two employee exports into employees.csv
    Employees(RunArgs),

    /// Normalize the job export into employment.csv
    Employment(RunArgs),

    /// Run both pipelines
    All(RunArgs),

    /// Report employees without a Hire record in an employment CSV
    CheckHires {
        /// Path to a previously written employment.csv
        path: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// JSON config file (defaults to the JKU file names in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Client tag used in unique keys
    #[arg(long)]
    client: Option<String>,

    /// Directory for the CSV outputs
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

impl RunArgs {
    fn load_config(&self) -> Result<IngestConfig> {
        let mut config = match &self.config {
            Some(path) => IngestConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => IngestConfig::default(),
        };

        if let Some(client) = &self.client {
            config = config.with_client(client.clone());
        }
        if let Some(dir) = &self.out_dir {
            config = config.with_output_dir(dir.clone());
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Employees(args) => run_employees(&args.load_config()?),
        Command::Employment(args) => run_employment(&args.load_config()?),
        Command::All(args) => {
            let config = args.load_config()?;
            run_employees(&config)?;
            run_employment(&config)
        }
        Command::CheckHires { path } => run_check_hires(&path),
    }
}

fn run_employees(config: &IngestConfig) -> Result<()> {
    let mut processor =
        EmployeeProcessor::from_config(config).context("Failed to load employee exports")?;
    processor.process();

    let output = config.output_path(EMPLOYEES_OUTPUT);
    processor
        .save_data(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let review_path = config.output_path(EMPLOYEES_REVIEW_OUTPUT);
    let review = processor
        .save_review(&review_path)
        .with_context(|| format!("Failed to write {}", review_path.display()))?;

    println!("--- data ready to be ingested into the database ---");
    for record in processor.records().iter().take(PREVIEW_ROWS) {
        println!(
            "{:<12} {:<15} {:<25} {}",
            record.employee_id, record.gender, record.ethnicity, record.unique_key
        );
    }
    println!(
        "✓ {} employees written, {} need review ({})",
        processor.records().len(),
        review.len(),
        review_path.display()
    );

    Ok(())
}

fn run_employment(config: &IngestConfig) -> Result<()> {
    let mut processor =
        EmploymentProcessor::from_config(config).context("Failed to load employment exports")?;
    processor.process();

    let output = config.output_path(EMPLOYMENT_OUTPUT);
    processor
        .save_data(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("--- Data ready for ingestion to database ---");
    for row in processor.rows().iter().take(PREVIEW_ROWS) {
        println!(
            "{:<12} {:<20} {} {:<15} {}",
            row.employee_id, row.action, row.effective_date, row.department, row.unique_key
        );
    }
    println!("✓ {} employment records written", processor.rows().len());

    Ok(())
}

fn run_check_hires(path: &Path) -> Result<()> {
    let rows = load_employment_output(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let report = check_all_employees_have_a_hire_record(&rows);
    println!("{}", report.summary());
    for id in &report.missing_hire {
        println!("  - {}", id);
    }

    Ok(())
}
