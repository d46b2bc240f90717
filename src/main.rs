use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use framingham::config::Config;
use framingham::patient::{CholesterolUnit, PatientInput, PatientRecord};
use framingham::prediction::{PredictionClient, PredictionError, PredictionInput};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_INTERNAL: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug)]
struct ClinicalArgs {
    /// "Male" or "Female" (case-sensitive)
    #[arg(long)]
    gender: String,

    /// Age in years
    #[arg(long, allow_hyphen_values = true)]
    age: i64,

    /// HDL cholesterol
    #[arg(long, allow_hyphen_values = true)]
    hdl: f64,

    /// Total cholesterol
    #[arg(long, allow_hyphen_values = true)]
    total_cholesterol: f64,

    /// Systolic blood pressure in mmHg
    #[arg(long, allow_hyphen_values = true)]
    systolic_bp: i64,

    /// Current or former smoker
    #[arg(long)]
    smoker: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single patient
    Score {
        #[command(flatten)]
        clinical: ClinicalArgs,

        /// On antihypertensive treatment
        #[arg(long)]
        treated: bool,

        /// Patient name (display only)
        #[arg(long)]
        name: Option<String>,

        /// Patient identifier (display only)
        #[arg(long)]
        id: Option<String>,

        /// Unit of --hdl and --total-cholesterol: mmol/L or mg/dL (default from config)
        #[arg(long)]
        units: Option<CholesterolUnit>,

        /// Print the result as JSON (with --verbose the trace goes to stderr)
        #[arg(long)]
        json: bool,
    },
    /// Score every patient in a YAML file, highest risk first
    Batch {
        /// Path to the patient file
        file: PathBuf,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Ask the hosted prediction model (cholesterol in mg/dL)
    Predict {
        #[command(flatten)]
        clinical: ClinicalArgs,
    },
    /// Write a config file template
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "framingham")]
#[command(about = "Framingham 10-year cardiovascular risk calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (scoring trace and diagnostics)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/framingham/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if cli.verbose {
        match &config_path {
            Some(p) => eprintln!("Using config: {}", p.display()),
            None => match framingham::config::get_config_path() {
                Ok(p) => eprintln!("Using config: {} (if present)", p.display()),
                Err(e) => eprintln!("No default config path: {:#}", e),
            },
        }
    }

    // Init runs before loading so a broken config can be replaced
    if let Commands::Init { force } = cli.command {
        match framingham::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Wrote config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match framingham::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = framingham::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors =
        !cli.no_color && config.color.unwrap_or_else(framingham::output::should_use_colors);

    let code = match cli.command {
        Commands::Score {
            clinical,
            treated,
            name,
            id,
            units,
            json,
        } => {
            let units = units.unwrap_or(config.units);
            if cli.verbose {
                eprintln!("Cholesterol inputs in {}", units);
            }
            let input = PatientInput {
                id,
                name,
                gender: clinical.gender,
                age: clinical.age,
                hdl: clinical.hdl,
                total_cholesterol: clinical.total_cholesterol,
                systolic_bp: clinical.systolic_bp,
                hbp_treatment: treated,
                smoker: clinical.smoker,
            };
            run_score(input.into_mmol(units), json, cli.verbose, use_colors)
        }
        Commands::Batch { file, tsv } => run_batch(&file, tsv, cli.verbose, use_colors),
        Commands::Predict { clinical } => run_predict(&config, clinical, cli.verbose).await,
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(code);
}

fn run_score(input: PatientInput, json: bool, verbose: bool, use_colors: bool) -> i32 {
    let record = match PatientRecord::new(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid patient data ({}): {}", e.field(), e);
            return EXIT_INPUT;
        }
    };

    let result = match framingham::scoring::calculate_score(&record) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Internal scoring error: {}", e);
            return EXIT_INTERNAL;
        }
    };

    if json {
        // stdout carries only the JSON document
        if verbose {
            eprintln!("{}", framingham::output::format_trace(&result));
        }
        let report = serde_json::json!({ "patient": record, "result": result });
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_INTERNAL;
            }
        }
        return EXIT_SUCCESS;
    }

    if verbose {
        println!("{}", framingham::output::format_patient_detail(&record));
        println!("--");
        println!("{}", framingham::output::format_trace(&result));
        println!();
    }
    println!(
        "{}",
        framingham::output::format_summary(&record, &result, use_colors)
    );

    EXIT_SUCCESS
}

fn run_batch(file: &std::path::Path, tsv: bool, verbose: bool, use_colors: bool) -> i32 {
    let batch = match framingham::batch::load_batch_file(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Patient file error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    if verbose {
        eprintln!(
            "Loaded {} patients from {} (cholesterol in {})",
            batch.patients.len(),
            file.display(),
            batch.units
        );
    }

    let outcome = match framingham::batch::score_batch(batch) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Internal scoring error: {}", e);
            return EXIT_INTERNAL;
        }
    };

    for rejected in &outcome.rejected {
        eprintln!(
            "Row {} ({}) rejected: {}",
            rejected.row, rejected.label, rejected.error
        );
    }

    let scored: Vec<framingham::output::ScoredPatient> = outcome
        .scored
        .iter()
        .map(|(record, result)| framingham::output::ScoredPatient { record, result })
        .collect();

    if tsv {
        println!("{}", framingham::output::format_tsv(&scored));
    } else {
        if verbose {
            for patient in &scored {
                println!("{}", framingham::output::format_patient_detail(patient.record));
                println!("--");
                println!("{}", framingham::output::format_trace(patient.result));
                println!();
            }
        }
        println!("{}", framingham::output::format_batch_table(&scored, use_colors));
    }

    if verbose {
        eprintln!();
        eprintln!(
            "Scored {} patients, rejected {}",
            outcome.scored.len(),
            outcome.rejected.len()
        );
    }

    if outcome.scored.is_empty() && !outcome.rejected.is_empty() {
        EXIT_INPUT
    } else {
        EXIT_SUCCESS
    }
}

async fn run_predict(config: &Config, clinical: ClinicalArgs, verbose: bool) -> i32 {
    let raw = PatientInput {
        id: None,
        name: None,
        gender: clinical.gender,
        age: clinical.age,
        hdl: clinical.hdl,
        total_cholesterol: clinical.total_cholesterol,
        systolic_bp: clinical.systolic_bp,
        hbp_treatment: false,
        smoker: clinical.smoker,
    };
    let input = match PredictionInput::from_patient_input(raw) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Invalid patient data ({}): {}", e.field(), e);
            return EXIT_INPUT;
        }
    };

    let client = match PredictionClient::from_env(config.prediction.as_ref()) {
        Ok(c) => c,
        Err(e @ PredictionError::NotConfigured) | Err(e @ PredictionError::InvalidTimeout(..)) => {
            eprintln!("Config error: {}", e);
            return EXIT_CONFIG;
        }
        Err(e) => {
            eprintln!("Prediction error: {}", e);
            return EXIT_NETWORK;
        }
    };

    if verbose {
        eprintln!("Request: {}", input.to_request_body());
    }

    match client.predict(&input).await {
        Ok(prediction) => {
            println!("Predicted risk: {}", prediction);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Prediction failed: {}", e);
            EXIT_NETWORK
        }
    }
}
