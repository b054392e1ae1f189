//! pdfjson CLI - PDF to JSON conversion tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfjson::{
    collect_candidates, ConversionDispatcher, ConverterConfig, FileCandidate, Packager,
    PendingFile, Session,
};

#[derive(Parser)]
#[command(name = "pdfjson")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF files to per-page JSON documents", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PDF files (or directories of PDFs) to JSON
    Convert(ConvertArgs),

    /// Convert one PDF and print its JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input PDF files or directories
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Write a single ZIP archive (optionally at FILE) instead of JSON files
    #[arg(long, value_name = "FILE", require_equals = true)]
    zip: Option<Option<PathBuf>>,

    #[command(flatten)]
    service: ServiceArgs,
}

#[derive(Args)]
struct ServiceArgs {
    /// Conversion service endpoint
    #[arg(long, env = "PDFJSON_ENDPOINT", value_name = "URL")]
    endpoint: Option<String>,

    /// Extract locally only, never contacting the service
    #[arg(long)]
    local: bool,
}

impl ServiceArgs {
    fn config(&self) -> ConverterConfig {
        let config = ConverterConfig::new();
        match (&self.endpoint, self.local) {
            (Some(endpoint), false) => config.with_endpoint(endpoint),
            _ => config.local_only(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert(args)) => cmd_convert(&args),
        Some(Commands::Json {
            input,
            output,
            service,
        }) => cmd_json(&input, output.as_deref(), &service),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if inputs are provided
            if cli.convert.inputs.is_empty() {
                println!("{}", "Usage: pdfjson <INPUT>... [-o DIR] [--zip[=FILE]]".yellow());
                println!("       pdfjson --help for more information");
                Ok(())
            } else {
                cmd_convert(&cli.convert)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.inputs.is_empty() {
        return Err("no input files given".into());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let config = args.service.config();
        let mut session = Session::new(&config)?;

        let candidates = collect_candidates(args.inputs.as_slice()).await?;
        let offered = candidates.len();
        let accepted = session.add_files(candidates);
        if accepted < offered {
            println!(
                "{} {} non-PDF file(s)",
                "Skipped".yellow(),
                offered - accepted
            );
        }
        if accepted == 0 {
            return Err("no PDF files found".into());
        }

        match config.endpoint.as_deref() {
            Some(endpoint) => println!("{} {}", "Service:".cyan(), endpoint),
            None => println!("{}", "Extracting locally".cyan()),
        }

        let pb = ProgressBar::new(accepted as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        session
            .convert_all(|p| {
                match p.result.error() {
                    None => pb.println(format!("  {} {}", "✓".green(), p.filename)),
                    Some(err) => pb.println(format!("  {} {}: {}", "✗".red(), p.filename, err)),
                }
                pb.set_message(p.filename.to_string());
                pb.inc(1);
            })
            .await;
        pb.finish_and_clear();

        let results = session.results();
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let failed = results.len() - succeeded;
        println!(
            "\n{} {} converted, {} failed",
            "Done!".green().bold(),
            succeeded,
            failed
        );
        if succeeded == 0 {
            return Err("every file failed to convert".into());
        }

        let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
        match &args.zip {
            Some(target) => {
                let archive = session.package_all().await?;
                let path = match target {
                    Some(path) => {
                        archive.save_as(path).await?;
                        path.clone()
                    }
                    None => archive.write_to(&output_dir).await?,
                };
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => {
                println!("\n{}", "Output files:".green().bold());
                let indices: Vec<usize> = (0..results.len())
                    .filter(|&i| results[i].is_success())
                    .collect();
                for (n, &i) in indices.iter().enumerate() {
                    let artifact = session.package_result(i)?;
                    artifact.write_to(&output_dir).await?;
                    let branch = if n + 1 == indices.len() { "└─" } else { "├─" };
                    println!("  {} {}", branch.dimmed(), artifact.name);
                }
            }
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    service: &ServiceArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let config = service.config();
        let file = PendingFile::from(FileCandidate::from_path(input).await?);

        let result = ConversionDispatcher::from_config(&config)?
            .convert_one(&file)
            .await;
        let artifact = Packager::from_config(&config)?.package_single(&result)?;

        if let Some(path) = output {
            artifact.save_as(path).await?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", String::from_utf8_lossy(&artifact.bytes));
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn cmd_version() {
    println!("{} {}", "pdfjson".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to JSON conversion tool");
    println!();
    println!("License: MIT");
}
