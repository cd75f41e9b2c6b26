mod cli;
mod numbering;
mod snippet;
mod types;
mod violations;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays a pure result channel
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Number(args) => {
            numbering::number_file(&args.input_file, &args.output_file).unwrap_or_else(|e| {
                eprintln!("Failed to number {}: {}", args.input_file, e);
                std::process::exit(1);
            });
            println!("Numbered file created: {}", args.output_file);
        }
        Commands::Denumber(args) => {
            numbering::denumber_file(&args.input_file, &args.output_file).unwrap_or_else(|e| {
                eprintln!("Failed to denumber {}: {}", args.input_file, e);
                std::process::exit(1);
            });
            println!("Denumbered file created: {}", args.output_file);
        }
        Commands::Violations(args) => {
            let violations =
                violations::extract_violations_for_file(&args.excel_path, &args.target_file);
            let json = serde_json::to_string(&violations).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
        Commands::Snippets(args) => {
            let snippets = snippet::extract_snippets(&args.response_text);
            if let Some(path) = &args.output {
                snippet::save_snippets(&snippets, path).unwrap_or_else(|e| {
                    eprintln!("Failed to write snippets to {}: {}", path, e);
                    std::process::exit(1);
                });
            }
            let json = serde_json::to_string(&snippets).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}
