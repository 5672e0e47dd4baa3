use clap::Parser;
use station_normalizer::NormalizerError;
use station_normalizer::cli::{Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(NormalizerError::Interrupted {
                    reason: "Processing interrupted by user".to_string(),
                }
                .into())
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Station Normalizer - Climate Station Metadata Repair");
    println!("====================================================");
    println!();
    println!("Repair station metadata files whose rows have split station names");
    println!("or missing arc-seconds into a canonical 17-field layout.");
    println!();
    println!("USAGE:");
    println!("    station-normalizer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    normalize   Normalize station files and write corrected copies");
    println!("    check       Report records that would be rejected, without writing");
    println!("    export      Load a normalized file and write it as Parquet");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Normalize a file (writes correct-Stacje_klimat.csv next to it):");
    println!("    station-normalizer normalize data/Stacje_klimat.csv");
    println!();
    println!("    # Normalize several files and list every rejected record:");
    println!("    station-normalizer check 'data/*.csv'");
    println!();
    println!("    # Export the normalized file for analysis:");
    println!("    station-normalizer export data/correct-Stacje_klimat.csv --compression zstd");
    println!();
    println!("For detailed help on any command, use:");
    println!("    station-normalizer <COMMAND> --help");
}
