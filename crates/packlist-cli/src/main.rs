mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "packlist",
    version,
    about = "Bulk packing-list extractor for textile factory delivery documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract line records from one or more packing-list PDFs
    Extract {
        /// Factory that produced the documents: "south asia" or "ocean lanka"
        factory: String,

        /// PDF files, processed in the order given
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the records to an xlsx workbook
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print aggregate totals per shipment and per batch/colour
        #[arg(long)]
        summary: bool,

        /// Gemini API key for the structured extraction strategy
        /// (repeatable; keys are tried in order until one succeeds)
        #[arg(long = "ai-key", value_name = "KEY")]
        ai_keys: Vec<String>,

        /// Gemini model used with --ai-key
        #[arg(long = "ai-model", value_name = "NAME", default_value = "gemini-1.5-flash")]
        ai_model: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            factory,
            files,
            output,
            out,
            summary,
            ai_keys,
            ai_model,
        } => commands::extract::run(&factory, files, &output, out, summary, ai_keys, &ai_model),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
