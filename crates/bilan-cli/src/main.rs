mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bilan",
    version,
    about = "Financial report analyzer: PDF extraction, numeric audit, AI summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Provider/model settings shared by the AI-backed subcommands. Flags
/// override BILAN_* environment variables.
#[derive(Args)]
struct ProviderArgs {
    /// Provider: openai (default), gemini or rest
    #[arg(long)]
    provider: Option<String>,

    /// Model name (e.g. gpt-4o-mini, gpt-4o, gpt-3.5-turbo)
    #[arg(short, long)]
    model: Option<String>,

    /// API credential (overrides BILAN_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Provider base URL override
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Maximum document text length in characters (50000-200000)
    #[arg(short = 'L', long, value_name = "CHARS")]
    max_length: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract page-tagged text from a PDF (no network access)
    Extract {
        /// Path to the PDF report
        pdf_file: PathBuf,

        /// Maximum text length in characters (50000-200000)
        #[arg(short = 'L', long, value_name = "CHARS")]
        max_length: Option<usize>,

        /// Write the extracted text to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run the numeric consistency audit (no network access)
    Audit {
        /// Path to the PDF report
        pdf_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show every extracted observation, not just the findings
        #[arg(long)]
        verbose: bool,
    },
    /// Generate the structured AI summary plus the audit section
    Analyze {
        /// Path to the PDF report
        pdf_file: PathBuf,

        #[command(flatten)]
        provider: ProviderArgs,

        /// Write the markdown report to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Ask a free-text question about the report
    Ask {
        /// Path to the PDF report
        pdf_file: PathBuf,

        /// The question, in natural language
        question: String,

        #[command(flatten)]
        provider: ProviderArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            pdf_file,
            max_length,
            out,
        } => commands::extract::run(pdf_file, max_length, out),
        Commands::Audit {
            pdf_file,
            output,
            verbose,
        } => commands::audit::run(pdf_file, &output, verbose),
        Commands::Analyze {
            pdf_file,
            provider,
            out,
        } => commands::analyze::run(pdf_file, &provider, out),
        Commands::Ask {
            pdf_file,
            question,
            provider,
        } => commands::ask::run(pdf_file, &question, &provider),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
