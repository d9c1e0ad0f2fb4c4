use clap::{Parser, Subcommand};
use excel_message::cli;
use excel_message::core::import::DEFAULT_IMPORT_EXTENSION;
use excel_message::types::SelectPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excel-message")]
#[command(about = "Move translations between message files and Excel workbooks.")]
#[command(long_about = "Excel Message - translate message files in Excel

Exports new translations from PHP (or YAML) message files to Excel files and
updates the message files with the translations entered in those Excel files.

Both commands read the same configuration file that describes the message
files:

  message_path: ./messages   # relative to the configuration file
  languages: [de, fr]
  format: php                # php (default) or yaml
  source_language: en-US

COMMANDS:
  export   - Message files to Excel (.xlsx), one file per language
  import   - Excel files back into the message files

EXAMPLES:
  excel-message export messages.yaml excel/              # Untranslated only
  excel-message export messages.yaml excel/ --type all   # Every message
  excel-message import messages.yaml excel/
  excel-message import messages.yaml excel/ --dry-run

Set RUST_LOG=excel_message=debug for detailed logs.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export messages from the message files to Excel files.

Goes through all message files of the configured languages and writes the
messages to translate into one Excel file per language (<language>.xlsx),
with one sheet per category. Column A holds the source message, column B is
left empty for the translation.

Categories without messages to translate get no sheet; if no message needs
translation at all, no file is written.")]
    /// Export messages to translate to Excel files
    Export {
        /// Path to the message configuration file
        config: PathBuf,

        /// Output directory for the Excel files (must exist)
        excel_dir: PathBuf,

        /// Messages to include: 'new' (untranslated) or 'all'
        #[arg(short = 't', long = "type", default_value = "new")]
        message_type: String,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import translations from Excel files into the message files.

Reads every Excel file in the directory. The file name is the language code,
every sheet is a category, column A the source message and column B its
translation. The first row is a header and the data ends at the first row
without a source message.

Only empty translations are filled in:
  Skipping (removed) - the message is no longer in the message file
  Skipping (exists)  - the message already has a translation
Categories without a message file are skipped with a warning.")]
    /// Import translations from Excel files
    Import {
        /// Path to the message configuration file
        config: PathBuf,

        /// Directory containing the Excel files
        excel_dir: PathBuf,

        /// Excel file extension
        #[arg(short, long, default_value = DEFAULT_IMPORT_EXTENSION)]
        extension: String,

        /// Report what would change without writing message files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "excel_message=debug"
    } else {
        "excel_message=error"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            config,
            excel_dir,
            message_type,
            verbose,
        } => {
            init_logging(verbose);
            let policy: SelectPolicy = message_type.parse()?;
            cli::export(config, excel_dir, policy, verbose)?;
        }

        Commands::Import {
            config,
            excel_dir,
            extension,
            dry_run,
            verbose,
        } => {
            init_logging(verbose);
            cli::import(config, excel_dir, extension, dry_run, verbose)?;
        }
    }

    Ok(())
}
