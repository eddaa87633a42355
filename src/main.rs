use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ipa_diff::cmd;
use std::path::PathBuf;
use std::process;

/// IPA package size comparison
///
/// ipa-diff compares two builds of an iOS app package and reports which
/// resource categories, and which files inside them, grew or shrank.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output (useful for CI/CD or log files)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two packages
    Compare {
        /// Old package (default: first package in the configured old directory)
        #[arg(value_name = "OLD")]
        old: Option<PathBuf>,

        /// New package (default: first package in the configured new directory)
        #[arg(value_name = "NEW")]
        new: Option<PathBuf>,

        /// Output the report as JSON (no report files are written)
        #[arg(long)]
        json: bool,

        /// Open the HTML report in the default browser
        #[arg(long)]
        open: bool,

        /// Do not write result.md and the HTML report
        #[arg(long)]
        no_write: bool,

        /// Directory for the report files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Write a default .ipa-diff.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        Some(Commands::Compare {
            old,
            new,
            json,
            open,
            no_write,
            output_dir,
        }) => cmd::cmd_compare(&cmd::CompareOptions {
            old,
            new,
            json,
            open,
            no_write,
            output_dir,
        }),
        Some(Commands::Init { force }) => cmd::cmd_init(force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("ipa-diff v{}", env!("CARGO_PKG_VERSION"));
            println!("IPA package size comparison\n");
            println!("Usage: ipa-diff <COMMAND>\n");
            println!("Commands:");
            println!("  compare      Compare two packages");
            println!("  init         Write a default .ipa-diff.toml");
            println!("  completions  Generate shell completions");
            println!("\nRun 'ipa-diff <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use ipa_diff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
