#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "demystify")]
#[command(author, version, about = "Readable identifier names for minified JavaScript", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted logs and reports (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Rename identifiers in a JavaScript file
    Rename {
        /// Source file to read
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the diagnostic report to stderr
        #[arg(long)]
        report: bool,

        /// Number of mining rounds (upper bound with --until-stable)
        #[arg(long, value_name = "N")]
        rounds: Option<usize>,

        /// Stop mining after the first round that finds nothing
        #[arg(long)]
        until_stable: bool,

        /// Parse as an ES module instead of a script
        #[arg(long)]
        module: bool,

        /// Do not name anonymous functions after their binding
        #[arg(long)]
        no_name_functions: bool,

        /// Skip the context frequency pass
        #[arg(long)]
        no_frequency: bool,

        /// JSON options file; flags override its values
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Answer framed rename requests on stdin until EOF
    Serve,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Rename {
            input,
            output,
            report,
            rounds,
            until_stable,
            module,
            no_name_functions,
            no_frequency,
            config,
        }) => {
            let span = tracing::info_span!("rename", cmd = "rename", input = %input.display());
            let _guard = span.enter();
            let action = commands::rename::RenameAction {
                input,
                output,
                report,
                rounds,
                until_stable,
                module,
                name_functions: !no_name_functions,
                frequency_pass: !no_frequency,
                config,
            };
            commands::rename::run(action, cli.json)
        }
        Some(Commands::Serve) => {
            let span = tracing::info_span!("serve", cmd = "serve");
            let _guard = span.enter();
            commands::serve::run()
        }
    }
}
