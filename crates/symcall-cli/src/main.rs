use clap::{CommandFactory, Parser, Subcommand};

mod lookup;
mod repl;
mod run;
mod utils;


use lookup::handle_lookup;
use repl::handle_repl;
use run::handle_run;
use utils::{BridgeOptions, init_logging};

/// Version string with git revision and build target
fn version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (git:",
        env!("GIT_HASH"),
        ", ",
        env!("SYMCALL_TARGET"),
        ")"
    )
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Run Lua scripts that call native functions by name",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// The script to run (default if no subcommand)
    file: Option<String>,
    #[command(flatten)]
    bridge: BridgeOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Lua script ("-" reads stdin)
    Run {
        /// The script to execute
        file: String,
    },
    /// Start an interactive Lua session with the bridge commands
    Repl,
    /// Resolve symbol names and print their addresses
    Lookup {
        /// Names to resolve
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = match cli.bridge.to_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };
    init_logging(config.verbose);
    log::debug!("{config:?}");

    let result = match &cli.command {
        Some(Commands::Run { file }) => handle_run(file, &config),
        Some(Commands::Repl) => handle_repl(&config),
        Some(Commands::Lookup { names }) => handle_lookup(names, &config),
        None => {
            // Default: run the file if provided, otherwise print help
            let Some(file) = &cli.file else {
                let _ = Cli::command().print_help();
                println!();
                std::process::exit(0);
            };
            handle_run(file, &config)
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
