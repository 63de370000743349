mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{StoreArgs, cmd_cat, cmd_log, cmd_ls, cmd_readlink, cmd_stat};
use output::{OutputFormat, print_error};

/// storefs - inspect store contents and build logs
#[derive(Parser)]
#[command(name = "storefs")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  store: StoreArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the type, size and executable bit of a path inside the store
  Stat {
    path: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// List a directory inside the store
  Ls {
    path: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Print the contents of a file inside the store
  Cat { path: String },

  /// Print the target of a symlink inside the store
  Readlink {
    path: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Print the build log of a derivation or of an output's deriver
  Log {
    path: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Stat { path, output } => cmd_stat(&cli.store, path, *output),
    Commands::Ls { path, output } => cmd_ls(&cli.store, path, *output),
    Commands::Cat { path } => cmd_cat(&cli.store, path),
    Commands::Readlink { path, output } => cmd_readlink(&cli.store, path, *output),
    Commands::Log { path, output } => cmd_log(&cli.store, path, *output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
