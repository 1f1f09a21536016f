use clap::{Parser as ClapParser, Subcommand};
use quarksy::{
    CssPlatformOptions,
    cli::{self, BuildOptions, CliError, GetOptions},
};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "quarksy")]
#[command(about = "Quarksy - transforms design tokens to code")]
#[command(version)]
struct Cli {
    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a tokens file into platform files
    Build {
        /// Tokens file (reads stdin when piped, otherwise tokens.json)
        input: Option<PathBuf>,

        /// Platforms to generate
        #[arg(short, long = "platform", num_args = 1.., default_value = "css")]
        platforms: Vec<String>,

        /// Prefix for token variable names
        #[arg(long)]
        token_prefix: Option<String>,

        /// Prefix for token set class names, e.g. typography built of many properties
        #[arg(long)]
        token_set_prefix: Option<String>,

        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the resolved value of one token
    Get {
        /// Token path, e.g. spacing.sm
        key: String,

        /// Tokens file (reads stdin when piped, otherwise tokens.json)
        input: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            input,
            platforms,
            token_prefix,
            token_set_prefix,
            output_dir,
        } => run_build(input, platforms, token_prefix, token_set_prefix, output_dir),
        Commands::Get { key, input } => run_get(key, input),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<PathBuf>) -> Result<String, CliError> {
    let path = match input {
        Some(path) => path,
        None if !atty::is(atty::Stream::Stdin) => {
            tracing::info!("reading tokens from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            return Ok(buffer);
        }
        None => PathBuf::from(cli::DEFAULT_INPUT),
    };

    tracing::info!(path = %path.display(), "tokens input file");
    fs::read_to_string(&path).map_err(|source| CliError::Io { path, source })
}

fn run_build(
    input: Option<PathBuf>,
    platforms: Vec<String>,
    token_prefix: Option<String>,
    token_set_prefix: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let options = BuildOptions {
        input: read_input(input)?,
        platforms,
        css: CssPlatformOptions {
            variable_prefix: token_prefix,
            class_prefix: token_set_prefix,
            ..CssPlatformOptions::default()
        },
        output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
    };

    let written = cli::execute_build(&options)?;

    println!("Generated platforms files:");
    for path in written {
        println!(" - {}", path.display());
    }
    Ok(())
}

fn run_get(key: String, input: Option<PathBuf>) -> Result<(), CliError> {
    let options = GetOptions {
        input: read_input(input)?,
        key,
    };

    println!("{}", cli::execute_get(&options)?);
    Ok(())
}
