//! Command-line client for the dpaste.com pastebin.

mod clipboard;
mod paste;
#[cfg(test)]
mod tests;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dpaster_core::config::validate_expiry_days;
use dpaster_core::constants::{
    API_URL_ENV, CONFIG_PATH_ENV, DEFAULT_API_URL, MAX_EXPIRY_DAYS, MIN_EXPIRY_DAYS,
};
use dpaster_core::syntax::canonical::{canonicalize, SYNTAX_OPTIONS};
use dpaster_core::text::trimmed_nonempty;
use dpaster_core::{select_syntax, ConfigFields, ConfigStore, ConfigUpdate, FilenameHint};
use paste::PasteRequest;
use std::error::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dpaster",
    about = "Client interface for the https://dpaste.com/ pastebin",
    version
)]
struct Cli {
    /// Config file path (can also be set via DPASTER_CONFIG env var)
    #[arg(long, env = CONFIG_PATH_ENV, global = true)]
    config: Option<PathBuf>,

    /// Paste API endpoint (can also be set via DPASTER_API_URL env var)
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL, global = true)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paste a file (or stdin) and print the URL
    #[command(visible_alias = "p")]
    Paste(PasteArgs),
    /// Show or change stored defaults
    #[command(visible_alias = "c")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the syntax that would be sent, without uploading
    Guess {
        /// File to inspect; stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// List accepted syntax values
    Syntaxes,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct PasteArgs {
    /// File to paste; stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Syntax highlighter
    #[arg(short, long)]
    syntax: Option<String>,

    /// Expiry time in days
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(MIN_EXPIRY_DAYS as i64..=MAX_EXPIRY_DAYS as i64)
    )]
    expires: Option<u32>,

    /// Paste title
    #[arg(short, long)]
    title: Option<String>,

    /// Print the raw-text URL
    #[arg(short, long)]
    raw: bool,

    /// Copy the URL to the clipboard
    #[arg(short, long)]
    copy: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print every option and its value
    Show,
    /// Set the given options
    Add {
        #[arg(long)]
        autocp: bool,
        #[arg(long)]
        raw: bool,
        #[arg(long)]
        syntax: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(MIN_EXPIRY_DAYS as i64..=MAX_EXPIRY_DAYS as i64)
        )]
        expires: Option<u32>,
    },
    /// Reset the flagged options
    Rm {
        #[arg(long)]
        autocp: bool,
        #[arg(long)]
        raw: bool,
        #[arg(long)]
        syntax: bool,
        #[arg(long)]
        expires: bool,
    },
}

impl Commands {
    fn action(&self) -> &'static str {
        match self {
            Commands::Paste(_) => "Paste",
            Commands::Config { .. } => "Config",
            Commands::Guess { .. } => "Guess",
            Commands::Syntaxes => "Syntaxes",
            Commands::Completions { .. } => "Completions",
        }
    }
}

/// Content read from a file or stdin, plus the name used for inference.
struct Input {
    content: String,
    filename: Option<String>,
}

impl Input {
    fn read(file: Option<&Path>) -> io::Result<Self> {
        match file.filter(|path| *path != Path::new("-")) {
            Some(path) => Ok(Self {
                content: std::fs::read_to_string(path)?,
                filename: Some(path.to_string_lossy().into_owned()),
            }),
            None => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(Self {
                    content,
                    filename: None,
                })
            }
        }
    }

    fn hint(&self) -> FilenameHint<'_> {
        match &self.filename {
            Some(name) => FilenameHint::Named(name),
            None => FilenameHint::Stdin,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dpaster=warn,dpaster_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn config_store(path: Option<PathBuf>) -> ConfigStore {
    path.map(ConfigStore::new)
        .unwrap_or_else(ConfigStore::from_env_or_default)
}

async fn run_paste(
    args: PasteArgs,
    store: &ConfigStore,
    endpoint: &str,
    timeout: u64,
) -> Result<(), Box<dyn Error>> {
    let config = store.load()?;
    let endpoint = paste::endpoint_url(endpoint)?;
    let input = Input::read(args.file.as_deref())?;
    dpaster_core::syntax::init()?;

    let syntax = select_syntax(
        args.syntax.as_deref(),
        config.syntax.as_deref(),
        input.hint(),
        &input.content,
    );
    let expiry_days = args
        .expires
        .or(config.expires)
        .map(validate_expiry_days)
        .transpose()?;
    let request = PasteRequest {
        content: &input.content,
        syntax: &syntax,
        title: trimmed_nonempty(args.title.as_deref()),
        expiry_days,
    };

    let client = paste::build_client(Duration::from_secs(timeout))?;
    let url = paste::submit(&client, &endpoint, &request).await?;
    let url = paste::with_raw_suffix(url, args.raw || config.raw);
    println!("{}", url);

    if args.copy || config.autocp {
        match clipboard::copy_text(&url) {
            Ok(tool) => tracing::debug!(tool, "copied paste URL"),
            Err(err) => eprintln!("warning: could not copy URL to clipboard: {}", err),
        }
    }
    Ok(())
}

fn run_config(action: ConfigAction, store: &ConfigStore) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            for (option, value) in store.load()?.entries() {
                println!("{}: {}", option, value);
            }
        }
        ConfigAction::Add {
            autocp,
            raw,
            syntax,
            expires,
        } => {
            let update = ConfigUpdate {
                autocp: autocp.then_some(true),
                raw: raw.then_some(true),
                syntax: trimmed_nonempty(syntax.as_deref()).map(canonicalize),
                expires,
            };
            store.update(|config| config.apply(update))?;
        }
        ConfigAction::Rm {
            autocp,
            raw,
            syntax,
            expires,
        } => {
            let fields = ConfigFields {
                autocp,
                raw,
                syntax,
                expires,
            };
            store.update(|config| config.clear(fields))?;
        }
    }
    Ok(())
}

fn run_guess(file: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let input = Input::read(file.as_deref())?;
    dpaster_core::syntax::init()?;
    println!("{}", dpaster_core::syntax::resolve(input.hint(), &input.content));
    Ok(())
}

fn run_syntaxes() {
    for option in SYNTAX_OPTIONS {
        println!("{:<20} {}", option.value, option.label);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let Cli {
        config,
        endpoint,
        timeout,
        command,
    } = Cli::parse();

    let action_name = command.action();
    let store = config_store(config);
    let result = match command {
        Commands::Paste(args) => run_paste(args, &store, &endpoint, timeout).await,
        Commands::Config { action } => run_config(action, &store),
        Commands::Guess { file } => run_guess(file),
        Commands::Syntaxes => {
            run_syntaxes();
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} failed: {}", action_name, err);
            ExitCode::FAILURE
        }
    }
}
