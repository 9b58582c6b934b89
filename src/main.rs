//! Entry point for the `localize` command.
//!
//! ```text
//! localize [--dir <path>] [--locale <code>] [--var <name>=<value>]... <key>...
//! ```
//!
//! Options come from `.localization.json` in the current directory when present. Each key
//! is translated and written to stdout on its own line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use localization_dictionary::Localization;
use localization_dictionary::lookup::VariableMap;
use tokio::io::{
    AsyncWrite,
    AsyncWriteExt,
};
use tracing_subscriber::EnvFilter;

/// Command line of `localize`.
#[derive(Debug, Parser)]
#[command(name = "localize")]
#[command(about = "Translate keys from a directory of localization files")]
struct Args {
    /// Directory to load instead of `localizationsLocation`
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Requested locale (the default locale when omitted)
    #[arg(long, value_name = "CODE")]
    locale: Option<String>,

    /// `{{name}}` substitution, repeatable
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    vars: Vec<(String, String)>,

    /// Keys to translate
    #[arg(value_name = "KEY", required = true)]
    keys: Vec<String>,
}

/// Splits `name=value` at the first `=`.
fn parse_variable(pair: &str) -> Result<(String, String), String> {
    pair.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid variable '{pair}', expected <name>=<value>"))
}

/// Loads the localizations, translates the requested keys and prints them.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let workspace_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut localization = match Localization::from_workspace(&workspace_root) {
        Ok(localization) => localization,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = args.dir {
        let mut options = localization.options().clone();
        options.localizations_location = dir;
        localization = Localization::new(options);
    }

    if let Err(e) = localization.prepare().await {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    let variables: VariableMap = args.vars.into_iter().collect();
    let variables = (!variables.is_empty()).then_some(&variables);
    let mut output = String::new();
    for key in &args.keys {
        output.push_str(&localization.translate(key, args.locale.as_deref(), variables));
        output.push('\n');
    }

    if let Err(e) = write_output(&mut tokio::io::stdout(), &output).await {
        tracing::error!("Failed to write output: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Writes `output` and flushes `writer`.
async fn write_output<W>(writer: &mut W, output: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(output.as_bytes()).await?;
    writer.flush().await
}
