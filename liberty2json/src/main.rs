//! # liberty2json
//!
//! Liberty Cell-Library to JSON Converter
//!

use clap::Parser;
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::io::Write;

use liberty21::ProjectOptions;
use liberty21utils::{SerdeFile, SerializationFormat};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// Liberty Cell-Library to JSON Converter
#[derive(Parser, Debug, Default)]
struct ProgramOptions {
    /// Liberty (.lib) Input File
    #[clap(short = 'i', long)]
    lib: String,
    /// Output File. Writes to stdout if omitted.
    #[clap(short = 'o', long)]
    out: Option<String>,
    /// Output Format (json, yaml, toml). Defaults to the output file's extension, or JSON.
    #[clap(short = 'f', long)]
    fmt: Option<String>,
    /// Compact, single-line output
    #[clap(long)]
    compact: bool,
    /// Projection Options File (json, yaml, or toml)
    #[clap(short = 'c', long)]
    config: Option<String>,
    /// Check Mode. Parse and project, but write nothing.
    #[clap(long)]
    check: bool,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

/// The main entry point.
/// All logic is offloaded to `_main` for sake of testing.
fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    // `RUST_LOG` takes precedence over `--verbose`
    let level = if options.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    _main(&options)
}

/// All the real logic, with `ProgramOptions` argument for sake of testing
fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    let opts = load_options(options.config.as_deref())?;

    // Parse and project each library in the input
    let mut docs = liberty21::convert_file(&options.lib, &opts)?;
    info!("Projected {} library(s) from {:?}", docs.len(), &options.lib);
    if docs.is_empty() {
        warn!("No libraries found in {:?}", &options.lib);
    }
    if options.check {
        return Ok(());
    }

    // A single library is written as its document, several as an array of them
    let doc = if docs.len() == 1 {
        docs.remove(0)
    } else {
        Value::Array(docs)
    };
    let fmt = output_format(options)?;
    let text = if options.compact {
        fmt.to_string(&doc)?
    } else {
        fmt.to_string_pretty(&doc)?
    };

    match options.out {
        Some(ref out) => {
            std::fs::write(out, text + "\n")?;
            info!("Wrote {:?}", out);
        }
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

/// Load [ProjectOptions] from file `config`, in the format implied by its extension.
/// Defaults apply when no file is provided, and to any fields it omits.
fn load_options(config: Option<&str>) -> Result<ProjectOptions, Box<dyn Error>> {
    let config = match config {
        Some(c) => c,
        None => return Ok(ProjectOptions::default()),
    };
    let fmt = SerializationFormat::from_path(config)
        .ok_or_else(|| format!("Unrecognized config-file format: {:?}", config))?;
    let opts = ProjectOptions::open(config, fmt)?;
    info!("Loaded {:?}", &opts);
    Ok(opts)
}

/// Select the output format: explicitly, by output-file extension, or JSON
fn output_format(options: &ProgramOptions) -> Result<SerializationFormat, Box<dyn Error>> {
    if let Some(ref fmt) = options.fmt {
        return Ok(fmt.parse()?);
    }
    let fmt = options
        .out
        .as_ref()
        .and_then(|out| SerializationFormat::from_path(out))
        .unwrap_or(SerializationFormat::Json);
    Ok(fmt)
}
