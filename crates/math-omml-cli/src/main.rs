use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{LevelFilter, debug};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use math_omml::{LatexError, LatexToOmml, MathDisplay};

mod config_file;

use config_file::load_config_file;

/// Converts LaTeX formulas to Office Math Markup
#[derive(Parser, Debug)]
#[command(version, about = "Converts LaTeX formulas to Office Math Markup (OMML)", long_about = None)]
struct Args {
    /// Specifies a single LaTeX formula; read from stdin if omitted
    #[arg(short, long)]
    formula: Option<String>,

    /// Sets the display style for the formula to "inline"
    #[arg(short, long, group = "mode")]
    inline: bool,

    /// Sets the display style for the formula to "block" (the default)
    #[arg(short, long, group = "mode")]
    block: bool,

    /// Reads converter settings from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logs skipped commands and other details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match args.config {
        Some(ref path) => load_config_file(path).unwrap_or_else(|e| exit_config_error(&e, path)),
        None => config_file::Config::default(),
    };
    debug!("using configuration {:?}", config.omml);
    let converter = LatexToOmml::new(config.omml);

    let latex = match args.formula {
        Some(ref formula) => formula.clone(),
        None => read_stdin(),
    };
    let display = if args.inline {
        MathDisplay::Inline
    } else {
        MathDisplay::Block
    };
    match converter.convert(&latex, display) {
        Ok(omml) => println!("{omml}"),
        Err(e) => exit_latex_error(&e, &latex),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Fails only if a logger is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(&e);
    }
    buffer
}

fn exit_latex_error(e: &LatexError, input: &str) -> ! {
    let source_name = "<formula>";
    let report = e.to_report(source_name, true);
    if report
        .eprint((source_name, ariadne::Source::from(input)))
        .is_err()
    {
        eprintln!("Conversion error: {e}");
    }
    std::process::exit(2);
}

fn exit_config_error(e: &config_file::ConfigError, path: &Path) -> ! {
    eprintln!("Failed to load '{}': {e}", path.display());
    std::process::exit(1);
}

fn exit_io_error(e: &std::io::Error) -> ! {
    eprintln!("IO Error: {e}");
    std::process::exit(1);
}
