//! tei2tex - convert a TEI transcription into LaTeX

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use tei2tex::{TexConfig, convert_document};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tei2tex")]
#[command(version)]
#[command(about = "Convert a TEI transcription into LaTeX with an index of persons", long_about = None)]
struct Cli {
    /// TEI XML file to convert
    input: PathBuf,

    /// LaTeX file to write ('-' for stdout)
    output: PathBuf,

    /// TOML file overriding the preamble and index heading
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("tei2tex={level}")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => TexConfig::load(path)?,
        None => TexConfig::default(),
    };

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file {}", cli.input.display()))?;

    let source = match tei_xml::decode(&bytes) {
        Ok(source) => source,
        Err(err) => report_and_exit(&err, &cli.input, &String::from_utf8_lossy(&bytes)),
    };
    let document = match tei_xml::parse(&source) {
        Ok(document) => document,
        Err(err) => report_and_exit(&err, &cli.input, &source),
    };

    let conversion = convert_document(&document, &config);
    write_output(&cli.output, &conversion.latex)?;

    info!(
        persons = conversion.registry.len(),
        pages = conversion.last_page,
        "Output: {}",
        cli.output.display()
    );
    Ok(())
}

fn report_and_exit(err: &tei_xml::Error, input: &Path, source: &str) -> ! {
    // The rendered report carries its own "Error:" header
    eprintln!("{}", err.render(&input.display().to_string(), source));
    std::process::exit(1);
}

fn write_output(path: &Path, latex: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(latex.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    std::fs::write(path, latex)
        .with_context(|| format!("Failed to write output file {}", path.display()))
}
