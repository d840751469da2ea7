//! # Receiptline CLI
//!
//! Command-line interface for receipt markup.
//!
//! ## Usage
//!
//! ```bash
//! # Print the drawing instructions for a document
//! receiptline transform receipt.txt
//!
//! # Read from stdin, 32 characters per line, JSON output
//! cat receipt.txt | receiptline transform - --cpl 32 --format json
//!
//! # Encode a barcode
//! receiptline barcode ean 590123412345 --hri
//! ```
//!
//! Set `RUST_LOG=receiptline=debug` to trace rule transitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use receiptline::{
    PrinterConfig, ReceiptError,
    barcode::{self, BarcodeSymbol, Symbology},
    sink::Recorder,
    text::Encoding,
    transform::Renderer,
};

/// Receiptline - receipt markup to drawing instructions
#[derive(Parser, Debug)]
#[command(name = "receiptline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform a markup document and print the drawing instructions
    Transform {
        /// Markup file, or `-` for stdin
        file: PathBuf,

        /// Characters per line (overrides the config file)
        #[arg(long)]
        cpl: Option<usize>,

        /// Character encoding (overrides the config file)
        #[arg(long)]
        encoding: Option<Encoding>,

        /// JSON printer configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::List)]
        format: Format,
    },

    /// Encode a 1D barcode and print its bar widths as JSON
    Barcode {
        /// upc, ean, jan, code39, itf, codabar, nw7, code93, code128
        symbology: Symbology,

        data: String,

        /// Module width in dots (2-4)
        #[arg(long, default_value = "2")]
        module: u32,

        /// Bar height in dots (24-240)
        #[arg(long, default_value = "72")]
        height: u32,

        /// Include human readable text
        #[arg(long)]
        hri: bool,

        /// Add quiet zones
        #[arg(long)]
        quiet_zone: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One instruction per line
    List,
    /// The instruction program as JSON
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ReceiptError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform {
            file,
            cpl,
            encoding,
            config,
            format,
        } => {
            let mut printer = match config {
                Some(path) => PrinterConfig::from_json(&std::fs::read_to_string(path)?)?,
                None => PrinterConfig::default(),
            };
            if let Some(cpl) = cpl {
                printer.cpl = cpl;
            }
            if let Some(encoding) = encoding {
                printer.encoding = encoding;
            }
            printer.validate()?;

            let doc = read_document(&file)?;
            let renderer = Renderer::new(Recorder::new());
            renderer.transform(&doc, &printer).await?;
            let program = renderer.into_inner().into_program();

            match format {
                Format::List => print!("{}", program),
                Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
            }
        }

        Commands::Barcode {
            symbology,
            data,
            module,
            height,
            hri,
            quiet_zone,
        } => {
            if symbology == Symbology::QrCode {
                return Err(ReceiptError::Config(
                    "QR codes are drawn by the renderer; use a 1D symbology".to_string(),
                ));
            }
            let symbol = BarcodeSymbol {
                data,
                symbology,
                module,
                height,
                hri,
                quiet_zone,
            };
            let form = barcode::encode(&symbol);
            if form.is_empty() {
                return Err(ReceiptError::Config(format!(
                    "'{}' is not valid {} data",
                    symbol.data, symbol.symbology
                )));
            }
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
    }

    Ok(())
}

fn read_document(file: &Path) -> Result<String, ReceiptError> {
    if file.as_os_str() == "-" {
        let mut doc = String::new();
        std::io::stdin().read_to_string(&mut doc)?;
        Ok(doc)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}
