//! `olefield`: list the objects of Access OLE fields and extract their bitmaps
//!
//! ```sh
//! olefield photo.bin
//! olefield -o images/ --objects -vv *.bin
//! RUST_LOG=olefield=trace olefield photo.bin
//! ```

use clap::{ArgAction, Parser};
use olefield::{OleField, bitmaps, objects};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Extract bitmaps from Microsoft Access OLE object fields
#[derive(Parser, Debug)]
#[command(
    name = "olefield",
    about = "Extract bitmaps from Microsoft Access OLE object fields",
    long_about = "Lists the objects embedded in each OLE field and the bitmaps found in them.\n\
                  PBrush objects are returned as stored, METAFILEPICT objects have their\n\
                  DIBs converted to BMP files.",
    version
)]
struct Args {
    /// Raw OLE field contents, one field per file
    #[arg(value_name = "FILE", required = true)]
    input: Vec<PathBuf>,

    /// Write each bitmap to DIR as <stem>-<n>.bmp
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// List every embedded object, not only the bitmaps
    #[arg(long)]
    objects: bool,

    /// Print field names; repeat to raise the log level (ignored if RUST_LOG is set)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// `len:preview` of a byte string, eliding the middle of long ones
fn summary(bytes: &[u8]) -> String {
    let escape = |b: &[u8]| b.escape_ascii().to_string();
    if bytes.len() < 30 {
        format!("{}:{}", bytes.len(), escape(bytes))
    } else {
        format!(
            "{}:{}...{}",
            bytes.len(),
            escape(&bytes[..bytes.len().min(40)]),
            escape(&bytes[bytes.len() - 20..])
        )
    }
}

fn process(path: &Path, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(path)?;
    println!("{}", path.display());

    if args.verbose > 0 {
        let field = OleField::parse(&data)?;
        println!("  friendly name {}", summary(field.friendly_name()));
        println!("  class name    {}", summary(field.class_name()));
    }

    if args.objects {
        for object in objects(&data) {
            let object = object?;
            println!("  {} {}", object.type_name_str(), summary(object.payload));
        }
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "field".to_string());
    for (n, bmp) in bitmaps(&data).enumerate() {
        let bmp = bmp?;
        println!("  image {}", summary(&bmp));
        if let Some(dir) = &args.output_dir {
            let out = dir.join(format!("{stem}-{n}.bmp"));
            fs::write(&out, &bmp)?;
            tracing::info!(path = %out.display(), size = bmp.len(), "Wrote bitmap");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 | 1 => "warn",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Some(dir) = &args.output_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let mut status = ExitCode::SUCCESS;
    for path in &args.input {
        if let Err(e) = process(path, &args) {
            eprintln!("{}: {}", path.display(), e);
            status = ExitCode::FAILURE;
        }
    }
    status
}
