use std::path::PathBuf;
use std::process::ExitCode;

use roomplot::render::RenderConfig;
use roomplot::{LoadOrigin, render_file};

const USAGE: &str = "\
Usage: roomplot [OPTIONS]

Render a room description (JSON) into a layout diagram.

Options:
  -i, --input <PATH>   Input JSON file [default: room_description.json]
  -o, --output <PATH>  Output image file; .svg, .png, .jpg, .bmp, .tif [default: room_layout.png]
      --dpi <N>        Raster resolution [default: 300]
      --margin <F>     Inset of the compass anchors from the walls [default: 0.1]
  -h, --help           Print help
  -V, --version        Print version";

#[derive(Debug)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    dpi: Option<f64>,
    margin: Option<f64>,
}

enum Command {
    Render(Args),
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut parsed = Args {
        input: PathBuf::from("room_description.json"),
        output: PathBuf::from("room_layout.png"),
        dpi: None,
        margin: None,
    };

    while let Some(arg) = args.next() {
        // accept --flag=value as well as --flag value
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "-i" | "--input" => parsed.input = PathBuf::from(value("--input")?),
            "-o" | "--output" => parsed.output = PathBuf::from(value("--output")?),
            "--dpi" => parsed.dpi = Some(number(&value("--dpi")?, "--dpi")?),
            "--margin" => parsed.margin = Some(number(&value("--margin")?, "--margin")?),
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(Command::Render(parsed))
}

fn number(text: &str, name: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("invalid value for {name}: {text}"))
}

#[cfg(feature = "tracing")]
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn run(args: Args) -> miette::Result<()> {
    let mut config = RenderConfig::default();
    if let Some(margin) = args.margin {
        config = config.with_margin(margin);
    }
    if let Some(dpi) = args.dpi {
        config = config.with_dpi(dpi);
    }

    let report = render_file(&args.input, &args.output, &config)?;
    if report.origin == LoadOrigin::Synthesized {
        println!("Input not found; wrote default scene to: {}", args.input.display());
    }
    if report.fallback_dimensions {
        eprintln!("warning: room dimensions missing or invalid, assumed 3×3×2.5m");
    }
    println!("Image saved to: {}", report.output.display());
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("roomplot {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Command::Render(args) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(report) => {
                eprintln!("{report:?}");
                ExitCode::FAILURE
            }
        },
    }
}
