// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path;

use svgframes::{Document, Options, UnrankedFrames, XmlOptions};

macro_rules! timed {
    ($args:expr, $name:expr, $task:expr) => {
        if $args.perf {
            let now = std::time::Instant::now();
            let res = $task;
            eprintln!("{}: {:.2}ms", $name, now.elapsed().as_micros() as f64 / 1000.0);
            res
        } else {
            $task
        }
    };
}

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    let svg_data = timed!(args, "Reading", {
        if args.in_svg == "-" {
            use std::io::Read;
            let mut buf = String::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle.read_to_string(&mut buf).map_err(|_| "failed to read stdin")?;
            buf
        } else {
            std::fs::read_to_string(&args.in_svg).map_err(|_| "failed to open the provided file")?
        }
    });

    let doc = timed!(args, "Processing", Document::convert(&svg_data, &args.opt))
        .map_err(|e| e.to_string())?;

    let xml = timed!(args, "Writing", doc.to_string(&XmlOptions::default()));
    match args.out_xml {
        Some(ref path) => std::fs::write(path, xml).map_err(|_| "failed to write the output file")?,
        None => print!("{}", xml),
    }

    if let Some(ref path) = args.relabel {
        std::fs::write(path, doc.relabeled_svg()).map_err(|_| "failed to write the relabeled SVG")?;
    }

    Ok(())
}

const HELP: &str = "\
svgframes extracts presentation frames from an annotated SVG drawing.

USAGE:
  svgframes [OPTIONS] <in-svg> [out-xml]  # from file to file
  svgframes [OPTIONS] - [out-xml]         # from stdin

  svgframes slides.svg frames.xml
  svgframes --frame-layer Frames --relabel relabeled.svg slides.svg frames.xml

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --frame-layer LABEL           Uses only rectangles inside this layer as frames
  --annotation-layer LABEL      Uses only texts inside this layer as labels
  --path-layer LABEL            Uses paths inside this layer as transition paths
  --row-height HEIGHT           Sets a row height used to order unranked frames
                                [default: 50]
  --skip-unranked               Do not export frames without a rank label
  --set KEY=VALUE               Overrides a frame attribute for all frames
                                Example: --set timeout-enable=true
                                This option can be set multiple times
  --relabel PATH                Saves the SVG with rank labels replaced by
                                the final frame indices

  --perf                        Prints performance stats
  --quiet                       Disables warnings
  --verbose                     Enables debug messages

ARGS:
  <in-svg>                      Input file
  [out-xml]                     Output file. Prints to stdout when not set
";

#[derive(Debug)]
struct CliArgs {
    frame_layer: Option<String>,
    annotation_layer: Option<String>,
    path_layer: Option<String>,
    row_height: Option<f64>,
    skip_unranked: bool,
    defaults: Vec<(String, String)>,
    relabel: Option<path::PathBuf>,

    perf: bool,
    quiet: bool,
    verbose: bool,

    input: String,
    output: Option<path::PathBuf>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        frame_layer:        input.opt_value_from_str("--frame-layer")?,
        annotation_layer:   input.opt_value_from_str("--annotation-layer")?,
        path_layer:         input.opt_value_from_str("--path-layer")?,
        row_height:         input.opt_value_from_fn("--row-height", parse_row_height)?,
        skip_unranked:      input.contains("--skip-unranked"),
        defaults:           input.values_from_fn("--set", parse_key_value)?,
        relabel:            input.opt_value_from_str("--relabel")?,

        perf:               input.contains("--perf"),
        quiet:              input.contains("--quiet"),
        verbose:            input.contains("--verbose"),

        input:              input.free_from_str()?,
        output:             input.opt_free_from_str()?,
    })
}

fn parse_row_height(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid row height")?;

    if n.is_finite() && n > 0.0 {
        Ok(n)
    } else {
        Err("HEIGHT should be positive".to_string())
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err("expected KEY=VALUE".to_string()),
    }
}

struct Args {
    in_svg: String,
    out_xml: Option<path::PathBuf>,
    relabel: Option<path::PathBuf>,
    perf: bool,
    quiet: bool,
    verbose: bool,
    opt: Options,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    if args.quiet && args.verbose {
        eprintln!("Warning: --verbose has no effect with --quiet.");
    }

    let unranked = if args.skip_unranked {
        UnrankedFrames::Skip
    } else {
        UnrankedFrames::ReadingOrder
    };

    let default_opt = Options::default();
    let opt = Options {
        frame_layer: args.frame_layer,
        annotation_layer: args.annotation_layer,
        path_layer: args.path_layer,
        row_height: args.row_height.unwrap_or(default_opt.row_height),
        unranked,
        defaults: args.defaults,
    };

    Ok(Args {
        in_svg: args.input,
        out_xml: args.output,
        relabel: args.relabel,
        perf: args.perf,
        quiet: args.quiet,
        verbose: args.verbose,
        opt,
    })
}

static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn  => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
                log::Level::Info  => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
