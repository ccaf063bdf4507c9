extern crate clap;
extern crate fractalgen;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::PathBuf;
use std::str::FromStr;

use fractalgen::koch::{self, KochCurveConfig, KochSnowflakeConfig};
use fractalgen::mandelbrot::{self, MandelbrotConfig};
use fractalgen::raster::Color;
use fractalgen::sink::SinkError;

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses a comma-separated triple of channel intensities.
fn parse_color(s: &str) -> Option<Color> {
    let mut channels = s.split(',').map(f64::from_str);
    match (
        channels.next(),
        channels.next(),
        channels.next(),
        channels.next(),
    ) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Some(Color(r, g, b)),
        _ => None,
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_dimensions(s: String) -> Result<(), String> {
    match parse_pair::<usize>(&s, 'x') {
        Some((w, h)) => {
            if w > 0 && h > 0 {
                Ok(())
            } else {
                Err("Image dimensions must be positive".to_string())
            }
        }
        None => Err("Could not parse image dimensions".to_string()),
    }
}

fn validate_color(s: String) -> Result<(), String> {
    match parse_color(&s) {
        Some(Color(r, g, b)) => {
            if r >= 0.0 && r <= 1.0 && g >= 0.0 && g <= 1.0 && b >= 0.0 && b <= 1.0 {
                Ok(())
            } else {
                Err("Color channels must be between 0 and 1".to_string())
            }
        }
        None => Err("Could not parse color".to_string()),
    }
}

const KOCH_CURVE: &str = "koch-curve";
const KOCH_SNOWFLAKE: &str = "koch-snowflake";
const MANDELBROT: &str = "mandelbrot";

const OUTPUT: &str = "output";
const FORMAT: &str = "format";
const SIZE: &str = "size";
const DIMENSION: &str = "dimension";
const ITERATIONS: &str = "iterations";
const THICKNESS: &str = "thickness";
const COLOR: &str = "color";
const MAX_ITER: &str = "max-iter";
const THREADS: &str = "threads";

/// The arguments shared by both Koch subcommands.  Only the default
/// output name differs between them.
fn stroke_args(default_output: &'static str) -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ITERATIONS)
            .long(ITERATIONS)
            .short("i")
            .takes_value(true)
            .default_value("5")
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    10,
                    "Could not parse iteration count",
                    "Iteration count must be between 1 and 10",
                )
            })
            .help("Number of refinement passes"),
        Arg::with_name(THICKNESS)
            .long(THICKNESS)
            .short("t")
            .takes_value(true)
            .default_value("0")
            .validator(|s| {
                validate_range(
                    &s,
                    0,
                    128,
                    "Could not parse the stroke thickness",
                    "Thickness must be between 0 and 128",
                )
            })
            .help("Pen half-width in pixels; 0 is a single-pixel stroke"),
        Arg::with_name(COLOR)
            .long(COLOR)
            .short("c")
            .takes_value(true)
            .default_value("1.0,1.0,1.0")
            .validator(validate_color)
            .help("Stroke color as r,g,b channel intensities in 0..1"),
        Arg::with_name(FORMAT)
            .long(FORMAT)
            .short("f")
            .takes_value(true)
            .default_value("BMP")
            .help("Output image format, used as the file extension"),
        Arg::with_name(OUTPUT)
            .long(OUTPUT)
            .short("o")
            .takes_value(true)
            .default_value(default_output)
            .help("Output file name, without the extension"),
    ]
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractalgen")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Koch snowflake and Mandelbrot set image generator")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name(KOCH_CURVE)
                .about("Draw a Koch curve grown from a horizontal baseline")
                .args(&stroke_args("koch_curve"))
                .arg(
                    Arg::with_name(SIZE)
                        .long(SIZE)
                        .short("s")
                        .takes_value(true)
                        .default_value("2048x2048")
                        .validator(validate_dimensions)
                        .help("Size of output image"),
                ),
        )
        .subcommand(
            SubCommand::with_name(KOCH_SNOWFLAKE)
                .about("Draw a closed Koch snowflake in a square image")
                .args(&stroke_args("koch_snowflake"))
                .arg(
                    Arg::with_name(DIMENSION)
                        .long(DIMENSION)
                        .short("d")
                        .takes_value(true)
                        .default_value("2048")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                16384,
                                "Could not parse the square dimension",
                                "Square dimension must be between 1 and 16384",
                            )
                        })
                        .help("Side of the square output image, in pixels"),
                ),
        )
        .subcommand(
            SubCommand::with_name(MANDELBROT)
                .about("Render the Mandelbrot set through the default gradient")
                .arg(
                    Arg::with_name(SIZE)
                        .long(SIZE)
                        .short("s")
                        .takes_value(true)
                        .default_value("1280x720")
                        .validator(validate_dimensions)
                        .help("Size of output image"),
                )
                .arg(
                    Arg::with_name(MAX_ITER)
                        .long(MAX_ITER)
                        .short("i")
                        .takes_value(true)
                        .default_value("50")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                200_000,
                                "Could not parse iteration count",
                                "Iteration count must be between 1 and 200000",
                            )
                        })
                        .help("Iteration budget per pixel"),
                )
                .arg(
                    Arg::with_name(THREADS)
                        .long(THREADS)
                        .short("t")
                        .takes_value(true)
                        .default_value("1")
                        .validator(move |s| {
                            validate_range(
                                &s,
                                1,
                                max_threads,
                                "Could not parse thread count",
                                &format!("Thread count must be between 1 and {}", max_threads),
                            )
                        })
                        .help("Number of threads to use in solver"),
                )
                .arg(
                    Arg::with_name(FORMAT)
                        .long(FORMAT)
                        .short("f")
                        .takes_value(true)
                        .default_value("BMP")
                        .help("Output image format, used as the file extension"),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .default_value("Mandelbrot")
                        .help("Output file name, without the extension"),
                ),
        )
        .get_matches()
}

fn run_koch_curve(matches: &ArgMatches) -> Result<PathBuf, SinkError> {
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let config = KochCurveConfig {
        iterations: usize::from_str(matches.value_of(ITERATIONS).unwrap())
            .expect("Could not parse iteration count"),
        width,
        height,
        thickness: usize::from_str(matches.value_of(THICKNESS).unwrap())
            .expect("Could not parse the stroke thickness"),
        color: parse_color(matches.value_of(COLOR).unwrap()).expect("Error parsing stroke color"),
        format: matches.value_of(FORMAT).unwrap().to_string(),
        file_name: matches.value_of(OUTPUT).unwrap().to_string(),
    };
    koch::generate_curve(&config)
}

fn run_koch_snowflake(matches: &ArgMatches) -> Result<PathBuf, SinkError> {
    let config = KochSnowflakeConfig {
        iterations: usize::from_str(matches.value_of(ITERATIONS).unwrap())
            .expect("Could not parse iteration count"),
        square_dimension: usize::from_str(matches.value_of(DIMENSION).unwrap())
            .expect("Could not parse the square dimension"),
        thickness: usize::from_str(matches.value_of(THICKNESS).unwrap())
            .expect("Could not parse the stroke thickness"),
        color: parse_color(matches.value_of(COLOR).unwrap()).expect("Error parsing stroke color"),
        format: matches.value_of(FORMAT).unwrap().to_string(),
        file_name: matches.value_of(OUTPUT).unwrap().to_string(),
    };
    koch::generate_snowflake(&config)
}

fn run_mandelbrot(matches: &ArgMatches) -> Result<PathBuf, SinkError> {
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let config = MandelbrotConfig {
        width,
        height,
        max_iter: usize::from_str(matches.value_of(MAX_ITER).unwrap())
            .expect("Could not parse iteration count"),
        threads: usize::from_str(matches.value_of(THREADS).unwrap())
            .expect("Could not parse thread count"),
        format: matches.value_of(FORMAT).unwrap().to_string(),
        file_name: matches.value_of(OUTPUT).unwrap().to_string(),
        ..Default::default()
    };
    mandelbrot::generate(&config)
}

fn main() {
    let matches = args();
    let result = match matches.subcommand() {
        (KOCH_CURVE, Some(sub)) => run_koch_curve(sub),
        (KOCH_SNOWFLAKE, Some(sub)) => run_koch_snowflake(sub),
        (MANDELBROT, Some(sub)) => run_mandelbrot(sub),
        _ => unreachable!(),
    };
    match result {
        Ok(path) => println!("wrote {}", path.display()),
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    }
}
