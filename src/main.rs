//! # Undulate CLI
//!
//! Command-line driver for the wave demonstrations.
//!
//! ## Usage
//!
//! ```bash
//! # List demos and their parameters
//! undulate list
//!
//! # Render the interference field after 2.5 s to a PNG
//! undulate render interference --time 2.5 --png field.png
//!
//! # Refraction into a faster medium (shows the shadow)
//! undulate render refraction --set n1=1.5 --set n2=1.0 --png shadow.png
//!
//! # Run 120 frames and print the final frame summary
//! undulate run circular --frames 120
//!
//! # Probe a point between the two sources
//! undulate probe --x 3 --z 12 --set speed=4
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use undulate::{
    Point3, UndulateError,
    demo::{self, DEMOS, Demo, interference::Interference},
    export,
};

/// Undulate - wave interference, refraction and circular-motion simulations
#[derive(Parser, Debug)]
#[command(name = "undulate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (per-frame timings)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available demos and their parameters
    List,

    /// Advance a field demo and save its color buffer as a PNG
    Render {
        /// Demo name (interference or refraction)
        demo: String,

        /// Wall-clock seconds to simulate
        #[arg(long, default_value = "0")]
        time: f64,

        /// Frame length in seconds
        #[arg(long, default_value = "0.016666667")]
        dt: f64,

        /// Parameter override, repeatable (e.g. --set period=2)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Start from randomized parameters
        #[arg(long)]
        random: bool,

        /// Output PNG path
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },

    /// Run a demo for a number of frames and print the final summary
    Run {
        /// Demo name
        demo: String,

        /// Number of frames
        #[arg(long, default_value = "60")]
        frames: usize,

        /// Frame length in seconds
        #[arg(long, default_value = "0.016666667")]
        dt: f64,

        /// Parameter override, repeatable (e.g. --set period=2)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Start from randomized parameters
        #[arg(long)]
        random: bool,
    },

    /// Compare path lengths from a point to both interference sources
    Probe {
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: f64,

        /// Height (ignored by the path comparison)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        y: f64,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z: f64,

        /// Parameter override, repeatable (e.g. --set speed=4)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("undulate=debug")
        } else {
            EnvFilter::new("undulate=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), UndulateError> {
    match command {
        Commands::List => {
            for name in DEMOS {
                let demo = demo::require(name)?;
                println!("{}", name);
                for spec in demo.param_specs() {
                    let current = demo
                        .list_params()
                        .into_iter()
                        .find(|(n, _)| *n == spec.name)
                        .map(|(_, v)| v)
                        .unwrap_or_default();
                    println!("  {:<16} {:<8} {}", spec.name, current, spec.label);
                }
            }
        }

        Commands::Render {
            demo,
            time,
            dt,
            set,
            random,
            png,
        } => {
            let mut demo = configure(&demo, random, &set)?;
            if demo.field().is_none() {
                return Err(UndulateError::Unsupported(format!(
                    "{} has no field to render",
                    demo.name()
                )));
            }
            advance(demo.as_mut(), time, dt)?;
            if let Some(grid) = demo.field() {
                export::save_png(grid, &png)?;
            }
            println!("Saved {} at t={:.3} to {}", demo.name(), demo.time(), png.display());
        }

        Commands::Run {
            demo,
            frames,
            dt,
            set,
            random,
        } => {
            let mut demo = configure(&demo, random, &set)?;
            tracing::info!(demo = demo.name(), frames, dt, "running");
            demo.tick(0.0);
            for _ in 0..frames {
                demo.tick(dt);
            }
            println!("{}", serde_json::to_string_pretty(&demo.summary()?)?);
        }

        Commands::Probe { x, y, z, set } => {
            let mut demo = Interference::default();
            for (key, value) in &set {
                demo.set_param(key, value)?;
            }
            demo.tick(0.0);
            let result = demo.select_point(Point3::new(x, y, z));
            let output = serde_json::json!({
                "params": demo.params(),
                "probe": result,
                "height": demo.probe_height(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn configure(name: &str, random: bool, set: &[(String, String)]) -> Result<Box<dyn Demo>, UndulateError> {
    let mut demo = demo::require(name)?;
    if random {
        demo.randomize();
    }
    for (key, value) in set {
        demo.set_param(key, value)?;
    }
    tracing::info!(demo = demo.name(), params = %demo.params_description(), "configured");
    Ok(demo)
}

/// Tick in steps of `dt` until `time` seconds have passed.
fn advance(demo: &mut dyn Demo, time: f64, dt: f64) -> Result<(), UndulateError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(UndulateError::InvalidConfig(format!("dt = {} (expected > 0)", dt)));
    }
    if !(time.is_finite() && time >= 0.0) {
        return Err(UndulateError::InvalidConfig(format!("time = {} (expected >= 0)", time)));
    }
    demo.tick(0.0);
    let mut remaining = time;
    while remaining > 0.0 {
        let step = dt.min(remaining);
        demo.tick(step);
        remaining -= step;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_advance_rejects_unbounded_time() {
        let mut demo = demo::require("circular").unwrap();
        assert!(advance(demo.as_mut(), f64::INFINITY, 0.1).is_err());
        assert!(advance(demo.as_mut(), f64::NAN, 0.1).is_err());
        assert!(advance(demo.as_mut(), -1.0, 0.1).is_err());
        assert!(advance(demo.as_mut(), 1.0, 0.0).is_err());
        assert_eq!(demo.time(), 0.0);
    }

    #[test]
    fn test_advance_reaches_target_time() {
        let mut demo = demo::require("refraction").unwrap();
        advance(demo.as_mut(), 0.5, 0.2).unwrap();
        assert!((demo.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val(" period = 2 ").unwrap(),
            ("period".to_string(), "2".to_string())
        );
        assert!(parse_key_val("period").is_err());
    }
}
