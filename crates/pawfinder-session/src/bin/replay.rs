//! # Scenario Replay
//!
//! Replays a recorded sequence of UI events against a fresh session and
//! prints every response as one JSON line. Used to reproduce bug reports
//! ("swiping past the last dog shows a blank card") without a browser.
//!
//! ## Usage
//! ```bash
//! # Replay a scenario with the default configuration
//! cargo run -p pawfinder-session --bin replay -- scenario.json
//!
//! # Use a specific config file
//! cargo run -p pawfinder-session --bin replay -- --config ./view.toml scenario.json
//!
//! # Show the effective configuration
//! cargo run -p pawfinder-session --bin replay -- --print-config
//! ```
//!
//! ## Scenario Format
//! ```json
//! {
//!   "dogs": [{ "id": "...", "name": "Biscuit", "createdAt": "2024-05-01T00:00:00Z" }],
//!   "steps": [
//!     { "step": "openCarousel", "name": "mobile", "dogs": ["..."] },
//!     { "step": "swipe", "carousel": "mobile", "dx": -80 },
//!     { "step": "carousel", "carousel": "mobile", "action": { "type": "next" } },
//!     { "step": "openImage", "name": "hero", "dog": "..." },
//!     { "step": "openImage", "name": "logo", "src": "/logo.png", "fallbackSrc": "/custom-placeholder.svg" },
//!     { "step": "imageFailed", "image": "hero" }
//!   ]
//! }
//! ```
//!
//! Names are local to the scenario. A step naming an instance that was
//! never opened reports `NOT_FOUND` like a stale id from the frontend.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use pawfinder_core::{CarouselAction, Dog};
use pawfinder_session::commands::{carousel, comparison, image};
use pawfinder_session::{init_tracing, ApiError, Session, ViewConfig};

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    dogs: Vec<Dog>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
enum Step {
    OpenCarousel { name: String, dogs: Vec<String> },
    Carousel { carousel: String, action: CarouselAction },
    /// Full touch gesture: start, one move halfway, end `dx` pixels away.
    Swipe { carousel: String, dx: f32 },
    CloseCarousel { carousel: String },
    OpenComparison { name: String, dogs: Vec<String> },
    CloseComparison { comparison: String },
    /// Opens a slot for `dog`'s photo, or for a raw `src`.
    OpenImage {
        name: String,
        #[serde(default)]
        dog: Option<String>,
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        alt: Option<String>,
        /// Per-slot placeholder; the configured one when absent.
        #[serde(default, rename = "fallbackSrc")]
        fallback_src: Option<String>,
    },
    ImageLoaded { image: String },
    ImageFailed { image: String },
    ImageSource {
        image: String,
        #[serde(default)]
        src: Option<String>,
    },
    CloseImage { image: String },
    DrainNotifications,
}

/// Scenario names to live instance ids.
#[derive(Default)]
struct Names {
    carousels: HashMap<String, Uuid>,
    images: HashMap<String, Uuid>,
    comparisons: HashMap<String, Uuid>,
}

fn lookup(names: &HashMap<String, Uuid>, name: &str) -> Uuid {
    names.get(name).copied().unwrap_or_else(|| {
        warn!(name, "Step refers to an instance that was never opened");
        Uuid::nil()
    })
}

fn pick_dogs(all: &[Dog], ids: &[String]) -> Result<Vec<Dog>, ApiError> {
    ids.iter()
        .map(|id| {
            all.iter()
                .find(|d| &d.id == id)
                .cloned()
                .ok_or_else(|| ApiError::validation(format!("Unknown dog in scenario: {}", id)))
        })
        .collect()
}

fn to_value<T: serde::Serialize>(result: Result<T, ApiError>) -> Value {
    match result {
        Ok(value) => json!({ "ok": value }),
        Err(err) => json!({ "error": err }),
    }
}

fn run_step(session: &Session, dogs: &[Dog], names: &mut Names, step: Step) -> Value {
    match step {
        Step::OpenCarousel { name, dogs: ids } => {
            let result = pick_dogs(dogs, &ids)
                .and_then(|picked| carousel::open_carousel(&session.carousels, picked));
            if let Ok(opened) = &result {
                names.carousels.insert(name, opened.id);
            }
            to_value(result)
        }
        Step::Carousel { carousel: name, action } => {
            let id = lookup(&names.carousels, &name);
            to_value(carousel::carousel_apply(&session.carousels, id, action))
        }
        Step::Swipe { carousel: name, dx } => {
            let id = lookup(&names.carousels, &name);
            let (x, y) = (200.0, 300.0);
            let result = carousel::carousel_gesture_start(&session.carousels, id, x, y)
                .and_then(|_| carousel::carousel_gesture_move(&session.carousels, id, x + dx / 2.0, y))
                .and_then(|_| carousel::carousel_gesture_end(&session.carousels, id, x + dx, y));
            to_value(result)
        }
        Step::CloseCarousel { carousel: name } => {
            let id = lookup(&names.carousels, &name);
            names.carousels.remove(&name);
            to_value(carousel::close_carousel(&session.carousels, id))
        }
        Step::OpenComparison { name, dogs: ids } => {
            let result = pick_dogs(dogs, &ids).and_then(|picked| {
                comparison::open_comparison(&session.comparisons, &session.carousels, picked)
            });
            if let Ok(opened) = &result {
                // The comparison's carousel answers to the same name
                names.carousels.insert(name.clone(), opened.carousel.id);
                names.comparisons.insert(name, opened.id);
            }
            to_value(result)
        }
        Step::CloseComparison { comparison: name } => {
            let id = lookup(&names.comparisons, &name);
            names.comparisons.remove(&name);
            names.carousels.remove(&name);
            to_value(comparison::close_comparison(
                &session.comparisons,
                &session.carousels,
                id,
            ))
        }
        Step::OpenImage {
            name,
            dog,
            src,
            alt,
            fallback_src,
        } => {
            let result = match dog {
                Some(dog_id) => pick_dogs(dogs, &[dog_id]).and_then(|picked| {
                    let dog = &picked[0];
                    match fallback_src.as_deref() {
                        None => image::open_dog_image(&session.images, dog),
                        Some(fallback) => image::open_image_slot(
                            &session.images,
                            dog.primary_image_url.as_deref(),
                            &dog.image_alt(),
                            Some(fallback),
                        ),
                    }
                }),
                None => image::open_image_slot(
                    &session.images,
                    src.as_deref(),
                    alt.as_deref().unwrap_or(""),
                    fallback_src.as_deref(),
                ),
            };
            if let Ok(opened) = &result {
                names.images.insert(name, opened.id);
            }
            to_value(result)
        }
        Step::ImageLoaded { image: name } => {
            let id = lookup(&names.images, &name);
            to_value(image::image_loaded(&session.images, id))
        }
        Step::ImageFailed { image: name } => {
            let id = lookup(&names.images, &name);
            to_value(image::image_failed(&session.images, id))
        }
        Step::ImageSource { image: name, src } => {
            let id = lookup(&names.images, &name);
            to_value(image::image_source_changed(&session.images, id, src))
        }
        Step::CloseImage { image: name } => {
            let id = lookup(&names.images, &name);
            names.images.remove(&name);
            to_value(image::close_image_slot(&session.images, id))
        }
        Step::DrainNotifications => to_value(image::drain_image_notifications(&session.images)),
    }
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    scenario_path: Option<PathBuf>,
    print_config: bool,
    help: bool,
}

/// Parses everything after the program name.
fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} needs a file path", args[i]))?;
                parsed.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--print-config" => parsed.print_config = true,
            "--help" | "-h" => parsed.help = true,
            other => parsed.scenario_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }
    Ok(parsed)
}

fn print_help() {
    println!("Pawfinder Scenario Replay");
    println!();
    println!("Usage: replay [OPTIONS] <SCENARIO.json>");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  View config file (default: platform config dir)");
    println!("      --print-config   Print the effective configuration as TOML");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}. Run with --help for usage.", message);
            std::process::exit(2);
        }
    };
    if args.help {
        print_help();
        return Ok(());
    }

    init_tracing();

    let config = ViewConfig::load(args.config_path)?;
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(scenario_path) = args.scenario_path else {
        eprintln!("No scenario given. Run with --help for usage.");
        std::process::exit(2);
    };

    let contents = std::fs::read_to_string(&scenario_path)?;
    let scenario: Scenario = serde_json::from_str(&contents)?;
    info!(
        path = %scenario_path.display(),
        dogs = scenario.dogs.len(),
        steps = scenario.steps.len(),
        "Replaying scenario"
    );

    let session = Session::new(config);
    let mut names = Names::default();

    for (index, step) in scenario.steps.into_iter().enumerate() {
        let outcome = run_step(&session, &scenario.dogs, &mut names, step);
        println!("{}", json!({ "index": index, "outcome": outcome }));
    }

    info!("Replay complete");
    Ok(())
}
