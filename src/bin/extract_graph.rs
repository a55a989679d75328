use pixel_graph::analysis::analyze_grid;
use pixel_graph::config::load_config;
use pixel_graph::image::io::{load_grayscale_image, save_mask_png, write_json_file};
use std::env;
use std::path::Path;
use std::sync::Arc;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mask = gray
        .threshold(config.threshold.threshold, config.threshold.polarity)
        .map_err(|e| format!("Failed to threshold {}: {e}", config.input.display()))?;
    if let Some(path) = &config.output.mask_png {
        save_mask_png(&mask, path)?;
    }

    let result = analyze_grid(Arc::new(mask), &config.params).map_err(|e| e.to_string())?;
    write_json_file(&config.output.json_out, &result)?;
    println!("{}", result.report.summary());
    println!("Saved graphs to {}", config.output.json_out.display());

    if let Some(path) = &config.output.skeleton_png {
        let skeleton = result.skeleton_grid().map_err(|e| e.to_string())?;
        save_mask_png(&skeleton, path)?;
        println!("Saved skeleton image to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: extract_graph <config.json>".to_string()
}
