//! # I/O
//!
//! File glue around the core: loading the target image and the palette,
//! writing the evolved art, and reporting the fitness history as CSV and as a
//! line chart.
//!
//! Target images may be any format the `image` crate decodes here (PNG, JPEG,
//! BMP, GIF, PNM). They are converted to 8-bit luma, resized to the grid shape
//! and normalized to `[0, 1]`.
//!
//! ## Example
//!
//! ```rust
//! use ascii_evolve::grid::Shape;
//! use ascii_evolve::io::target_from_image;
//! use image::{DynamicImage, GrayImage};
//!
//! let pixels = GrayImage::from_raw(2, 2, vec![0, 255, 255, 0]).unwrap();
//! let target = target_from_image(&DynamicImage::ImageLuma8(pixels), Shape::new(2, 2).unwrap()).unwrap();
//!
//! assert_eq!(target.values(), &[0.0, 1.0, 1.0, 0.0]);
//! ```

use std::fs;
use std::path::Path;

use image::{imageops, imageops::FilterType, DynamicImage};
use plotters::prelude::*;

use crate::{
    error::{GeneticError, Result, ResultExt},
    evolution::FitnessHistory,
    grid::{Shape, TargetGrid},
    individual::Individual,
    palette::Palette,
};

/// Pixel size of the fitness chart.
pub const PLOT_SIZE: (u32, u32) = (800, 600);

/// Reads a palette file. Surrounding whitespace is stripped and the remaining
/// characters are kept in order, darkest first.
pub fn load_palette<P: AsRef<Path>>(path: P) -> Result<Palette> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .context(format!("Failed to read palette {}", path.display()))?;
    Palette::parse(&text)
}

/// Opens an image file and turns it into a target grid of the given shape.
pub fn load_target<P: AsRef<Path>>(path: P, shape: Shape) -> Result<TargetGrid> {
    let image = image::open(path)?;
    target_from_image(&image, shape)
}

/// Decodes an in-memory image, guessing its format from the content.
pub fn decode_target(bytes: &[u8], shape: Shape) -> Result<TargetGrid> {
    let image = image::load_from_memory(bytes)?;
    target_from_image(&image, shape)
}

/// Converts `image` to luma, resizes it to `shape` and normalizes the samples.
pub fn target_from_image(image: &DynamicImage, shape: Shape) -> Result<TargetGrid> {
    let dimension = |value: usize| {
        u32::try_from(value).map_err(|_| {
            GeneticError::Configuration(format!("Grid {} is too large for an image", shape))
        })
    };
    let (width, height) = (dimension(shape.width())?, dimension(shape.height())?);

    let luma = imageops::resize(&image.to_luma8(), width, height, FilterType::Triangle);
    TargetGrid::from_luma(shape, luma.as_raw())
}

/// Writes the rendered individual, rows separated by newlines.
pub fn write_art<P: AsRef<Path>>(path: P, individual: &Individual) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, individual.render())
        .context(format!("Failed to write art to {}", path.display()))
}

/// Writes the history as CSV with the columns `generation,best,average`.
pub fn write_history<P: AsRef<Path>>(path: P, history: &FitnessHistory) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, history.to_csv())
        .context(format!("Failed to write history to {}", path.display()))
}

/// Draws best (solid) and average (dashed) fitness per generation into a PNG.
///
/// # Errors
///
/// - `Configuration` if the history is empty.
/// - `Other` if the chart cannot be drawn or saved.
pub fn plot_history<P: AsRef<Path>>(path: P, history: &FitnessHistory) -> Result<()> {
    let path = path.as_ref();
    if history.is_empty() {
        return Err(GeneticError::Configuration(
            "Cannot plot an empty fitness history".to_string(),
        ));
    }

    draw_history(path, history)
        .map_err(|e| GeneticError::Other(format!("Failed to plot {}: {}", path.display(), e)))
}

fn draw_history(
    path: &Path,
    history: &FitnessHistory,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (low, high) = history
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), (best, average)| {
            (low.min(best).min(average), high.max(best).max(average))
        });
    let pad = ((high - low) * 0.05).max(0.5);
    let (bottom, top) = (low - pad, high + pad);
    let last = (history.len() - 1).max(1) as f64;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0.0..last, bottom..top)?;

    // Axes are drawn as plain paths; tick labels would need a font backend
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, top), (0.0, bottom), (last, bottom)],
        BLACK,
    )))?;

    let best: Vec<(f64, f64)> = history
        .best()
        .iter()
        .enumerate()
        .map(|(generation, &score)| (generation as f64, score))
        .collect();
    let average: Vec<(f64, f64)> = history
        .average()
        .iter()
        .enumerate()
        .map(|(generation, &score)| (generation as f64, score))
        .collect();

    chart.draw_series(LineSeries::new(best, BLUE.stroke_width(2)))?;
    chart.draw_series(DashedLineSeries::new(average, 8, 6, RED.stroke_width(2)))?;

    root.present()?;
    Ok(())
}
