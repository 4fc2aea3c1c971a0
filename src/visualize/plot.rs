use crate::error::{Result, ScaffoldError};
use ndarray::Array2;
use ndarray_stats::QuantileExt;
use plotters::prelude::*;
use std::path::Path;

fn plot_error<E: std::fmt::Display>(e: E) -> ScaffoldError {
    ScaffoldError::Plot(e.to_string())
}

/// White to red as `intensity` goes from 0 to 1.
fn contact_color(intensity: f64) -> RGBColor {
    let fade = (255.0 * (1.0 - intensity.clamp(0.0, 1.0))) as u8;
    RGBColor(255, fade, fade)
}

/// Render a square binned contact matrix as a PNG, with lines at the group
/// `breaks` (bin offsets where each group ends).
pub fn plot_contact_heatmap(
    matrix: &Array2<f64>,
    breaks: &[usize],
    title: &str,
    output: &Path,
) -> Result<()> {
    let n = matrix.nrows();
    if n == 0 || matrix.ncols() != n {
        return Err(ScaffoldError::Plot(format!(
            "cannot draw a {:?} contact matrix",
            matrix.dim()
        )));
    }
    let max_val = *matrix.max().map_err(plot_error)?;
    let scale = if max_val > 0.0 { max_val } else { 1.0 };

    let root = BitMapBackend::new(output, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .build_cartesian_2d(0..n, 0..n)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .map_err(plot_error)?;

    // Row 0 at the top
    let cells = matrix.indexed_iter().filter(|&(_, &v)| v > 0.0).map(|((i, j), &v)| {
        let y = n - i - 1;
        Rectangle::new([(j, y), (j + 1, y + 1)], contact_color(v / scale).filled())
    });
    chart.draw_series(cells).map_err(plot_error)?;

    let lines = breaks.iter().filter(|&&b| b > 0 && b < n).flat_map(|&b| {
        [
            PathElement::new(vec![(b, 0), (b, n)], BLACK.stroke_width(1)),
            PathElement::new(vec![(0, n - b), (n, n - b)], BLACK.stroke_width(1)),
        ]
    });
    chart.draw_series(lines).map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}
