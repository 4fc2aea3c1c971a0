//! Contact map rendering.

pub mod plot;

pub use plot::plot_contact_heatmap;
