//! Pure session logic with no I/O

pub mod geometry;
pub mod report;

pub use geometry::ring_to_polygon;
pub use report::{format_stat, render_statistics};
