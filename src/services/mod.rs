//! Session service implementations

pub mod analysis_client;
pub mod geocoder;
pub mod info_panel;
pub mod map_canvas;

#[cfg(test)]
pub mod tests;

pub use analysis_client::*;
pub use geocoder::*;
pub use info_panel::*;
pub use map_canvas::*;
