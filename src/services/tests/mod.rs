//! Service implementation tests

mod map_canvas;
