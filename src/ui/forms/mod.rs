//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `create_orphanage`: Orphanage registration page

mod create_orphanage;
mod field_renderer;

pub use create_orphanage::{draw_create_orphanage, registration_map_area};
