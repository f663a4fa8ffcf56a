//! Application state module

mod app_state;
mod draft;
mod forms;
mod map;
mod previews;

pub use app_state::*;
pub use draft::*;
pub use forms::*;
pub use map::*;
pub use previews::*;
