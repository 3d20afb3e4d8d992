pub mod dpi;
pub mod preprocessing;
pub mod resize;

pub use dpi::calculate_optimal_dpi;
pub use preprocessing::{NormalizeResult, normalize_image_dpi};
