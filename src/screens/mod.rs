//! The three screens of the planner and their plain-text rendering.

mod builder;
mod landing;
mod result;

pub use builder::{RouteBuilder, CALCULATE_FAILED_MESSAGE};
pub use landing::LandingScreen;
pub use result::ResultScreen;
