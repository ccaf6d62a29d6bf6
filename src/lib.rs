//! wingscope: linked-view dashboard core for wing-disc morphometrics.
//!
//! The crate keeps a size filter, a shared selection and a zoomable landmark
//! viewport consistent across independently rendered views. Drawing is left
//! to a [`render::Renderer`] implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod render;
pub mod selection;
pub mod telemetry;
pub mod viewport;
pub mod views;

pub use api::{DashboardConfig, DashboardEngine};
pub use error::{DashboardError, DashboardResult};
