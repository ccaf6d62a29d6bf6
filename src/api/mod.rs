//! Public dashboard facade.
//!
//! `DashboardEngine` is split across controller files by concern; each file
//! adds one `impl` block to the same type.

mod data_controller;
mod engine;
mod engine_config;
mod filter_controller;
mod invalidation;
mod observer;
mod observer_registry;
mod render_coordinator;
mod selection_controller;
mod viewport_controller;

pub use engine::DashboardEngine;
pub use engine_config::DashboardConfig;
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use observer::{DashboardContext, DashboardEvent, DashboardObserver};
