mod auto_zoom;
mod controller;
mod projection;
mod transform;
mod transition;

pub use auto_zoom::{AutoZoomFlag, AutoZoomRequest, AutoZoomState, cluster_transform};
pub use controller::ViewportController;
pub use projection::{
    BaseScales, DEFAULT_DOMAIN_PADDING_RATIO, ViewportProjection, aspect_preserving_domain,
};
pub use transform::{ScaleLimits, ViewportTransform};
pub use transition::{DEFAULT_TRANSITION_SECONDS, TransitionPurpose, ViewportTransition};
