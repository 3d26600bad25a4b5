//! # Courtside Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use courtside::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ViewerConfig::default().with_title("Warm-up");
//!     CourtsideApp::new(config)?.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::CourtsideApp;
pub use crate::config::ViewerConfig;
pub use crate::error::{ConfigError, CourtsideError, GeometryError};

// Re-export the showcase and animation types
pub use crate::animation::{Animator, Ease, Property, Timeline, TweenTarget};
pub use crate::court::{PlayerRig, Showcase};

// Re-export graphics and scene types
pub use crate::gfx::color::Color;
pub use crate::gfx::geometry::GeometryData;
pub use crate::gfx::resources::Material;
pub use crate::gfx::scene::{Light, NodeId, Scene};

// Re-export performance monitoring
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

// Re-export common external dependencies
pub use cgmath::Vector3;
