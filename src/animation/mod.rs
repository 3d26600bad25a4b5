//! # Animation
//!
//! Property tweens grouped into timelines. A [`Timeline`] places
//! [`Tween`]s either one after another ([`Timeline::to`]) or at absolute
//! offsets ([`Timeline::to_at`]), can repeat, and is driven by the
//! [`Animator`] once per frame.

pub mod animator;
pub mod ease;
pub mod timeline;
pub mod tween;

pub use animator::Animator;
pub use ease::Ease;
pub use timeline::Timeline;
pub use tween::{Property, Tween, TweenTarget};
