//! Single-property tweens

use crate::gfx::scene::{NodeId, Scene, Transform};

use super::ease::Ease;

/// One scalar component of a node transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Property {
    pub fn get(self, transform: &Transform) -> f32 {
        match self {
            Property::PositionX => transform.position.x,
            Property::PositionY => transform.position.y,
            Property::PositionZ => transform.position.z,
            Property::RotationX => transform.rotation.x,
            Property::RotationY => transform.rotation.y,
            Property::RotationZ => transform.rotation.z,
            Property::ScaleX => transform.scale.x,
            Property::ScaleY => transform.scale.y,
            Property::ScaleZ => transform.scale.z,
        }
    }

    pub fn set(self, transform: &mut Transform, value: f32) {
        let slot = match self {
            Property::PositionX => &mut transform.position.x,
            Property::PositionY => &mut transform.position.y,
            Property::PositionZ => &mut transform.position.z,
            Property::RotationX => &mut transform.rotation.x,
            Property::RotationY => &mut transform.rotation.y,
            Property::RotationZ => &mut transform.rotation.z,
            Property::ScaleX => &mut transform.scale.x,
            Property::ScaleY => &mut transform.scale.y,
            Property::ScaleZ => &mut transform.scale.z,
        };
        *slot = value;
    }
}

/// What a tween animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenTarget {
    pub node: NodeId,
    pub property: Property,
}

impl TweenTarget {
    pub fn new(node: NodeId, property: Property) -> Self {
        Self { node, property }
    }
}

/// Interpolates one property from its value at first render to `end`
///
/// The start value is read from the scene the first time the tween renders
/// and reused on every later render, including timeline repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub end: f32,
    /// Offset inside the owning timeline, in seconds
    pub start_time: f32,
    pub duration: f32,
    pub ease: Ease,
    start_value: Option<f32>,
}

impl Tween {
    pub fn new(target: TweenTarget, end: f32, start_time: f32, duration: f32) -> Self {
        Self {
            target,
            end,
            start_time: start_time.max(0.0),
            duration: duration.max(0.0),
            ease: Ease::default(),
            start_value: None,
        }
    }

    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    pub fn start_value(&self) -> Option<f32> {
        self.start_value
    }

    /// Linear progress at timeline-local `time`, or `None` before the start
    pub fn progress(&self, time: f32) -> Option<f32> {
        if time < self.start_time {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((time - self.start_time) / self.duration).clamp(0.0, 1.0))
    }

    /// Writes the interpolated value for timeline-local `time` into the scene
    ///
    /// Does nothing before the tween starts or when the node is gone.
    pub fn render(&mut self, time: f32, scene: &mut Scene) {
        let Some(progress) = self.progress(time) else {
            return;
        };
        let Some(transform) = scene.transform_mut(self.target.node) else {
            return;
        };

        let property = self.target.property;
        let start = *self
            .start_value
            .get_or_insert_with(|| property.get(transform));
        let value = start + (self.end - start) * self.ease.apply(progress);
        property.set(transform, value);
    }
}
