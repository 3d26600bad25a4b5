use crate::gfx::scene::Scene;

use super::timeline::Timeline;

/// Owns the running timelines
///
/// Timelines advance in the order they were started, so when two animate
/// the same property the newer one wins for that frame.
#[derive(Debug, Default)]
pub struct Animator {
    timelines: Vec<Timeline>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, timeline: Timeline) {
        log::debug!(
            "Starting timeline with {} tweens over {:.2}s",
            timeline.tweens().len(),
            timeline.total_duration()
        );
        self.timelines.push(timeline);
    }

    /// Advances every timeline and drops the finished ones
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) {
        for timeline in &mut self.timelines {
            timeline.advance(dt, scene);
        }
        self.timelines.retain(|t| !t.is_finished());
    }

    /// Stops every timeline, leaving properties where they are
    pub fn clear(&mut self) {
        self.timelines.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.timelines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Ease, Property, TweenTarget};

    #[test]
    fn test_finished_timelines_are_dropped() {
        let mut scene = Scene::new();
        let ball = scene.add_group(None, "ball").id();

        let mut animator = Animator::new();
        animator.play(Timeline::new().to(TweenTarget::new(ball, Property::PositionY), 0.2, 1.0));
        animator.play(Timeline::new().to(TweenTarget::new(ball, Property::PositionX), 0.5, 1.0));
        assert_eq!(animator.active_count(), 2);

        animator.advance(0.3, &mut scene);
        assert_eq!(animator.active_count(), 1);

        animator.advance(0.3, &mut scene);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_later_timeline_wins() {
        let mut scene = Scene::new();
        let arm = scene.add_group(None, "arm").id();
        let target = TweenTarget::new(arm, Property::RotationZ);

        let mut animator = Animator::new();
        animator.play(Timeline::new().to(target, 1.0, 1.0).with_ease(Ease::Linear));
        animator.play(Timeline::new().to(target, 1.0, -1.0).with_ease(Ease::Linear));
        animator.advance(2.0, &mut scene);

        assert_eq!(scene.node(arm).unwrap().transform.rotation.z, -1.0);
    }

    #[test]
    fn test_clear_stops_everything() {
        let mut scene = Scene::new();
        let ball = scene.add_group(None, "ball").id();
        let mut animator = Animator::new();
        animator.play(Timeline::new().to(TweenTarget::new(ball, Property::PositionY), 1.0, 5.0));
        animator.advance(0.1, &mut scene);
        let y = scene.node(ball).unwrap().transform.position.y;

        animator.clear();
        animator.advance(1.0, &mut scene);
        assert!(animator.is_idle());
        assert_eq!(scene.node(ball).unwrap().transform.position.y, y);
    }
}
