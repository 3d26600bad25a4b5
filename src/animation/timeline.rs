//! Tween timelines with positioning and repeats

use crate::gfx::scene::Scene;

use super::{
    ease::Ease,
    tween::{Tween, TweenTarget},
};

/// An ordered set of tweens played against a shared clock
///
/// ```
/// use courtside::animation::{Ease, Property, Timeline, TweenTarget};
/// # use courtside::gfx::scene::Scene;
/// # let mut scene = Scene::new();
/// # let ball = scene.add_group(None, "ball").position(-0.6, 0.95, 0.2).id();
///
/// let bounce = Timeline::new()
///     .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.5)
///     .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.95)
///     .to_at(TweenTarget::new(ball, Property::RotationX), 0.6, std::f32::consts::TAU, 0.0)
///     .with_ease(Ease::Linear)
///     .repeat(3);
/// assert_eq!(bounce.duration(), 0.6);
/// assert!((bounce.total_duration() - 2.4).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    repeat: u32,
    time: f32,
    iteration: u32,
    finished: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tween at the current end of the timeline
    ///
    /// # Arguments
    /// * `target` - Node property to animate
    /// * `duration` - Tween length in seconds
    /// * `end` - Final property value
    pub fn to(self, target: TweenTarget, duration: f32, end: f32) -> Self {
        let position = self.duration();
        self.to_at(target, duration, end, position)
    }

    /// Places a tween at an absolute `position` in seconds
    pub fn to_at(mut self, target: TweenTarget, duration: f32, end: f32, position: f32) -> Self {
        self.tweens.push(Tween::new(target, end, position, duration));
        self
    }

    /// Sets the ease of the most recently added tween
    pub fn with_ease(mut self, ease: Ease) -> Self {
        if let Some(last) = self.tweens.last_mut() {
            last.ease = ease;
        }
        self
    }

    /// Plays the timeline `count` extra times after the first pass
    pub fn repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    /// Length of one pass in seconds
    pub fn duration(&self) -> f32 {
        self.tweens
            .iter()
            .map(Tween::end_time)
            .fold(0.0, f32::max)
    }

    /// Length of all passes in seconds
    pub fn total_duration(&self) -> f32 {
        self.duration() * (self.repeat + 1) as f32
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Zero-based index of the pass being played
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Time inside the current pass
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Moves the clock forward and applies every started tween
    ///
    /// Each pass that ends during `dt` is rendered at its end first, so
    /// final values are always reached even with large steps.
    ///
    /// # Returns
    /// `true` while the timeline still has time left
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> bool {
        if self.finished {
            return false;
        }

        let duration = self.duration();
        if duration <= 0.0 {
            self.render_at(0.0, scene);
            self.finished = true;
            return false;
        }

        self.time += dt.max(0.0);
        while self.time >= duration {
            self.render_at(duration, scene);
            if self.iteration >= self.repeat {
                self.time = duration;
                self.finished = true;
                return false;
            }
            self.iteration += 1;
            self.time -= duration;
        }

        self.render_at(self.time, scene);
        true
    }

    fn render_at(&mut self, time: f32, scene: &mut Scene) {
        for tween in &mut self.tweens {
            tween.render(time, scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Property;
    use crate::gfx::scene::NodeId;
    use std::f32::consts::TAU;

    fn ball_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let ball = scene.add_group(None, "ball").position(-0.6, 0.95, 0.2).id();
        (scene, ball)
    }

    fn y(scene: &Scene, node: NodeId) -> f32 {
        scene.node(node).unwrap().transform.position.y
    }

    #[test]
    fn test_to_appends_sequentially() {
        let (_, ball) = ball_scene();
        let timeline = Timeline::new()
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.5)
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.95)
            .to_at(TweenTarget::new(ball, Property::RotationX), 0.6, TAU, 0.0);

        let starts: Vec<f32> = timeline.tweens().iter().map(|t| t.start_time).collect();
        assert_eq!(starts, vec![0.0, 0.3, 0.0]);
        assert_eq!(timeline.duration(), 0.6);
    }

    #[test]
    fn test_absolute_position_delays_tween() {
        let (mut scene, ball) = ball_scene();
        let mut timeline = Timeline::new()
            .to_at(TweenTarget::new(ball, Property::PositionY), 0.8, 4.0, 0.2)
            .with_ease(Ease::Power2Out);

        timeline.advance(0.1, &mut scene);
        assert_eq!(y(&scene, ball), 0.95);

        timeline.advance(0.5, &mut scene);
        let mid = y(&scene, ball);
        assert!(mid > 0.95 && mid < 4.0);

        assert!(!timeline.advance(1.0, &mut scene));
        assert!((y(&scene, ball) - 4.0).abs() < 1e-6);
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_repeat_plays_extra_passes() {
        let (mut scene, ball) = ball_scene();
        let mut timeline = Timeline::new()
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.5)
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.95)
            .repeat(3);

        let mut steps = 0;
        while timeline.advance(1.0 / 60.0, &mut scene) {
            steps += 1;
            assert!(steps < 1000, "timeline never finished");
        }
        // four passes of 0.6 s at 60 Hz
        assert!((143..=145).contains(&steps), "steps = {}", steps);
        assert_eq!(timeline.iteration(), 3);
        assert!((y(&scene, ball) - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_large_step_reaches_final_values() {
        let (mut scene, ball) = ball_scene();
        let mut timeline = Timeline::new()
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.5)
            .to_at(TweenTarget::new(ball, Property::RotationX), 0.6, TAU, 0.0)
            .repeat(1);

        assert!(!timeline.advance(10.0, &mut scene));
        let node = scene.node(ball).unwrap();
        assert!((node.transform.position.y - 0.5).abs() < 1e-6);
        assert_eq!(node.transform.rotation.x, TAU);
    }

    #[test]
    fn test_start_value_captured_at_first_render() {
        let (mut scene, ball) = ball_scene();
        let mut timeline = Timeline::new()
            .to(TweenTarget::new(ball, Property::PositionY), 1.0, 2.0)
            .with_ease(Ease::Linear);

        // moved after building, before playing
        scene.transform_mut(ball).unwrap().position.y = 1.0;
        timeline.advance(0.5, &mut scene);
        assert!((y(&scene, ball) - 1.5).abs() < 1e-6);
        assert_eq!(timeline.tweens()[0].start_value(), Some(1.0));
    }

    #[test]
    fn test_empty_timeline_finishes_immediately() {
        let (mut scene, _) = ball_scene();
        let mut timeline = Timeline::new();
        assert!(!timeline.advance(0.016, &mut scene));
        assert!(timeline.is_finished());
    }
}
