//! # Court Showcase
//!
//! Builds the showcase scene (player, basketball, floor and lights) and owns
//! everything that changes it at runtime: the canned shoot, dribble and
//! reset animations, the wireframe toggle and the idle motion applied every
//! frame.
//!
//! ```
//! use courtside::court::Showcase;
//!
//! let mut showcase = Showcase::new().unwrap();
//! assert_eq!(showcase.scene().mesh_count(), 135);
//!
//! assert!(showcase.dribble());
//! for _ in 0..60 {
//!     showcase.update(1.0 / 60.0);
//! }
//! assert!(showcase.reset_pose());
//! ```

pub mod ball;
pub mod face;
pub mod floor;
pub mod jersey;
pub mod lighting;
pub mod player;
pub mod shoe;

pub use ball::{build_basketball, BALL_HOME};
pub use floor::build_floor;
pub use lighting::setup_lighting;
pub use player::{build_player, PlayerRig, ARM_REST_ANGLE};

use std::{collections::BTreeSet, f32::consts::PI};

use cgmath::Vector3;

use crate::{
    animation::{Animator, Ease, Property, Timeline, TweenTarget},
    error::GeometryError,
    gfx::{
        color::Color,
        scene::{NodeId, Scene},
    },
};

/// Idle spin of the ball around its vertical axis
const BALL_SPIN_RATE: f32 = 0.3;

/// Node handle of the basketball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallRig {
    pub ball: NodeId,
}

/// Scene plus the handles and clocks needed to animate it
pub struct Showcase {
    scene: Scene,
    player: Option<PlayerRig>,
    ball: Option<BallRig>,
    animator: Animator,
    elapsed: f32,
    wireframe: bool,
}

impl Showcase {
    /// Builds lights, player, basketball and floor
    pub fn new() -> Result<Self, GeometryError> {
        let mut scene = Scene::new();
        scene.background = Color::from_hex(0xf0f0f0);

        setup_lighting(&mut scene);
        let player = build_player(&mut scene)?;
        let ball = build_basketball(&mut scene);
        build_floor(&mut scene);

        let stats = scene.statistics();
        log::info!(
            "Showcase ready: {} meshes, {} lights, {} materials, {} triangles",
            stats.mesh_count,
            stats.light_count,
            stats.material_count,
            stats.total_triangles
        );

        Ok(Self {
            scene,
            player: Some(player),
            ball: Some(BallRig { ball }),
            animator: Animator::new(),
            elapsed: 0.0,
            wireframe: false,
        })
    }

    /// A showcase with nothing in it; every animation request is ignored
    pub fn empty() -> Self {
        Self {
            scene: Scene::new(),
            player: None,
            ball: None,
            animator: Animator::new(),
            elapsed: 0.0,
            wireframe: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> Option<&PlayerRig> {
        self.player.as_ref()
    }

    pub fn ball(&self) -> Option<&BallRig> {
        self.ball.as_ref()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Seconds since the showcase started updating
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Turns the player, raises the shooting arm and sends the ball off
    ///
    /// # Returns
    /// `false` without doing anything unless both player and ball exist
    pub fn shoot(&mut self) -> bool {
        let (Some(player), Some(ball)) = (self.player, self.ball) else {
            log::debug!("Shoot ignored: player or ball missing");
            return false;
        };
        let ball = ball.ball;

        let timeline = Timeline::new()
            .to(TweenTarget::new(player.root, Property::RotationY), 0.5, PI * 0.1)
            .to_at(
                TweenTarget::new(player.right_upper_arm, Property::RotationZ),
                0.3,
                -PI * 0.3,
                0.0,
            )
            .to_at(TweenTarget::new(ball, Property::PositionX), 0.8, 2.0, 0.2)
            .with_ease(Ease::Power2Out)
            .to_at(TweenTarget::new(ball, Property::PositionY), 0.8, 4.0, 0.2)
            .with_ease(Ease::Power2Out)
            .to_at(TweenTarget::new(ball, Property::PositionZ), 0.8, -3.0, 0.2)
            .with_ease(Ease::Power2Out)
            .to_at(TweenTarget::new(ball, Property::RotationX), 0.8, PI * 2.0, 0.2)
            .to_at(TweenTarget::new(ball, Property::RotationY), 0.8, PI * 2.0, 0.2);

        log::debug!("Shoot");
        self.animator.play(timeline);
        true
    }

    /// Bounces the ball to the floor and back, four times in total
    pub fn dribble(&mut self) -> bool {
        let Some(BallRig { ball }) = self.ball else {
            log::debug!("Dribble ignored: no ball");
            return false;
        };

        let timeline = Timeline::new()
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.5)
            .to(TweenTarget::new(ball, Property::PositionY), 0.3, 0.95)
            .to_at(TweenTarget::new(ball, Property::RotationX), 0.6, PI * 2.0, 0.0)
            .repeat(3);

        log::debug!("Dribble");
        self.animator.play(timeline);
        true
    }

    /// Stops running animations and puts player and ball back at rest
    pub fn reset_pose(&mut self) -> bool {
        let (Some(player), Some(BallRig { ball })) = (self.player, self.ball) else {
            log::debug!("Reset ignored: player or ball missing");
            return false;
        };

        self.animator.clear();

        if let Some(t) = self.scene.transform_mut(player.root) {
            t.rotation = Vector3::new(0.0, 0.0, 0.0);
        }
        if let Some(t) = self.scene.transform_mut(ball) {
            t.position = BALL_HOME.into();
            t.rotation = Vector3::new(0.0, 0.0, 0.0);
        }
        if let Some(t) = self.scene.transform_mut(player.left_upper_arm) {
            t.rotation.z = ARM_REST_ANGLE;
        }
        if let Some(t) = self.scene.transform_mut(player.right_upper_arm) {
            t.rotation.z = -ARM_REST_ANGLE;
        }

        log::debug!("Pose reset");
        true
    }

    /// Flips wireframe rendering for every material reachable from a mesh
    ///
    /// # Returns
    /// The new wireframe state
    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;

        let mut materials = BTreeSet::new();
        self.scene.traverse(|_, node| {
            if let Some(material) = node.material() {
                materials.insert(material);
            }
        });
        for id in materials {
            if let Some(material) = self.scene.material_mut(id) {
                material.wireframe = self.wireframe;
            }
        }

        log::debug!("Wireframe {}", if self.wireframe { "on" } else { "off" });
        self.wireframe
    }

    /// Per-frame step: idle sway and breathing, ball spin, then animations
    ///
    /// # Arguments
    /// * `dt` - Seconds since the previous update
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let t = self.elapsed;

        if let Some(player) = self.player {
            if let Some(root) = self.scene.transform_mut(player.root) {
                root.position.y = 0.05 * t.sin();
            }
            if let Some(body) = self.scene.transform_mut(player.body) {
                body.scale.y = 1.0 + 0.02 * (2.0 * t).sin();
            }
        }
        if let Some(BallRig { ball }) = self.ball {
            if let Some(ball) = self.scene.transform_mut(ball) {
                ball.rotation.y += BALL_SPIN_RATE * dt;
            }
        }

        self.animator.advance(dt, &mut self.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(showcase: &mut Showcase, seconds: f32) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            showcase.update(FRAME);
        }
    }

    fn position(showcase: &Showcase, node: NodeId) -> Vector3<f32> {
        showcase.scene().node(node).unwrap().transform.position
    }

    fn rotation(showcase: &Showcase, node: NodeId) -> Vector3<f32> {
        showcase.scene().node(node).unwrap().transform.rotation
    }

    #[test]
    fn test_initial_scene_counts() {
        let showcase = Showcase::new().unwrap();
        let scene = showcase.scene();
        let player = showcase.player().unwrap();
        let ball = showcase.ball().unwrap();

        assert_eq!(scene.mesh_count(), 135);
        assert_eq!(scene.subtree_mesh_count(player.root), 117);
        assert_eq!(scene.subtree_mesh_count(ball.ball), 16);
        assert_eq!(scene.lights().len(), 4);
        assert_eq!(scene.background.to_hex(), 0xf0f0f0);
    }

    #[test]
    fn test_shoot_moves_ball_and_arm() {
        let mut showcase = Showcase::new().unwrap();
        let player = *showcase.player().unwrap();
        let ball = showcase.ball().unwrap().ball;

        assert!(showcase.shoot());
        run(&mut showcase, 1.2);

        let p = position(&showcase, ball);
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - 4.0).abs() < 1e-5);
        assert!((p.z + 3.0).abs() < 1e-5);
        assert!((rotation(&showcase, player.root).y - PI * 0.1).abs() < 1e-5);
        assert!((rotation(&showcase, player.right_upper_arm).z + PI * 0.3).abs() < 1e-5);
        assert!(showcase.animator().is_idle());
    }

    #[test]
    fn test_reset_restores_rest_pose_after_shoot() {
        let mut showcase = Showcase::new().unwrap();
        let player = *showcase.player().unwrap();
        let ball = showcase.ball().unwrap().ball;

        showcase.shoot();
        run(&mut showcase, 0.5);
        assert!(showcase.reset_pose());

        assert_eq!(rotation(&showcase, player.root), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(position(&showcase, ball), Vector3::new(-0.6, 0.95, 0.2));
        assert_eq!(rotation(&showcase, ball), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(rotation(&showcase, player.left_upper_arm).z, PI / 12.0);
        assert_eq!(rotation(&showcase, player.right_upper_arm).z, -PI / 12.0);
        assert!(showcase.animator().is_idle());

        // the cancelled shot must not pull the ball away again
        run(&mut showcase, 1.0);
        assert_eq!(position(&showcase, ball), Vector3::new(-0.6, 0.95, 0.2));
    }

    #[test]
    fn test_dribble_plays_four_bounces() {
        let mut showcase = Showcase::new().unwrap();
        let ball = showcase.ball().unwrap().ball;

        assert!(showcase.dribble());
        run(&mut showcase, 1.5);
        assert!(!showcase.animator().is_idle());

        run(&mut showcase, 1.0);
        assert!(showcase.animator().is_idle());
        assert!((position(&showcase, ball).y - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_wireframe_toggles_every_material() {
        let mut showcase = Showcase::new().unwrap();
        let before: Vec<bool> = showcase
            .scene()
            .material_manager
            .iter()
            .map(|(_, m)| m.wireframe)
            .collect();

        assert!(showcase.toggle_wireframe());
        assert!(showcase
            .scene()
            .material_manager
            .iter()
            .all(|(_, m)| m.wireframe));

        assert!(!showcase.toggle_wireframe());
        let after: Vec<bool> = showcase
            .scene()
            .material_manager
            .iter()
            .map(|(_, m)| m.wireframe)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_wireframe_flag_is_global() {
        let mut showcase = Showcase::new().unwrap();
        let ball = showcase.ball().unwrap().ball;
        let leather = showcase.scene().node(ball).unwrap().material().unwrap();
        showcase.scene_mut().material_mut(leather).unwrap().wireframe = true;

        showcase.toggle_wireframe();
        showcase.toggle_wireframe();

        // the showcase flag wins over a material's own setting
        assert!(!showcase.scene().material(leather).unwrap().wireframe);
    }

    fn player_parts(showcase: &Showcase, name: &str) -> Vec<(NodeId, Vector3<f32>)> {
        let scene = showcase.scene();
        let root = showcase.player().unwrap().root;
        scene
            .children(root)
            .iter()
            .filter(|&&id| scene.node(id).unwrap().name == name)
            .map(|&id| (id, rotation(showcase, id)))
            .collect()
    }

    #[test]
    fn test_shoot_raises_arm_not_abs() {
        let mut showcase = Showcase::new().unwrap();
        let abs = player_parts(&showcase, "ab");
        assert_eq!(abs.len(), 3);

        showcase.shoot();
        run(&mut showcase, 1.2);

        for (id, before) in abs {
            assert_eq!(rotation(&showcase, id), before);
        }
    }

    #[test]
    fn test_reset_leaves_face_untouched() {
        let mut showcase = Showcase::new().unwrap();
        let mut face = player_parts(&showcase, "side beard");
        face.extend(player_parts(&showcase, "eyebrow"));
        assert_eq!(face.len(), 4);

        showcase.shoot();
        run(&mut showcase, 0.4);
        showcase.reset_pose();

        for (id, before) in face {
            assert_eq!(rotation(&showcase, id), before);
        }
    }

    #[test]
    fn test_empty_showcase_ignores_requests() {
        let mut showcase = Showcase::empty();
        assert!(!showcase.shoot());
        assert!(!showcase.dribble());
        assert!(!showcase.reset_pose());
        assert!(showcase.animator().is_idle());

        showcase.update(FRAME);
        assert_eq!(showcase.scene().mesh_count(), 0);
    }

    #[test]
    fn test_idle_motion() {
        let mut showcase = Showcase::new().unwrap();
        let player = *showcase.player().unwrap();
        let ball = showcase.ball().unwrap().ball;

        run(&mut showcase, 1.0);
        let t = showcase.elapsed();
        assert!((position(&showcase, player.root).y - 0.05 * t.sin()).abs() < 1e-5);
        let breathing = showcase.scene().node(player.body).unwrap().transform.scale.y;
        assert!((breathing - (1.0 + 0.02 * (2.0 * t).sin())).abs() < 1e-5);
        // 0.005 rad per frame at 60 Hz
        assert!((rotation(&showcase, ball).y - BALL_SPIN_RATE * t).abs() < 1e-3);
    }
}
