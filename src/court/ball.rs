use std::f32::consts::{PI, TAU};

use crate::gfx::{
    geometry::{generate_box, generate_sphere, generate_torus},
    resources::Material,
    scene::{NodeId, Scene},
};

/// Resting position of the ball, next to the player's right hand
pub const BALL_HOME: [f32; 3] = [-0.6, 0.95, 0.2];

pub const BALL_RADIUS: f32 = 0.12;

const BUMP_COUNT: usize = 12;

/// Adds the basketball as a root mesh and returns its node
///
/// Bumps, seams and the logo are children of the ball, offset from its
/// centre, so they follow it through every animation.
pub fn build_basketball(scene: &mut Scene) -> NodeId {
    let sphere = scene.add_geometry(generate_sphere(BALL_RADIUS, 32, 24));
    let leather = scene.add_material(Material::lambert("basketball", 0xD2691E));
    let ball = scene
        .add_mesh(None, "basketball", sphere, leather)
        .position(BALL_HOME[0], BALL_HOME[1], BALL_HOME[2])
        .cast_shadow()
        .id();

    let bump = scene.add_geometry(generate_sphere(0.005, 6, 4));
    for i in 0..BUMP_COUNT {
        let theta = i as f32 / BUMP_COUNT as f32 * TAU;
        let material = scene.add_material(Material::lambert("ball bump", 0xB05A1E));
        scene
            .add_mesh(Some(ball), "ball bump", bump, material)
            .position(
                BALL_RADIUS * theta.cos(),
                BALL_RADIUS * theta.sin(),
                0.01 * (i as f32).sin(),
            );
    }

    let seam = scene.add_geometry(generate_torus(BALL_RADIUS, 0.005, 8, 40, TAU));
    let black = scene.add_material(Material::lambert("ball seam", 0x000000));
    scene
        .add_mesh(Some(ball), "ball seam", seam, black)
        .rotation(PI / 2.0, 0.0, 0.0);
    scene
        .add_mesh(Some(ball), "ball seam", seam, black)
        .rotation(0.0, 0.0, PI / 2.0);

    let logo = scene.add_geometry(generate_box(0.08, 0.02, 0.001));
    let ink = scene.add_material(Material::lambert("ball logo", 0x000000));
    scene
        .add_mesh(Some(ball), "ball logo", logo, ink)
        .position(0.0, BALL_RADIUS, 0.0);

    ball
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3, Vector4};

    #[test]
    fn test_basketball_mesh_count() {
        let mut scene = Scene::new();
        let ball = build_basketball(&mut scene);
        assert_eq!(scene.mesh_count(), 16);
        assert_eq!(scene.subtree_mesh_count(ball), 16);
        assert_eq!(scene.roots(), &[ball]);
    }

    #[test]
    fn test_bumps_sit_on_the_equator() {
        let mut scene = Scene::new();
        let ball = build_basketball(&mut scene);

        let bumps: Vec<_> = scene
            .children(ball)
            .iter()
            .map(|&c| scene.node(c).unwrap())
            .filter(|n| n.name == "ball bump")
            .collect();
        assert_eq!(bumps.len(), BUMP_COUNT);
        for bump in bumps {
            let p = bump.transform.position;
            let radial = (p.x * p.x + p.y * p.y).sqrt();
            assert!((radial - BALL_RADIUS).abs() < 1e-5);
        }
    }

    #[test]
    fn test_children_follow_the_ball() {
        let mut scene = Scene::new();
        let ball = build_basketball(&mut scene);
        let logo = scene.find_by_name("ball logo").unwrap();

        scene.transform_mut(ball).unwrap().position = Vector3::new(2.0, 4.0, -3.0);
        let world = scene.world_matrix(logo) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let expected = Vector3::new(2.0, 4.0 + BALL_RADIUS, -3.0);
        assert!((world.truncate() - expected).magnitude() < 1e-5);
    }
}
