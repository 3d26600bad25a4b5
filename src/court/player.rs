//! The player figure: torso, head, limbs, shoes and jersey under one group

use std::f32::consts::PI;

use crate::{
    error::GeometryError,
    gfx::{
        color::Color,
        geometry::{generate_cylinder, generate_sphere, generate_sphere_section},
        resources::Material,
        scene::{NodeId, Scene},
    },
};

use super::{
    face::{add_beard, add_eye, add_eyebrows, add_face_features, add_hair},
    jersey::build_jersey,
    shoe::{build_shoe, Side},
};

/// Rest roll of the upper arms; the left arm uses `+`, the right arm `-`
pub const ARM_REST_ANGLE: f32 = PI / 12.0;

const SKIN: u32 = 0x8B5C2B;
const SKIN_TOP: u32 = 0x9C6B3B;
const SKIN_BOTTOM: u32 = 0x6B3A1B;

/// Node handles the showcase animates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRig {
    pub root: NodeId,
    pub body: NodeId,
    pub left_upper_arm: NodeId,
    pub right_upper_arm: NodeId,
}

/// Builds the full figure under a root group named `player`
///
/// One skin material is shared by every skin-coloured part; only the body
/// and head geometries carry the vertical skin gradient.
pub fn build_player(scene: &mut Scene) -> Result<PlayerRig, GeometryError> {
    let root = scene.add_group(None, "player").id();
    let skin = scene.add_material(Material::lambert("skin", SKIN).with_vertex_colors());
    let (top, bottom) = (Color::from_hex(SKIN_TOP), Color::from_hex(SKIN_BOTTOM));

    // torso
    let mut torso = generate_cylinder(0.38, 0.23, 1.22, 40);
    torso.apply_vertical_gradient(top, bottom);
    let torso = scene.add_geometry(torso);
    let body = scene
        .add_mesh(Some(root), "body", torso, skin)
        .position(0.0, 1.4, 0.0)
        .cast_shadow()
        .id();

    let pecs = scene.add_geometry(generate_sphere_section(0.18, 24, 16, 0.0, PI, 0.0, PI));
    scene
        .add_mesh(Some(root), "pecs", pecs, skin)
        .position(0.0, 1.95, 0.18)
        .scale(1.2, 0.5, 0.5);

    let ab = scene.add_geometry(generate_sphere(0.07, 16, 12));
    for i in 0..3 {
        scene
            .add_mesh(Some(root), "ab", ab, skin)
            .position(0.0, 1.5 - i as f32 * 0.13, 0.19)
            .scale(1.1, 0.6, 0.5);
    }

    // head
    let mut head = generate_sphere(0.22, 32, 24);
    head.apply_vertical_gradient(top, bottom);
    let head = scene.add_geometry(head);
    scene
        .add_mesh(Some(root), "head", head, skin)
        .position(0.0, 2.3, 0.0)
        .cast_shadow();

    add_eye(scene, root, -0.07, 2.36, 0.18);
    add_eye(scene, root, 0.07, 2.36, 0.18);
    add_face_features(scene, root, skin);
    add_hair(scene, root);
    add_beard(scene, root);
    add_eyebrows(scene, root);

    // arms
    let shoulder = scene.add_geometry(generate_sphere(0.13, 20, 16));
    for x in [-0.41, 0.41] {
        scene
            .add_mesh(Some(root), "shoulder", shoulder, skin)
            .position(x, 1.95, 0.0)
            .scale(1.2, 0.9, 1.1);
    }

    let upper_arm = scene.add_geometry(generate_cylinder(0.11, 0.09, 0.45, 24));
    let left_upper_arm = scene
        .add_mesh(Some(root), "left upper arm", upper_arm, skin)
        .position(-0.38, 1.6, 0.0)
        .rotation(0.0, 0.0, ARM_REST_ANGLE)
        .cast_shadow()
        .id();
    let right_upper_arm = scene
        .add_mesh(Some(root), "right upper arm", upper_arm, skin)
        .position(0.38, 1.6, 0.0)
        .rotation(0.0, 0.0, -ARM_REST_ANGLE)
        .cast_shadow()
        .id();

    let bicep = scene.add_geometry(generate_sphere(0.10, 16, 12));
    for x in [-0.38, 0.38] {
        scene
            .add_mesh(Some(root), "bicep", bicep, skin)
            .position(x, 1.45, 0.04)
            .scale(1.2, 0.7, 1.1);
    }

    let forearm = scene.add_geometry(generate_cylinder(0.09, 0.07, 0.38, 20));
    for (x, roll) in [(-0.41, ARM_REST_ANGLE), (0.41, -ARM_REST_ANGLE)] {
        scene
            .add_mesh(Some(root), "forearm", forearm, skin)
            .position(x, 1.2, 0.0)
            .rotation(0.0, 0.0, roll)
            .cast_shadow();
    }

    let hand = scene.add_geometry(generate_sphere(0.08, 16, 12));
    for x in [-0.45, 0.45] {
        scene
            .add_mesh(Some(root), "hand", hand, skin)
            .position(x, 0.95, 0.0)
            .cast_shadow();
    }

    let finger = scene.add_geometry(generate_sphere(0.018, 8, 6));
    for x in [-0.45, 0.45] {
        for i in -2..=2 {
            scene
                .add_mesh(Some(root), "finger", finger, skin)
                .position(x + i as f32 * 0.025, 0.91, 0.07);
        }
    }

    // legs
    let thigh = scene.add_geometry(generate_cylinder(0.15, 0.12, 0.55, 24));
    let calf = scene.add_geometry(generate_cylinder(0.11, 0.09, 0.45, 20));
    for (name, geometry, y) in [("thigh", thigh, 0.65), ("calf", calf, 0.25)] {
        for x in [-0.16, 0.16] {
            scene
                .add_mesh(Some(root), name, geometry, skin)
                .position(x, y, 0.0)
                .cast_shadow();
        }
    }

    build_shoe(scene, root, Side::Left)?;
    build_shoe(scene, root, Side::Right)?;
    build_jersey(scene, root);

    log::debug!(
        "Built player with {} meshes",
        scene.subtree_mesh_count(root)
    );

    Ok(PlayerRig {
        root,
        body,
        left_upper_arm,
        right_upper_arm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_mesh_count() {
        let mut scene = Scene::new();
        let rig = build_player(&mut scene).unwrap();
        assert_eq!(scene.subtree_mesh_count(rig.root), 117);
        assert_eq!(scene.roots(), &[rig.root]);
    }

    #[test]
    fn test_skin_material_is_shared() {
        let mut scene = Scene::new();
        let rig = build_player(&mut scene).unwrap();

        let skin = scene.node(rig.body).unwrap().material();
        let sharing = scene
            .mesh_nodes()
            .into_iter()
            .filter(|&id| scene.node(id).unwrap().material() == skin)
            .count();
        // torso, pecs, 3 abs, head, nose, jaw, 2 shoulders, 2 upper arms,
        // 2 biceps, 2 forearms, 2 hands, 10 fingers, 2 thighs, 2 calves
        assert_eq!(sharing, 32);

        let skin = scene.material(skin.unwrap()).unwrap();
        assert!(skin.vertex_colors);
    }

    #[test]
    fn test_only_body_and_head_have_gradient() {
        let mut scene = Scene::new();
        let rig = build_player(&mut scene).unwrap();
        let head = scene.find_by_name("head").unwrap();

        for id in [rig.body, head] {
            let geometry = scene.node(id).unwrap().geometry().unwrap();
            assert!(!scene.geometry(geometry).unwrap().colors.is_empty());
        }
        let arm = scene.node(rig.left_upper_arm).unwrap().geometry().unwrap();
        assert!(scene.geometry(arm).unwrap().colors.is_empty());
    }

    #[test]
    fn test_upper_arms_rest_pose() {
        let mut scene = Scene::new();
        let rig = build_player(&mut scene).unwrap();
        let left = scene.node(rig.left_upper_arm).unwrap();
        let right = scene.node(rig.right_upper_arm).unwrap();

        assert_eq!(left.transform.rotation.z, ARM_REST_ANGLE);
        assert_eq!(right.transform.rotation.z, -ARM_REST_ANGLE);
        assert!(left.cast_shadow && right.cast_shadow);
    }
}
