//! Sneakers, built as a group of 23 meshes around the shoe origin

use std::f32::consts::PI;

use crate::{
    error::GeometryError,
    gfx::{
        geometry::{
            extrude_shape, generate_box, generate_cylinder, generate_sphere_section, Shape,
        },
        resources::Material,
        scene::{NodeId, Scene},
    },
};

/// Which foot a shoe is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Depth of the extruded side logo
const SWOOSH_DEPTH: f32 = 0.004;

fn swoosh_shape() -> Shape {
    let mut shape = Shape::new();
    shape
        .move_to(-0.03, 0.0)
        .quadratic_curve_to(0.01, 0.03, 0.06, 0.01)
        .quadratic_curve_to(0.03, -0.01, 0.06, -0.03);
    shape
}

/// Builds one shoe under `parent`
///
/// The right shoe is the left one mirrored with `scale.x = -1`. All
/// materials are created per shoe.
///
/// # Errors
/// Fails only if the side logo cannot be extruded.
pub fn build_shoe(scene: &mut Scene, parent: NodeId, side: Side) -> Result<NodeId, GeometryError> {
    let (name, x) = match side {
        Side::Left => ("left shoe", -0.15),
        Side::Right => ("right shoe", 0.15),
    };
    let mirror = if side == Side::Right { -1.0 } else { 1.0 };
    let shoe = scene
        .add_group(Some(parent), name)
        .position(x, -0.15, 0.1)
        .scale(mirror, 1.0, 1.0)
        .id();

    // upper: a cylinder closed by two half spheres
    let upper = scene.add_material(Material::lambert("shoe upper", 0xd3d3d3));
    let body = scene.add_geometry(generate_cylinder(0.085, 0.085, 0.18, 16));
    scene
        .add_mesh(Some(shoe), "shoe body", body, upper)
        .cast_shadow();

    let toe_geometry = generate_sphere_section(0.085, 16, 12, 0.0, PI, 0.0, PI);
    let toe = scene.add_geometry(toe_geometry.clone());
    let heel_cap = scene.add_geometry(toe_geometry);
    scene
        .add_mesh(Some(shoe), "toe cap", toe, upper)
        .position(0.0, 0.09, 0.0)
        .rotation(PI / 2.0, 0.0, 0.0);
    scene
        .add_mesh(Some(shoe), "heel cap", heel_cap, upper)
        .position(0.0, -0.09, 0.0)
        .rotation(-PI / 2.0, 0.0, 0.0);

    let texture_line = scene.add_geometry(generate_box(0.16, 0.002, 0.01));
    for i in -2..=2 {
        let i = i as f32;
        let material = scene.add_material(Material::lambert("texture line", 0xb0b0b0));
        scene
            .add_mesh(Some(shoe), "texture line", texture_line, material)
            .position(0.0, 0.03 - i * 0.01, -0.13 + i * 0.04);
    }

    let panel = scene.add_geometry(generate_box(0.07, 0.08, 0.01));
    let panel_material = scene.add_material(Material::lambert("accent panel", 0x1ca9e6));
    scene
        .add_mesh(Some(shoe), "accent panel", panel, panel_material)
        .position(0.06, 0.02, 0.09)
        .rotation(0.0, PI / 8.0, 0.0);

    let sole = scene.add_geometry(generate_box(0.18, 0.03, 0.36));
    let sole_material = scene.add_material(Material::lambert("sole", 0xffb6c1).with_opacity(0.7));
    scene
        .add_mesh(Some(shoe), "sole", sole, sole_material)
        .position(0.0, -0.07, 0.0);

    let heel = scene.add_geometry(generate_box(0.08, 0.03, 0.08));
    let heel_material = scene.add_material(Material::lambert("heel", 0x1ca9e6));
    scene
        .add_mesh(Some(shoe), "heel", heel, heel_material)
        .position(0.0, -0.03, -0.16);

    let navy = scene.add_geometry(generate_box(0.08, 0.01, 0.08));
    let navy_material = scene.add_material(Material::lambert("heel trim", 0x1a237e));
    scene
        .add_mesh(Some(shoe), "heel trim", navy, navy_material)
        .position(0.0, -0.01, -0.16);

    let tongue = scene.add_geometry(generate_box(0.07, 0.04, 0.13));
    let tongue_material = scene.add_material(Material::lambert("tongue", 0xd3d3d3));
    scene
        .add_mesh(Some(shoe), "tongue", tongue, tongue_material)
        .position(0.0, 0.045, 0.07);

    let label = scene.add_geometry(generate_box(0.03, 0.01, 0.001));
    let label_material = scene.add_material(Material::lambert("tongue label", 0x111111));
    scene
        .add_mesh(Some(shoe), "tongue label", label, label_material)
        .position(0.0, 0.06, 0.13);

    let lace = scene.add_geometry(generate_cylinder(0.004, 0.004, 0.11, 8));
    for i in 0..6 {
        let i = i as f32;
        let material = scene.add_material(Material::lambert("lace", 0xd3d3d3));
        scene
            .add_mesh(Some(shoe), "lace", lace, material)
            .position(0.0, 0.04 - i * 0.012, 0.04 + i * 0.018)
            .rotation(0.0, 0.0, PI / 2.0);
    }

    let swoosh = scene.add_geometry(extrude_shape(&swoosh_shape(), SWOOSH_DEPTH)?);
    let swoosh_material = scene.add_material(Material::lambert("swoosh", 0xffe066));
    scene
        .add_mesh(Some(shoe), "swoosh", swoosh, swoosh_material)
        .position(0.04, -0.01, 0.13)
        .rotation(-PI / 2.1, 0.0, 0.0);

    let overlay_material =
        scene.add_material(Material::lambert("swoosh overlay", 0xff69b4).with_opacity(0.5));
    scene
        .add_mesh(Some(shoe), "swoosh overlay", swoosh, overlay_material)
        .position(0.04, -0.012, 0.132)
        .rotation(-PI / 2.1, 0.0, 0.0);

    let tail = scene.add_geometry(generate_box(0.02, 0.01, 0.004));
    let tail_material = scene.add_material(Material::lambert("swoosh tail", 0x111111));
    scene
        .add_mesh(Some(shoe), "swoosh tail", tail, tail_material)
        .position(0.07, -0.01, 0.13);

    Ok(shoe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_shoes() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let player = scene.add_group(None, "player").id();
        let left = build_shoe(&mut scene, player, Side::Left).unwrap();
        let right = build_shoe(&mut scene, player, Side::Right).unwrap();
        (scene, left, right)
    }

    #[test]
    fn test_shoe_mesh_count() {
        let (scene, left, right) = two_shoes();
        assert_eq!(scene.subtree_mesh_count(left), 23);
        assert_eq!(scene.subtree_mesh_count(right), 23);
    }

    #[test]
    fn test_right_shoe_is_mirrored() {
        let (scene, left, right) = two_shoes();
        let left = scene.node(left).unwrap();
        let right = scene.node(right).unwrap();

        assert!(!left.transform.is_mirrored());
        assert!(right.transform.is_mirrored());
        assert_eq!(left.transform.position.x, -0.15);
        assert_eq!(right.transform.position.x, 0.15);
    }

    #[test]
    fn test_shoes_do_not_share_materials() {
        let (scene, left, right) = two_shoes();
        let materials = |shoe: NodeId| -> Vec<_> {
            scene
                .children(shoe)
                .iter()
                .filter_map(|&c| scene.node(c).unwrap().material())
                .collect()
        };
        let left = materials(left);
        let right = materials(right);
        assert!(left.iter().all(|m| !right.contains(m)));
    }

    #[test]
    fn test_swoosh_and_overlay_share_geometry() {
        let (scene, left, _) = two_shoes();
        let find = |name: &str| {
            scene
                .children(left)
                .iter()
                .map(|&c| scene.node(c).unwrap())
                .find(|n| n.name == name)
                .and_then(|n| n.geometry())
        };
        assert!(find("swoosh").is_some());
        assert_eq!(find("swoosh"), find("swoosh overlay"));
    }
}
