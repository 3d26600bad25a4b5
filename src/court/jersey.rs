//! Jersey shell with layered trims, lettering and number panels

use std::f32::consts::{PI, TAU};

use crate::gfx::{
    geometry::{generate_box, generate_cylinder_section, generate_plane, generate_torus, CylinderParams},
    resources::{Material, MaterialId},
    scene::{NodeId, Scene},
};

const GOLD: u32 = 0xFDB927;
const PURPLE: u32 = 0x552583;
const WHITE: u32 = 0xffffff;

/// Adds the 19 jersey meshes directly under `parent`
///
/// Every mesh owns its material. Returns the jersey shell node.
pub fn build_jersey(scene: &mut Scene, parent: NodeId) -> NodeId {
    let shell = scene.add_geometry(generate_cylinder_section(
        &CylinderParams::new(0.39, 0.36, 0.8, 80).with_height_segments(4),
    ));
    let gold = fresh(scene, "jersey", GOLD);
    let jersey = scene
        .add_mesh(Some(parent), "jersey", shell, gold)
        .position(0.0, 1.5, 0.0)
        .cast_shadow()
        .id();

    // collar
    for (radius, tube, color) in [(0.39, 0.012, WHITE), (0.375, 0.008, PURPLE)] {
        let ring = scene.add_geometry(generate_torus(radius, tube, 16, 100, TAU));
        let material = fresh(scene, "collar trim", color);
        scene
            .add_mesh(Some(parent), "collar trim", ring, material)
            .position(0.0, 1.9, 0.0)
            .rotation(PI / 2.0, 0.0, 0.0);
    }

    for x in [-0.32_f32, 0.32] {
        let roll = if x < 0.0 { PI / 2.2 } else { -PI / 2.2 };
        for (radius, tube, color) in [(0.21, 0.012, WHITE), (0.197, 0.008, PURPLE)] {
            let arc = scene.add_geometry(generate_torus(radius, tube, 16, 60, PI * 1.2));
            let material = fresh(scene, "armhole trim", color);
            scene
                .add_mesh(Some(parent), "armhole trim", arc, material)
                .position(x, 1.7, 0.0)
                .rotation(0.0, 0.0, roll);
        }
    }

    for sign in [-1.0_f32, 1.0] {
        for (width, x, color) in [(0.018, 0.38, WHITE), (0.012, 0.36, PURPLE)] {
            let stripe = scene.add_geometry(generate_box(width, 0.8, 0.6));
            let material = fresh(scene, "side trim", color);
            scene
                .add_mesh(Some(parent), "side trim", stripe, material)
                .position(sign * x, 1.5, 0.0);
        }
    }

    // team lettering, slightly slanted, over a white outline
    let lettering = scene.add_geometry(generate_box(0.32, 0.09, 0.01));
    let material = fresh(scene, "lettering", PURPLE);
    scene
        .add_mesh(Some(parent), "lettering", lettering, material)
        .position(0.0, 1.7, 0.41)
        .rotation(0.0, 0.0, -0.08);
    let outline = scene.add_geometry(generate_box(0.34, 0.11, 0.008));
    let material = fresh(scene, "lettering outline", WHITE);
    scene
        .add_mesh(Some(parent), "lettering outline", outline, material)
        .position(0.0, 1.7, 0.406)
        .rotation(0.0, 0.0, -0.08);

    let logo = scene.add_geometry(generate_plane(0.06, 0.03, 1, 1));
    let material = fresh(scene, "chest logo", 0x1A237E);
    scene
        .add_mesh(Some(parent), "chest logo", logo, material)
        .position(-0.18, 1.82, 0.41)
        .rotation(0.0, 0.0, -0.2);

    for x in [-0.09, 0.09] {
        let digit = scene.add_geometry(generate_box(0.13, 0.22, 0.01));
        let material = fresh(scene, "number", PURPLE);
        scene
            .add_mesh(Some(parent), "number", digit, material)
            .position(x, 1.45, 0.41);
        let outline = scene.add_geometry(generate_box(0.15, 0.24, 0.008));
        let material = fresh(scene, "number outline", WHITE);
        scene
            .add_mesh(Some(parent), "number outline", outline, material)
            .position(x, 1.45, 0.406);
    }

    let patch = scene.add_geometry(generate_box(0.13, 0.04, 0.01));
    let material = fresh(scene, "patch", 0x222222);
    scene
        .add_mesh(Some(parent), "patch", patch, material)
        .position(-0.18, 1.12, 0.41);

    jersey
}

fn fresh(scene: &mut Scene, name: &str, color: u32) -> MaterialId {
    scene.add_material(Material::lambert(name, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jersey_mesh_and_material_counts() {
        let mut scene = Scene::new();
        let player = scene.add_group(None, "player").id();
        build_jersey(&mut scene, player);

        assert_eq!(scene.mesh_count(), 19);
        assert_eq!(scene.material_manager.len(), 19);
    }

    #[test]
    fn test_armholes_tilt_outward() {
        let mut scene = Scene::new();
        let player = scene.add_group(None, "player").id();
        build_jersey(&mut scene, player);

        let armholes: Vec<_> = scene
            .children(player)
            .iter()
            .map(|&c| scene.node(c).unwrap())
            .filter(|n| n.name == "armhole trim")
            .collect();
        assert_eq!(armholes.len(), 4);
        for node in armholes {
            let t = &node.transform;
            assert_eq!(t.position.x.signum(), t.rotation.z.signum() * -1.0);
        }
    }

    #[test]
    fn test_shell_casts_shadow() {
        let mut scene = Scene::new();
        let player = scene.add_group(None, "player").id();
        let jersey = build_jersey(&mut scene, player);
        let shell = scene.node(jersey).unwrap();
        assert!(shell.cast_shadow);
        assert_eq!(shell.transform.position.y, 1.5);
    }
}
