//! Head details: eyes, nose, mouth, jaw, hair, beard and eyebrows

use std::f32::consts::{PI, TAU};

use crate::gfx::{
    geometry::{
        generate_box, generate_circle, generate_cone, generate_cylinder_section, generate_sphere,
        generate_sphere_section, CylinderParams,
    },
    resources::{Material, MaterialId},
    scene::{NodeId, Scene},
};

/// Builds one eye group (sclera, iris, pupil, highlight) at `(x, y, z)`
///
/// Every eye gets its own materials.
pub(super) fn add_eye(scene: &mut Scene, parent: NodeId, x: f32, y: f32, z: f32) -> NodeId {
    let eye = scene
        .add_group(Some(parent), "eye")
        .position(x, y, z)
        .scale(1.0, 1.0, 1.08)
        .id();

    let sclera_geometry = scene.add_geometry(generate_sphere(0.028, 20, 16));
    let sclera_material = scene.add_material(Material::lambert("sclera", 0xfaf9f6));
    scene.add_mesh(Some(eye), "sclera", sclera_geometry, sclera_material);

    let iris_geometry = scene.add_geometry(generate_circle(0.012, 20));
    let iris_material = scene.add_material(Material::lambert("iris", 0x6B3A1B));
    scene
        .add_mesh(Some(eye), "iris", iris_geometry, iris_material)
        .position(0.0, 0.0, 0.027);

    let pupil_geometry = scene.add_geometry(generate_circle(0.005, 16));
    let pupil_material = scene.add_material(Material::lambert("pupil", 0x111111));
    scene
        .add_mesh(Some(eye), "pupil", pupil_geometry, pupil_material)
        .position(0.0, 0.0, 0.028);

    let highlight_geometry = scene.add_geometry(generate_circle(0.003, 8));
    let highlight_material =
        scene.add_material(Material::lambert("cornea highlight", 0xffffff).with_opacity(0.7));
    scene
        .add_mesh(Some(eye), "cornea highlight", highlight_geometry, highlight_material)
        .position(0.004, 0.006, 0.029);

    eye
}

/// Nose, half-open mouth and lower-jaw hemisphere
pub(super) fn add_face_features(scene: &mut Scene, parent: NodeId, skin: MaterialId) {
    let nose = scene.add_geometry(generate_cone(0.035, 0.12, 16));
    scene
        .add_mesh(Some(parent), "nose", nose, skin)
        .position(0.0, 2.23, 0.23)
        .rotation(PI / 2.1, 0.0, 0.0);

    let mouth = scene.add_geometry(generate_cylinder_section(
        &CylinderParams::new(0.045, 0.045, 0.02, 16)
            .open_ended()
            .with_theta(0.0, PI),
    ));
    let lips = scene.add_material(Material::lambert("mouth", 0x6B3A1B));
    scene
        .add_mesh(Some(parent), "mouth", mouth, lips)
        .position(0.0, 2.13, 0.22)
        .rotation(0.0, 0.0, PI);

    let jaw = scene.add_geometry(generate_sphere_section(
        0.22,
        32,
        16,
        0.0,
        TAU,
        PI * 0.5,
        PI * 0.5,
    ));
    scene
        .add_mesh(Some(parent), "jaw", jaw, skin)
        .position(0.0, 2.13, 0.13)
        .scale(1.1, 0.7, 1.1);
}

/// Crown, both sides (one shared sphere) and the back of the head
pub(super) fn add_hair(scene: &mut Scene, parent: NodeId) {
    let hair = scene.add_material(Material::lambert("hair", 0x2C1810));

    let top = scene.add_geometry(generate_sphere_section(0.2, 24, 16, 0.0, TAU, 0.0, PI * 0.6));
    scene
        .add_mesh(Some(parent), "top hair", top, hair)
        .position(0.0, 2.42, -0.08)
        .scale(1.0, 0.7, 1.2);

    let side = scene.add_geometry(generate_sphere(0.12, 16, 12));
    for x in [-0.18, 0.18] {
        scene
            .add_mesh(Some(parent), "side hair", side, hair)
            .position(x, 2.35, -0.05)
            .scale(1.0, 0.8, 0.9);
    }

    let back = scene.add_geometry(generate_sphere(0.15, 16, 12));
    scene
        .add_mesh(Some(parent), "back hair", back, hair)
        .position(0.0, 2.38, -0.15)
        .scale(1.2, 0.6, 1.0);
}

/// Beard band, moustache, goatee and the two side-beards
pub(super) fn add_beard(scene: &mut Scene, parent: NodeId) {
    let beard_material = scene.add_material(Material::lambert("beard", 0x1A0F08));

    let beard = scene.add_geometry(generate_sphere_section(
        0.15,
        16,
        12,
        0.0,
        TAU,
        PI * 0.3,
        PI * 0.4,
    ));
    scene
        .add_mesh(Some(parent), "beard", beard, beard_material)
        .position(0.0, 2.15, 0.15)
        .scale(1.1, 1.0, 1.2);

    let moustache = scene.add_geometry(generate_box(0.12, 0.04, 0.06));
    scene
        .add_mesh(Some(parent), "moustache", moustache, beard_material)
        .position(0.0, 2.25, 0.19);

    let goatee = scene.add_geometry(generate_box(0.08, 0.12, 0.05));
    scene
        .add_mesh(Some(parent), "goatee", goatee, beard_material)
        .position(0.0, 2.08, 0.18);

    let side = scene.add_geometry(generate_box(0.06, 0.1, 0.04));
    for (x, yaw) in [(-0.12, -0.3), (0.12, 0.3)] {
        scene
            .add_mesh(Some(parent), "side beard", side, beard_material)
            .position(x, 2.18, 0.16)
            .rotation(0.0, yaw, 0.0);
    }
}

pub(super) fn add_eyebrows(scene: &mut Scene, parent: NodeId) {
    let brow = scene.add_geometry(generate_box(0.08, 0.02, 0.03));
    let material = scene.add_material(Material::lambert("eyebrow", 0x2C1810));
    for (x, roll) in [(-0.08, 0.1), (0.08, -0.1)] {
        scene
            .add_mesh(Some(parent), "eyebrow", brow, material)
            .position(x, 2.42, 0.16)
            .rotation(0.0, 0.0, roll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_layers_stack_outward() {
        let mut scene = Scene::new();
        let head = scene.add_group(None, "head").id();
        let eye = add_eye(&mut scene, head, -0.07, 2.36, 0.18);

        assert_eq!(scene.subtree_mesh_count(eye), 4);
        let depths: Vec<f32> = scene
            .children(eye)
            .iter()
            .map(|&c| scene.node(c).unwrap().transform.position.z)
            .collect();
        assert_eq!(depths, vec![0.0, 0.027, 0.028, 0.029]);

        let highlight = scene.children(eye)[3];
        let material = scene.node(highlight).unwrap().material().unwrap();
        assert!(scene.material(material).unwrap().transparent);
    }

    #[test]
    fn test_two_eyes_do_not_share_materials() {
        let mut scene = Scene::new();
        let head = scene.add_group(None, "head").id();
        let left = add_eye(&mut scene, head, -0.07, 2.36, 0.18);
        let right = add_eye(&mut scene, head, 0.07, 2.36, 0.18);

        let sclera = |eye: NodeId| scene.node(scene.children(eye)[0]).unwrap().material();
        assert_ne!(sclera(left), sclera(right));
    }

    #[test]
    fn test_side_hair_shares_geometry() {
        let mut scene = Scene::new();
        let head = scene.add_group(None, "head").id();
        add_hair(&mut scene, head);

        assert_eq!(scene.mesh_count(), 4);
        let sides: Vec<_> = scene
            .children(head)
            .iter()
            .filter(|&&c| scene.node(c).unwrap().name == "side hair")
            .map(|&c| scene.node(c).unwrap().geometry())
            .collect();
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[0], sides[1]);
    }

    #[test]
    fn test_face_detail_counts() {
        let mut scene = Scene::new();
        let head = scene.add_group(None, "head").id();
        let skin = scene.add_material(Material::lambert("skin", 0x8B5C2B));
        add_face_features(&mut scene, head, skin);
        add_beard(&mut scene, head);
        add_eyebrows(&mut scene, head);
        assert_eq!(scene.mesh_count(), 3 + 5 + 2);
    }
}
