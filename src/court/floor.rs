use std::f32::consts::PI;

use crate::gfx::{
    geometry::{generate_box, generate_plane},
    resources::Material,
    scene::{NodeId, Scene},
};

/// Adds the translucent court floor and its white centre line
///
/// Returns the floor plane, the only mesh that receives shadows.
pub fn build_floor(scene: &mut Scene) -> NodeId {
    let plane = scene.add_geometry(generate_plane(20.0, 20.0, 1, 1));
    let wood = scene.add_material(Material::lambert("floor", 0x8B4513).with_opacity(0.3));
    let floor = scene
        .add_mesh(None, "floor", plane, wood)
        .position(0.0, -0.2, 0.0)
        .rotation(-PI / 2.0, 0.0, 0.0)
        .receive_shadow()
        .id();

    let line = scene.add_geometry(generate_box(0.1, 0.01, 10.0));
    let paint = scene.add_material(Material::lambert("centre line", 0xffffff));
    scene
        .add_mesh(None, "centre line", line, paint)
        .position(0.0, -0.19, 0.0)
        .rotation(0.0, 0.0, PI / 2.0);

    floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_floor_faces_up() {
        let mut scene = Scene::new();
        let floor = build_floor(&mut scene);
        assert_eq!(scene.mesh_count(), 2);

        let node = scene.node(floor).unwrap();
        assert!(node.receive_shadow);
        assert!(!node.cast_shadow);

        // the plane's +Z normal must end up pointing along +Y
        let normal = scene.world_matrix(floor) * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((normal.y - 1.0).abs() < 1e-5);
    }
}
