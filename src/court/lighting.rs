use cgmath::Vector3;

use crate::gfx::{
    color::Color,
    scene::{Light, Scene, ShadowConfig},
};

/// Adds the ambient fill and the three directional lights
///
/// Only the key light casts shadows.
pub fn setup_lighting(scene: &mut Scene) {
    scene.add_light(Light::ambient(Color::from_hex(0x404040), 0.4));

    let key = Light::directional(Color::WHITE, 1.0, Vector3::new(5.0, 10.0, 5.0)).with_shadow(
        ShadowConfig {
            map_size: 2048,
            near: 0.5,
            far: 50.0,
            half_extent: 10.0,
        },
    );
    scene.add_light(key);

    scene.add_light(Light::directional(
        Color::from_hex(0x8888ff),
        0.3,
        Vector3::new(-5.0, 5.0, -5.0),
    ));
    scene.add_light(Light::directional(
        Color::from_hex(0xffff88),
        0.2,
        Vector3::new(0.0, 5.0, -10.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shadow_caster() {
        let mut scene = Scene::new();
        setup_lighting(&mut scene);

        assert_eq!(scene.lights().len(), 4);
        let casters: Vec<_> = scene.lights().iter().filter_map(Light::shadow).collect();
        assert_eq!(casters.len(), 1);
        assert_eq!(casters[0].map_size, 2048);
        assert!(matches!(scene.lights()[0], Light::Ambient { intensity, .. } if intensity == 0.4));
    }
}
