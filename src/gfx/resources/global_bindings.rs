//! Global uniform bindings for camera and scene data
//!
//! Manages GPU uniform buffers and bind groups for global rendering state
//! that is shared across all meshes in a scene: camera matrices, the light
//! rig, tone mapping exposure and the shadow map.

use cgmath::{InnerSpace, Matrix4, SquareMatrix};

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::Light},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use super::texture_resource::TextureResource;

/// Maximum number of directional lights the shader evaluates
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Depth bias applied to shadow lookups
const SHADOW_BIAS: f32 = 0.0015;

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in `lambert.wgsl` and `shadow_pass.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// Summed ambient radiance (rgb)
    pub ambient: [f32; 4],
    /// Unit vectors pointing towards each directional light
    pub light_directions: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// Linear radiance of each directional light
    pub light_colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// x: directional light count, y: exposure, z: shadow map size (0 = off), w: bias
    pub params: [f32; 4],
}
// 64 + 16 + 64 + 16 + 64 + 64 + 16 = 304 bytes

impl GlobalUBOContent {
    /// Packs the camera and the scene's light list
    ///
    /// Ambient lights are summed. Directional lights beyond
    /// [`MAX_DIRECTIONAL_LIGHTS`] are dropped. The first shadow-casting
    /// directional light provides the shadow camera.
    pub fn new(camera: &CameraUniform, lights: &[Light], exposure: f32) -> Self {
        let mut content = Self {
            view_proj: camera.view_proj,
            view_position: camera.view_position,
            light_view_proj: Matrix4::identity().into(),
            ambient: [0.0; 4],
            light_directions: [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS],
            light_colors: [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS],
            params: [0.0, exposure, 0.0, SHADOW_BIAS],
        };

        let mut directional = 0usize;
        let mut shadow_assigned = false;

        for light in lights {
            let radiance = light.radiance();
            match light {
                Light::Ambient { .. } => {
                    for c in 0..3 {
                        content.ambient[c] += radiance[c];
                    }
                }
                Light::Directional {
                    position, shadow, ..
                } => {
                    if directional == MAX_DIRECTIONAL_LIGHTS {
                        log::warn!(
                            "Ignoring directional light beyond the first {}",
                            MAX_DIRECTIONAL_LIGHTS
                        );
                        continue;
                    }
                    let dir = if position.magnitude2() > 0.0 {
                        position.normalize()
                    } else {
                        cgmath::Vector3::unit_y()
                    };
                    content.light_directions[directional] = [dir.x, dir.y, dir.z, 0.0];
                    content.light_colors[directional] = [radiance[0], radiance[1], radiance[2], 1.0];
                    directional += 1;

                    if let Some(config) = shadow.as_ref().filter(|_| !shadow_assigned) {
                        content.light_view_proj = config.view_proj(*position).into();
                        content.params[2] = config.map_size as f32;
                        shadow_assigned = true;
                    }
                }
            }
        }

        content.params[0] = directional as f32;
        content
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in both the shadow and the main pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Shadow map and comparison sampler, bound to slot 3 in the main pass only
pub struct ShadowBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl ShadowBindings {
    pub fn new(device: &wgpu::Device, shadow_map: &TextureResource) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::shadow_map())
            .next_binding_fragment(binding_types::comparison_sampler())
            .create(device, "Shadow Bind Group");

        let sampler = TextureResource::create_shadow_sampler(device);
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .texture(&shadow_map.view)
            .sampler(&sampler)
            .create(device, "Shadow Bind Group");

        ShadowBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
