//! Material system for Lambert shading
//!
//! Provides material definitions and centralized management with GPU resource handling.
//! Materials are stored in MaterialManager and mesh nodes reference them by ID.

use wgpu::Device;

use crate::{
    gfx::color::Color,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Handle to a material stored in a [`MaterialManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear RGB colour, alpha holds the opacity
    pub color: [f32; 4],
    /// x: vertex colours enabled, y: transparent
    pub flags: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group layout shared by every material
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group");

        MaterialBindings { bind_group_layout }
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    fn create_bind_group(&self, device: &Device, ubo: &MaterialUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Material Bind Group")
    }
}

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Diffuse-only material
///
/// `color` is authored in sRGB. With `vertex_colors` set, the shaded colour is
/// `color * vertex colour`. `wireframe` does not change the uniform data; it
/// selects the line pipeline at draw time.
pub struct Material {
    pub name: String,
    pub color: Color,
    pub vertex_colors: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub wireframe: bool,

    gpu: Option<MaterialGpu>,
}

impl Material {
    /// Creates an opaque Lambert material
    ///
    /// # Arguments
    /// * `name` - Label used in logs and lookups
    /// * `color` - Diffuse colour
    pub fn lambert(name: &str, color: impl Into<Color>) -> Self {
        Self {
            name: name.to_string(),
            color: color.into(),
            vertex_colors: false,
            transparent: false,
            opacity: 1.0,
            wireframe: false,
            gpu: None,
        }
    }

    /// Builder pattern: multiply the colour by per-vertex colours
    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }

    /// Builder pattern: mark transparent with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = self.color.to_linear();
        let opacity = if self.transparent { self.opacity } else { 1.0 };
        MaterialUniform {
            color: [r, g, b, opacity],
            flags: [
                if self.vertex_colors { 1.0 } else { 0.0 },
                if self.transparent { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }

    /// Creates or refreshes the GPU copy of this material
    ///
    /// The uniform buffer skips the write when nothing changed.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) {
        let uniform = self.uniform();
        match &mut self.gpu {
            Some(gpu) => {
                gpu.ubo.update_content(queue, uniform);
            }
            None => {
                let ubo = MaterialUBO::new_with_data(device, &uniform);
                let bind_group = bindings.create_bind_group(device, &ubo);
                self.gpu = Some(MaterialGpu { ubo, bind_group });
            }
        }
    }

    /// Gets the bind group for rendering
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the scene
///
/// Mesh nodes reference materials by [`MaterialId`] rather than storing
/// material data directly, so several meshes can share one material.
#[derive(Default)]
pub struct MaterialManager {
    materials: Vec<Material>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material and returns its handle
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get_material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn get_material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// First material with the given name
    pub fn find_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Updates GPU resources for all materials
    ///
    /// Should be called once per frame after the scene update so wireframe
    /// and colour edits reach the GPU.
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) {
        for material in &mut self.materials {
            material.update_gpu_resources(device, queue, bindings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_uniform_ignores_opacity() {
        let mut skin = Material::lambert("skin", 0x8B5C2B);
        skin.opacity = 0.3;
        assert_eq!(skin.uniform().color[3], 1.0);
        assert_eq!(skin.uniform().flags, [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transparent_material() {
        let highlight = Material::lambert("eye_highlight", Color::WHITE).with_opacity(0.7);
        assert!(highlight.transparent);
        let uniform = highlight.uniform();
        assert!((uniform.color[3] - 0.7).abs() < 1e-6);
        assert_eq!(uniform.flags[1], 1.0);
    }

    #[test]
    fn test_manager_handles_are_stable() {
        let mut manager = MaterialManager::new();
        let skin = manager.add_material(Material::lambert("skin", 0x8B5C2B).with_vertex_colors());
        let jersey = manager.add_material(Material::lambert("jersey", 0xFDB927));

        assert_ne!(skin, jersey);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.find_by_name("jersey"), Some(jersey));
        assert!(manager.get_material(skin).unwrap().vertex_colors);

        manager.get_material_mut(jersey).unwrap().wireframe = true;
        let wire: Vec<_> = manager.iter().filter(|(_, m)| m.wireframe).collect();
        assert_eq!(wire.len(), 1);
        assert!(manager.get_material(MaterialId(7)).is_none());
    }
}
