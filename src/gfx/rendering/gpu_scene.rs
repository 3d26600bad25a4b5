//! GPU copies of scene geometry and per-mesh transforms
//!
//! Geometries are uploaded once and shared by every mesh that uses them.
//! Each mesh node gets its own transform uniform, refreshed every frame from
//! the scene's world matrices.

use std::ops::Range;

use cgmath::{InnerSpace, Matrix, Matrix4, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        geometry::GeometryData,
        resources::MaterialId,
        scene::{node::is_mirrored_matrix, GeometryId, NodeId, Scene},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Per-mesh uniform, MUST match `MeshTransform` in the shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshTransform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model` for normals
    pub normal: [[f32; 4]; 4],
    /// x: receives shadows
    pub flags: [f32; 4],
}

impl MeshTransform {
    pub fn new(model: Matrix4<f32>, receive_shadow: bool) -> Self {
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(model);
        Self {
            model: model.into(),
            normal: normal.into(),
            flags: [if receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

type TransformUBO = UniformBuffer<MeshTransform>;

/// Layout of the per-mesh transform bind group (slot 1)
pub struct TransformBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl TransformBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Transform Bind Group");
        Self { bind_group_layout }
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    fn create_bind_group(&self, device: &wgpu::Device, ubo: &TransformUBO) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Transform Bind Group")
    }
}

/// Vertex, triangle and edge buffers of one geometry
pub struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    line_buffer: wgpu::Buffer,
    line_count: u32,
}

impl GpuGeometry {
    pub fn new(device: &wgpu::Device, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        let lines = geometry.wireframe_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Index Buffer"),
            contents: bytemuck::cast_slice(&lines),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
            line_buffer,
            line_count: lines.len() as u32,
        }
    }
}

/// GPU state of one mesh node
pub struct GpuMesh {
    pub node: NodeId,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub visible: bool,
    pub cast_shadow: bool,
    pub mirrored: bool,
    /// World-space centre, used to sort transparent meshes
    pub center: Vector3<f32>,
    ubo: TransformUBO,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Which pipeline family a mesh is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Opaque,
    Transparent,
    Wireframe,
}

/// What the render engine needs to know to schedule a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEntry {
    pub mesh: usize,
    pub kind: DrawKind,
    pub mirrored: bool,
    /// Squared distance from the camera
    pub distance: f32,
}

/// Orders draws as opaque, then wireframe, then transparent back to front
///
/// Wireframe meshes are drawn before transparent ones so translucent
/// surfaces still blend over them.
pub fn plan_draws(mut entries: Vec<DrawEntry>) -> Vec<DrawEntry> {
    let rank = |kind: DrawKind| match kind {
        DrawKind::Opaque => 0,
        DrawKind::Wireframe => 1,
        DrawKind::Transparent => 2,
    };
    entries.sort_by(|a, b| {
        rank(a.kind).cmp(&rank(b.kind)).then_with(|| {
            if a.kind == DrawKind::Transparent {
                b.distance.total_cmp(&a.distance)
            } else {
                std::cmp::Ordering::Equal
            }
        })
    });
    entries
}

/// GPU mirror of a [`Scene`]
pub struct GpuScene {
    bindings: TransformBindings,
    geometries: Vec<GpuGeometry>,
    meshes: Vec<GpuMesh>,
}

impl GpuScene {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            bindings: TransformBindings::new(device),
            geometries: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub fn transform_bindings(&self) -> &TransformBindings {
        &self.bindings
    }

    pub fn meshes(&self) -> &[GpuMesh] {
        &self.meshes
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GpuGeometry> {
        self.geometries.get(id.index())
    }

    /// Uploads new geometries and meshes, then refreshes every transform
    ///
    /// Scene arenas only grow, so anything past the current counts is new.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        for geometry in &scene.geometries()[self.geometries.len()..] {
            self.geometries.push(GpuGeometry::new(device, geometry));
        }

        let world = scene.world_matrices();
        let mesh_nodes = scene.mesh_nodes();
        if mesh_nodes.len() != self.meshes.len() {
            log::debug!(
                "Rebuilding GPU meshes ({} -> {})",
                self.meshes.len(),
                mesh_nodes.len()
            );
            self.meshes.clear();
            for id in mesh_nodes {
                let Some(node) = scene.node(id) else { continue };
                let (Some(geometry), Some(material)) = (node.geometry(), node.material()) else {
                    continue;
                };
                let ubo = TransformUBO::new_with_data(
                    device,
                    &MeshTransform::new(world[id.index()], node.receive_shadow),
                );
                let bind_group = self.bindings.create_bind_group(device, &ubo);
                self.meshes.push(GpuMesh {
                    node: id,
                    geometry,
                    material,
                    visible: true,
                    cast_shadow: node.cast_shadow,
                    mirrored: false,
                    center: Vector3::new(0.0, 0.0, 0.0),
                    ubo,
                    bind_group,
                });
            }
        }

        for mesh in &mut self.meshes {
            let Some(node) = scene.node(mesh.node) else { continue };
            let model = world[mesh.node.index()];
            mesh.ubo
                .update_content(queue, MeshTransform::new(model, node.receive_shadow));
            mesh.visible = scene.is_visible(mesh.node);
            mesh.cast_shadow = node.cast_shadow;
            mesh.mirrored = is_mirrored_matrix(&model);

            let local_center = scene
                .geometry(mesh.geometry)
                .and_then(GeometryData::bounding_box)
                .map(|b| b.center())
                .unwrap_or([0.0; 3]);
            let c = model * Vector3::from(local_center).extend(1.0);
            mesh.center = c.truncate();
        }
    }

    /// Draw entries for every visible mesh, unsorted
    pub fn draw_entries(&self, scene: &Scene, eye: Vector3<f32>) -> Vec<DrawEntry> {
        self.meshes
            .iter()
            .enumerate()
            .filter(|(_, mesh)| mesh.visible)
            .filter_map(|(index, mesh)| {
                let material = scene.material(mesh.material)?;
                let kind = if material.wireframe {
                    DrawKind::Wireframe
                } else if material.transparent {
                    DrawKind::Transparent
                } else {
                    DrawKind::Opaque
                };
                Some(DrawEntry {
                    mesh: index,
                    kind,
                    mirrored: mesh.mirrored,
                    distance: (mesh.center - eye).magnitude2(),
                })
            })
            .collect()
    }
}

/// Draw helpers for uploaded geometry
pub trait DrawGeometry {
    fn draw_geometry(&mut self, geometry: &GpuGeometry);
    fn draw_geometry_lines(&mut self, geometry: &GpuGeometry);
}

impl DrawGeometry for wgpu::RenderPass<'_> {
    fn draw_geometry(&mut self, geometry: &GpuGeometry) {
        draw_indexed(self, &geometry.vertex_buffer, &geometry.index_buffer, 0..geometry.index_count);
    }

    fn draw_geometry_lines(&mut self, geometry: &GpuGeometry) {
        draw_indexed(self, &geometry.vertex_buffer, &geometry.line_buffer, 0..geometry.line_count);
    }
}

fn draw_indexed(
    pass: &mut wgpu::RenderPass<'_>,
    vertices: &wgpu::Buffer,
    indices: &wgpu::Buffer,
    range: Range<u32>,
) {
    if range.is_empty() {
        return;
    }
    pass.set_vertex_buffer(0, vertices.slice(..));
    pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(range, 0, 0..1);
}
