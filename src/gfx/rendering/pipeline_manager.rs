//! Named render pipelines for the courtside passes
//!
//! Every pipeline draws [`Vertex3D`] buffers with `vs_main`/`fs_main` entry
//! points; a [`PipelineConfig`] picks the shader, layouts and fixed-function
//! state.

use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use wgpu::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Failure to build a registered pipeline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pipeline {pipeline:?} uses shader {shader:?}, which was never loaded")]
    MissingShader { pipeline: String, shader: String },
}

/// Shader, layouts and fixed-function state for one pipeline
///
/// Multisampling is fixed at one sample.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub front_face: FrontFace,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub depth_write: bool,
    pub color_targets: Vec<Option<ColorTargetState>>,
    /// Depth-only pipeline without a fragment stage
    pub vertex_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Pipeline".to_string(),
            shader: "lambert".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            front_face: FrontFace::Ccw,
            cull_mode: Some(Face::Back),
            depth_format: None,
            depth_write: true,
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8UnormSrgb,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            vertex_only: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_owned();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    /// Clockwise front faces, for meshes whose transform mirrors them
    pub fn with_front_face(mut self, front_face: FrontFace) -> Self {
        self.front_face = front_face;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Depth testing against a buffer of `format`
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    /// Depth test stays on, depth writes go off (transparent meshes)
    pub fn without_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    pub fn with_color_targets(mut self, targets: Vec<Option<ColorTargetState>>) -> Self {
        self.color_targets = targets;
        self
    }

    pub fn with_vertex_only(mut self) -> Self {
        self.vertex_only = true;
        self
    }

    fn primitive_state(&self) -> PrimitiveState {
        PrimitiveState {
            topology: self.primitive_topology,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    fn depth_stencil_state(&self) -> Option<DepthStencilState> {
        self.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: self.depth_write,
            depth_compare: CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        })
    }
}

/// Manages named render pipelines
///
/// Pipelines are registered by name, compiled in bulk through
/// [`PipelineManager::create_all_pipelines`], then looked up by name while
/// recording passes.
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
    pending_pipelines: Vec<String>,
}

impl PipelineManager {
    /// Creates a new pipeline manager
    ///
    /// # Arguments
    /// * `device` - Shared wgpu device for creating resources
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
            pending_pipelines: Vec::new(),
        }
    }

    /// Registers a pipeline configuration without creating it
    ///
    /// Pipelines are compiled by [`PipelineManager::create_all_pipelines`].
    ///
    /// # Arguments
    /// * `name` - Unique identifier for this pipeline
    /// * `config` - Pipeline configuration
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        self.pending_pipelines.push(name.to_string());
    }

    /// Loads and compiles a shader module
    ///
    /// # Arguments
    /// * `name` - Shader identifier
    /// * `source` - WGSL shader source code
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });

        self.shader_modules.insert(name.to_string(), shader_module);
    }

    /// Looks up an already created pipeline
    pub fn pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    /// Creates all pending pipelines
    ///
    /// Pipelines that fail stay pending and are reported together.
    pub fn create_all_pipelines(&mut self) -> Result<(), Vec<PipelineError>> {
        let mut errors = Vec::new();
        let pending = std::mem::take(&mut self.pending_pipelines);

        for name in pending {
            if let Some(config) = self.pipeline_configs.get(&name).cloned() {
                match self.create_pipeline_from_config(&name, &config) {
                    Ok(pipeline) => {
                        self.pipelines.insert(name, pipeline);
                    }
                    Err(e) => {
                        errors.push(e);
                        self.pending_pipelines.push(name);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a render pipeline from configuration
    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline, PipelineError> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| PipelineError::MissingShader {
                pipeline: name.to_owned(),
                shader: config.shader.clone(),
            })?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let fragment_state = if config.vertex_only {
            None
        } else {
            Some(FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &config.color_targets,
                compilation_options: PipelineCompilationOptions::default(),
            })
        };

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: fragment_state,
                primitive: config.primitive_state(),
                depth_stencil: config.depth_stencil_state(),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Ok(pipeline)
    }

    /// Returns pipeline manager statistics
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            total_pipelines: self.pipelines.len(),
            pending_pipelines: self.pending_pipelines.len(),
            loaded_shaders: self.shader_modules.len(),
        }
    }
}

/// Statistics about pipeline manager state
#[derive(Debug)]
pub struct PipelineStats {
    pub total_pipelines: usize,
    pub pending_pipelines: usize,
    pub loaded_shaders: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_config_keeps_depth_test() {
        let config = PipelineConfig::default()
            .with_depth_format(TextureFormat::Depth32Float)
            .without_depth_write();

        let depth = config.depth_stencil_state().unwrap();
        assert_eq!(depth.format, TextureFormat::Depth32Float);
        assert!(!depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, CompareFunction::LessEqual);
    }

    #[test]
    fn test_mirrored_wireframe_primitive_state() {
        let config = PipelineConfig::default()
            .with_front_face(FrontFace::Cw)
            .with_primitive_topology(PrimitiveTopology::LineList)
            .with_cull_mode(None);

        let primitive = config.primitive_state();
        assert_eq!(primitive.front_face, FrontFace::Cw);
        assert_eq!(primitive.topology, PrimitiveTopology::LineList);
        assert_eq!(primitive.cull_mode, None);
        assert!(PipelineConfig::default().depth_stencil_state().is_none());
    }

    #[test]
    fn test_missing_shader_message() {
        let error = PipelineError::MissingShader {
            pipeline: "Shadow".into(),
            shader: "shadow".into(),
        };
        assert!(error.to_string().contains("\"shadow\""));
    }
}
