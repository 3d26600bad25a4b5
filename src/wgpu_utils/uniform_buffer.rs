// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `Content` value
///
/// The bytes of the last upload are kept, so writing an unchanged transform or
/// material every frame does not touch the queue.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    uploaded: Vec<u8>,
    _content: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Creates the buffer already filled with `initial_content`
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} UBO", short_type_name::<Content>())),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        UniformBuffer {
            buffer,
            uploaded: bytes.to_vec(),
            _content: PhantomData,
        }
    }

    /// Queues a write of `content` unless it matches the last upload
    ///
    /// # Returns
    /// Whether a write was queued
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.uploaded == bytes {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.uploaded.clear();
        self.uploaded.extend_from_slice(bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Last path segment of a type name, e.g. `MaterialUniform`
fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::material::MaterialUniform;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<MaterialUniform>(), "MaterialUniform");
        assert_eq!(short_type_name::<f32>(), "f32");
    }
}
