// src/ui/manager.rs
//! Dear ImGui glue: winit input in, wgpu draw commands out

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::{Window, WindowId},
};

const UI_FONT_SIZE: f32 = 18.0;

/// Panel layout is authored in physical pixels
const UI_SCALE: f64 = 1.0;

/// Owns the ImGui context and its winit platform and wgpu renderer
///
/// One frame is built per redraw: [`UiManager::update_logic`] runs the panel
/// closure, then either [`UiManager::render`] draws it on top of the scene or
/// [`UiManager::discard_frame`] drops it.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        // no imgui.ini next to the binary
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(UI_SCALE));
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                size_pixels: UI_FONT_SIZE,
                oversample_h: 1,
                pixel_snap_h: true,
                ..Default::default()
            }),
        }]);

        let renderer = Renderer::new(
            &mut context,
            device,
            queue,
            RendererConfig {
                texture_format: output_color_format,
                ..Default::default()
            },
        );

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Whether the pointer or keyboard is over or focused on a panel
    pub fn wants_input(&self) -> bool {
        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Feeds an input event to ImGui
    ///
    /// # Returns
    /// `true` when ImGui keeps the event, so the camera and shortcuts skip it
    pub fn handle_input(&mut self, window: &Window, window_id: WindowId, event: &WindowEvent) -> bool {
        if !is_ui_input(event) {
            return false;
        }
        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        self.platform
            .handle_event(self.context.io_mut(), window, &ui_event);
        self.wants_input()
    }

    /// Starts an ImGui frame and runs `run_ui` to fill it
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Failed to prepare UI frame: {:?}", e);
        }

        let ui = self.context.frame();
        run_ui(ui);

        let cursor = ui.mouse_cursor();
        if self.last_cursor != cursor {
            self.last_cursor = cursor;
            self.platform.prepare_render(ui, window);
        }

        self.wants_input()
    }

    /// Ends the frame started by `update_logic()` without drawing it
    pub fn discard_frame(&mut self) {
        self.context.render();
    }

    /// Draws the frame built by `update_logic()` over the scene in `color_attachment`
    pub fn render(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();
        let [width, height] = draw_data.display_size;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("UI Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(e) = self.renderer.render(draw_data, queue, device, &mut pass) {
            log::warn!("Failed to render UI: {:?}", e);
        }
    }
}

/// Window events ImGui needs to see
fn is_ui_input(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::KeyboardInput { .. }
            | WindowEvent::ModifiersChanged(_)
            | WindowEvent::Focused(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_ui_input_filter() {
        assert!(is_ui_input(&WindowEvent::Focused(true)));
        assert!(!is_ui_input(&WindowEvent::Resized(PhysicalSize::new(800, 600))));
        assert!(!is_ui_input(&WindowEvent::CloseRequested));
        assert!(!is_ui_input(&WindowEvent::RedrawRequested));
    }
}
