//! egui-on-wgpu integration for the whole arcade screen.
//!
//! Every pixel of the game is painted through egui's tessellator, so this
//! is not an overlay: the wgpu pass clears to black and egui draws the rest.
//! egui_wgpu still imposes a phase split because `Renderer::render()` needs
//! a `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `begin()` / `finish()` -- run UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! `begin()`/`finish()` are split around the frame closure so the caller can
//! run its own `&mut self` drawing code against a cloned `egui::Context`
//! without holding a borrow of this struct.

use winit::window::Window;

pub struct ScreenPainter {
    egui_ctx: egui::Context,
    egui_winit_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl ScreenPainter {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        }
    }

    /// Cheap handle clone; `egui::Context` is internally ref-counted.
    pub fn context(&self) -> egui::Context {
        self.egui_ctx.clone()
    }

    pub fn handle_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) {
        let _ = self.egui_winit_state.on_window_event(window, event);
    }

    /// Gather egui's raw input for this frame. Run the frame closure against
    /// `context()` yourself, then hand the output to [`finish`](Self::finish).
    pub fn begin(&mut self, window: &Window) -> egui::RawInput {
        self.egui_winit_state.take_egui_input(window)
    }

    pub fn finish(
        &mut self,
        window: &Window,
        full_output: egui::FullOutput,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
