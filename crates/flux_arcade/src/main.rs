//! Four-Second Flux -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. All
//! per-frame work runs inside `RedrawRequested` in a fixed order:
//!
//!   1. `begin_frame()` -- advance the wall clock
//!   2. drain queued input events into the current phase's handler
//!   3. `Session::tick()` -- timed phase transitions
//!   4. apply the returned entry actions atomically (audio, resets)
//!   5. paint the frame through egui and present
//!
//! Every pixel goes through the egui tessellator over a cleared wgpu
//! surface; there is no separate sprite pipeline. Microgames never see the
//! clock or the session -- they get a canvas, the input snapshot, and a
//! context of services, and the session decides when they start and stop.

mod assets;
mod canvas;
mod games;
mod gpu;
mod painter;
mod screens;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use flux_audio::AudioChannels;
use flux_core::catalog::Catalog;
use flux_core::clock::FrameClock;
use flux_core::config::ArcadeConfig;
use flux_core::input::{InputEvent, InputState, Key};
use flux_core::session::{Session, SessionAction, SessionPhase};
use flux_platform::window::PlatformConfig;

use assets::ImageBank;
use canvas::Canvas;
use games::{GameCtx, GameSet};
use gpu::GpuContext;
use painter::ScreenPainter;
use screens::MenuState;

const CONFIG_PATH: &str = "assets/arcade.json";

/// All mutable arcade state. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
struct ArcadeState {
    window: Arc<Window>,
    gpu: GpuContext,
    painter: ScreenPainter,
    clock: FrameClock,
    input: InputState,

    catalog: Catalog,
    session: Session,
    games: GameSet,
    menu: MenuState,
    audio: AudioChannels,
    images: ImageBank,
    rng: StdRng,

    /// Entry actions produced before the first frame (no-start-screen
    /// configs enter a game immediately); applied on the first redraw.
    pending: Vec<SessionAction>,
    show_stats: bool,
}

impl ArcadeState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let painter = ScreenPainter::new(&gpu.device, gpu.surface_format, &window);
        let clock = FrameClock::new();

        let config = ArcadeConfig::load_or_default(Path::new(CONFIG_PATH));
        let asset_dir = PathBuf::from(&config.asset_dir);
        let audio = AudioChannels::new(assets::load_sound_bank(&asset_dir));
        let images = ImageBank::load(&asset_dir, &painter.context());

        let catalog = Catalog::standard();
        let (session, pending) = Session::new(config.session(), catalog.ids(), clock.now_ms());
        let games = GameSet::standard();

        log::info!(
            "Arcade ready: {} microgames, selection {:?}, start screen {}",
            catalog.len(),
            config.selection,
            config.start_screen
        );

        Self {
            window,
            gpu,
            painter,
            clock,
            input: InputState::new(),
            catalog,
            session,
            games,
            menu: MenuState::new(),
            audio,
            images,
            rng: StdRng::from_entropy(),
            pending,
            show_stats: false,
        }
    }

    /// Logical view size, which is also egui's coordinate space.
    fn view(&self) -> egui::Vec2 {
        let sf = self.window.scale_factor() as f32;
        egui::Vec2::new(self.gpu.size.0 as f32 / sf, self.gpu.size.1 as f32 / sf)
    }

    /// Apply a phase edge's entry actions in order. The whole list runs
    /// within one frame so no partially-entered state is ever drawn.
    fn apply_actions(&mut self, actions: Vec<SessionAction>, now: u64) {
        for action in actions {
            match action {
                SessionAction::StopAllAudio => {
                    self.audio.stop_background();
                    self.audio.stop_held();
                }
                SessionAction::ResetGame(id) => match self.catalog.position(id) {
                    Ok(pos) => {
                        let view = self.view();
                        let ArcadeState {
                            games,
                            audio,
                            images,
                            rng,
                            ..
                        } = self;
                        let mut ctx = GameCtx {
                            audio,
                            images,
                            rng,
                            view,
                            now_ms: now,
                        };
                        games.get_mut(pos).reset(&mut ctx);
                        log::debug!("Reset microgame {}", id.0);
                    }
                    Err(err) => log::error!("Cannot reset: {err}"),
                },
                SessionAction::StartBackground(id) => match self.catalog.descriptor(id) {
                    Ok(descriptor) => self.audio.apply_background(descriptor),
                    Err(err) => log::error!("Cannot start background: {err}"),
                },
                SessionAction::PlayAdvanceCue => {
                    self.audio.play_one_shot(assets::keys::ADVANCE);
                }
            }
        }
    }

    /// Route one discrete input event to the current phase.
    fn handle_event(&mut self, event: InputEvent, now: u64) {
        match self.session.phase() {
            SessionPhase::Start => match event {
                InputEvent::KeyPressed(Key::Enter) => {
                    let actions = self.session.begin(now);
                    self.apply_actions(actions, now);
                }
                InputEvent::KeyPressed(Key::Tab) => self.open_menu(now),
                InputEvent::PointerPressed { x, y } => {
                    if screens::start_button_rect(self.view()).contains(egui::pos2(x, y)) {
                        let actions = self.session.begin(now);
                        self.apply_actions(actions, now);
                    }
                }
                _ => {}
            },

            SessionPhase::Menu => match event {
                InputEvent::KeyPressed(Key::Tab) => {
                    let actions = self.session.toggle_menu(now);
                    self.apply_actions(actions, now);
                }
                InputEvent::KeyPressed(Key::Up) => {
                    self.menu.move_cursor(-1, self.catalog.len());
                }
                InputEvent::KeyPressed(Key::Down) => {
                    self.menu.move_cursor(1, self.catalog.len());
                }
                InputEvent::KeyPressed(Key::Enter) => {
                    let id = self.catalog.ids()[self.menu.cursor];
                    let actions = self.session.select_from_menu(id, now);
                    self.apply_actions(actions, now);
                }
                InputEvent::PointerPressed { x, y } => {
                    if let Some(row) =
                        screens::hit_menu_row(self.view(), self.catalog.len(), x, y)
                    {
                        self.menu.cursor = row;
                        let id = self.catalog.ids()[row];
                        let actions = self.session.select_from_menu(id, now);
                        self.apply_actions(actions, now);
                    }
                }
                _ => {}
            },

            SessionPhase::Active => {
                if matches!(event, InputEvent::KeyPressed(Key::Tab)) {
                    self.open_menu(now);
                    return;
                }
                if let Ok(pos) = self.catalog.position(self.session.current()) {
                    let view = self.view();
                    let ArcadeState {
                        games,
                        audio,
                        images,
                        rng,
                        ..
                    } = self;
                    let mut ctx = GameCtx {
                        audio,
                        images,
                        rng,
                        view,
                        now_ms: now,
                    };
                    games.get_mut(pos).on_event(&event, &mut ctx);
                }
            }

            SessionPhase::Transition => {
                // Only the menu toggle works during NEXT!; everything else
                // belongs to no game.
                if matches!(event, InputEvent::KeyPressed(Key::Tab)) {
                    self.open_menu(now);
                }
            }
        }
    }

    fn open_menu(&mut self, now: u64) {
        if let Ok(pos) = self.catalog.position(self.session.current()) {
            self.menu.cursor = pos;
        }
        let actions = self.session.toggle_menu(now);
        self.apply_actions(actions, now);
    }

    /// egui frame body: paint the whole screen for the current phase.
    fn draw_frame(&mut self, egui_ctx: &egui::Context, now: u64) {
        let layer = egui_ctx.layer_painter(egui::LayerId::background());
        let rect = egui_ctx.screen_rect();
        let canvas = Canvas::new(&layer, rect);
        let pointer = self.input.pointer_position();

        match self.session.phase() {
            SessionPhase::Start => screens::draw_start_screen(&canvas, pointer),
            SessionPhase::Menu => {
                screens::draw_menu(&canvas, &self.catalog, &self.menu, pointer)
            }
            SessionPhase::Transition => screens::draw_transition(&canvas, now),
            SessionPhase::Active => {
                let elapsed = self.session.phase_elapsed(now);
                let id = self.session.current();
                if let Ok(pos) = self.catalog.position(id) {
                    let view = egui::Vec2::new(rect.width(), rect.height());
                    let ArcadeState {
                        games,
                        audio,
                        images,
                        rng,
                        input,
                        ..
                    } = self;
                    let mut ctx = GameCtx {
                        audio,
                        images,
                        rng,
                        view,
                        now_ms: now,
                    };
                    games.get_mut(pos).frame(&canvas, input, &mut ctx, elapsed);
                }
                if let Ok(descriptor) = self.catalog.descriptor(id) {
                    screens::draw_caption(&canvas, descriptor.objective, elapsed);
                }
            }
        }

        screens::draw_footer(&canvas);

        if self.show_stats {
            let phase = self.session.phase();
            let fps = self.clock.smoothed_fps;
            egui::Window::new("Stats")
                .default_pos([10.0, 10.0])
                .show(egui_ctx, |ui| {
                    ui.label(format!("FPS: {fps:.1}"));
                    ui.label(format!("Frame: {}", self.clock.frame_count));
                    ui.label(format!("Phase: {phase:?}"));
                    ui.label(format!("Game: {}", self.session.current().0));
                    ui.label(format!(
                        "Background: {}",
                        self.audio.background_key().unwrap_or("none")
                    ));
                });
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }

        self.clock.begin_frame();
        let now = self.clock.now_ms();

        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.apply_actions(pending, now);
        }

        for event in self.input.drain_events() {
            match event {
                InputEvent::KeyPressed(Key::Escape) => {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                    return;
                }
                InputEvent::KeyPressed(Key::F3) => {
                    self.show_stats = !self.show_stats;
                }
                other => self.handle_event(other, now),
            }
        }

        let tick_actions = self.session.tick(now);
        self.apply_actions(tick_actions, now);

        // egui pass: logic + tessellation first, GPU work after.
        let raw_input = self.painter.begin(&self.window);
        let egui_ctx = self.painter.context();
        let full_output = egui_ctx.run(raw_input, |ctx| self.draw_frame(ctx, now));
        let (primitives, textures_delta) = self.painter.finish(&self.window, full_output);

        let Some((surface_texture, surface_view)) = self.gpu.begin_frame() else {
            self.painter.cleanup(&textures_delta);
            self.input.end_frame();
            return;
        };

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Arcade Encoder"),
            });

        self.painter.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Arcade Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.painter
                .paint(&mut render_pass, &primitives, &screen_descriptor);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        self.painter.cleanup(&textures_delta);
        self.input.end_frame();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<ArcadeState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = flux_platform::window::create_window(event_loop, &self.config);
        self.state = Some(ArcadeState::new(window));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        state.painter.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let (w, h) = (physical_size.width, physical_size.height);
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    let key = map_key(key_code);
                    match event.state {
                        ElementState::Pressed => state.input.push_key_down(key),
                        ElementState::Released => state.input.push_key_up(key),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(state.window.scale_factor());
                state.input.push_pointer_moved(logical.x, logical.y);
            }

            WindowEvent::CursorLeft { .. } => {
                state.input.push_pointer_left();
            }

            WindowEvent::CursorEntered { .. } => {
                state.input.push_pointer_entered();
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => state.input.push_pointer_down(),
                ElementState::Released => state.input.push_pointer_up(),
            },

            WindowEvent::RedrawRequested => {
                state.redraw(event_loop);
            }

            _ => {}
        }
    }
}

/// Map physical keys to the arcade's logical keys. Unrecognized keys become
/// `Key::Other` instead of being dropped: one microgame punishes every key
/// that is not G, so "some other key" is meaningful input here.
fn map_key(key_code: KeyCode) -> Key {
    match key_code {
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::F3 => Key::F3,
        KeyCode::KeyG => Key::G,
        _ => Key::Other,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Four-Second Flux starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
