//! 2D N-body Gravity Simulation
//!
//! Interactive front end for `gravity_core`, rendered with wgpu and egui.
//!
//! Controls:
//! - Left drag (Spawn mode): launch a cluster, velocity from the drag
//! - Left click (Inspect mode): select the nearest body
//! - Tab: switch between Spawn and Inspect
//! - Space: Pause/resume simulation
//! - 1/2/3/4/5: Ring, Spiral, Two Galaxies, Random, Solar System
//! - T: Toggle orbit trails
//! - R: Clear all bodies
//! - Scroll: Zoom in/out
//! - Arrow keys / WASD: Pan camera

mod camera;
mod config;
mod controls;
mod graphics;
mod renderer;
mod trails;

use anyhow::Result;
use camera::Camera2D;
use clap::Parser;
use config::{Args, ViewerConfig};
use controls::{Command, ControlPanel, PointerMode, Shape, Status};
use glam::Vec2;
use gravity_core::diagnostics::Summary;
use gravity_core::{
    find_body_index_near, spawn_cluster, Body, BodyTemplate, DVec2, ForceField, GalaxyPairParams,
    RunState, SimulationConfig, SolarSystemParams, SpiralParams, UniformParams,
};
use graphics::GraphicsContext;
use renderer::Renderer;
use trails::{Trails, DEFAULT_TRAIL_LENGTH};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

/// Drag length (world units) to launch velocity
const DRAG_VELOCITY_SCALE: f64 = 0.4;
/// Radius of the disc a spawned cluster is scattered over
const CLUSTER_SCATTER: f64 = 30.0;
const CLUSTER_BODY_RADIUS: f64 = 5.0;
/// Pick tolerance around the cursor, in pixels
const PICK_TOLERANCE_PX: f64 = 5.0;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    egui: EguiState,
    camera: Camera2D,
    simulation: SimulationConfig,
    viewer: ViewerConfig,
    bodies: Vec<Body>,
    trails: Trails,
    run_state: RunState,
    panel: ControlPanel,
    cursor: PhysicalPosition<f64>,
    drag_start: Option<PhysicalPosition<f64>>,
    selected: Option<usize>,
    fps: f32,
}

impl App {
    fn new(ctx: GraphicsContext, simulation: SimulationConfig, viewer: ViewerConfig) -> Self {
        let renderer = Renderer::new(&ctx, viewer.bodies.max(viewer.per_galaxy * 2));
        let camera = Camera2D::fit(ctx.size.width, ctx.size.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        let mut app = Self {
            ctx,
            renderer,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
            camera,
            simulation,
            viewer,
            bodies: Vec::new(),
            trails: Trails::new(DEFAULT_TRAIL_LENGTH),
            run_state: RunState::Running,
            panel: ControlPanel::default(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            drag_start: None,
            selected: None,
            fps: 0.0,
        };
        app.apply(Command::Generate(Shape::TwoGalaxies));
        app
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.resize(self.ctx.size.width, self.ctx.size.height);
    }

    /// Center of the initial view in simulation space
    fn view_center(&self) -> DVec2 {
        DVec2::new(self.viewer.width as f64, self.viewer.height as f64) * 0.5
    }

    fn generate(&self, shape: Shape) -> gravity_core::Result<Vec<Body>> {
        let center = self.view_center();
        match shape {
            Shape::Ring => gravity_core::ring(self.viewer.bodies, center, 100.0),
            Shape::Spiral => gravity_core::spiral(
                &SpiralParams::new(self.viewer.bodies, 0.3, center, DVec2::ZERO).with_arms(3),
            ),
            Shape::TwoGalaxies => gravity_core::two_galaxies(&GalaxyPairParams::new(
                self.viewer.per_galaxy,
                center - DVec2::new(100.0, 0.0),
                center + DVec2::new(100.0, 0.0),
                DVec2::new(0.0, 30.0),
                DVec2::new(0.0, -30.0),
            )),
            Shape::Random => gravity_core::uniform_random(
                &UniformParams {
                    count: self.viewer.bodies,
                    velocity_range: (0.0, 0.0),
                    mass_range: (1.0, 100.0),
                    width: self.viewer.width as f64,
                    height: self.viewer.height as f64,
                },
                &mut rand::thread_rng(),
            ),
            Shape::SolarSystem => gravity_core::solar_system(&SolarSystemParams::new(
                center,
                self.simulation.gravity,
            )),
        }
    }

    /// Commands only run between steps, never during one.
    fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.run_state.toggle(),
            Command::Reset => {
                self.bodies.clear();
                self.trails.clear();
                self.selected = None;
            }
            Command::ToggleTrails => self.trails.toggle(),
            Command::Generate(shape) => match self.generate(shape) {
                Ok(bodies) => {
                    log::info!("loaded {} preset with {} bodies", shape.label(), bodies.len());
                    self.bodies = bodies;
                    self.trails.clear();
                    if shape == Shape::SolarSystem {
                        self.trails.set_enabled(true);
                    }
                    self.selected = None;
                }
                Err(e) => log::error!("failed to generate {}: {e}", shape.label()),
            },
            Command::SpawnCluster { anchor, velocity } => self.launch_cluster(anchor, velocity),
            Command::Select(point) => {
                let tolerance = PICK_TOLERANCE_PX * self.camera.world_per_pixel();
                self.selected = find_body_index_near(&self.bodies, point, tolerance);
            }
        }
    }

    fn update(&mut self, frame_dt: f64) {
        let dt = frame_dt.min(self.viewer.max_dt);
        let sub_dt = dt / self.viewer.substeps as f64;
        for _ in 0..self.viewer.substeps {
            gravity_core::step(
                &mut self.bodies,
                sub_dt,
                &self.simulation,
                self.run_state.is_paused(),
            );
        }
        if !self.run_state.is_paused() {
            self.trails.record(&self.bodies);
        }

        if frame_dt > 0.0 {
            let instant = (1.0 / frame_dt) as f32;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * 0.9 + instant * 0.1
            };
        }
    }

    fn world_at(&self, position: PhysicalPosition<f64>) -> DVec2 {
        self.camera.screen_to_world(position.x, position.y)
    }

    fn handle_mouse_button(&mut self, state: ElementState) {
        match (state, self.panel.mode) {
            (ElementState::Pressed, PointerMode::Spawn) => {
                if !self.egui.ctx.is_pointer_over_area() {
                    self.drag_start = Some(self.cursor);
                }
            }
            (ElementState::Released, PointerMode::Spawn) => {
                if let Some(start) = self.drag_start.take() {
                    self.spawn_from_drag(start);
                }
            }
            (ElementState::Pressed, PointerMode::Inspect) => {
                if !self.egui.ctx.is_pointer_over_area() {
                    self.apply(Command::Select(self.world_at(self.cursor)));
                }
            }
            (ElementState::Released, PointerMode::Inspect) => {}
        }
    }

    fn spawn_from_drag(&mut self, start: PhysicalPosition<f64>) {
        let anchor = self.world_at(start);
        let velocity = (self.world_at(self.cursor) - anchor) * DRAG_VELOCITY_SCALE;
        self.apply(Command::SpawnCluster { anchor, velocity });
    }

    fn launch_cluster(&mut self, anchor: DVec2, velocity: DVec2) {
        let template = BodyTemplate::new(self.panel.cluster_mass, CLUSTER_BODY_RADIUS);
        match spawn_cluster(
            &mut self.bodies,
            anchor,
            self.panel.cluster_size,
            velocity,
            template,
            CLUSTER_SCATTER,
            &mut rand::thread_rng(),
        ) {
            Ok(()) => log::info!(
                "spawned {} bodies at {anchor} moving {velocity}",
                self.panel.cluster_size
            ),
            Err(e) => log::error!("failed to spawn cluster: {e}"),
        }
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => self.apply(Command::TogglePause),
            KeyCode::KeyR => self.apply(Command::Reset),
            KeyCode::Digit1 => self.apply(Command::Generate(Shape::Ring)),
            KeyCode::Digit2 => self.apply(Command::Generate(Shape::Spiral)),
            KeyCode::Digit3 => self.apply(Command::Generate(Shape::TwoGalaxies)),
            KeyCode::Digit4 => self.apply(Command::Generate(Shape::Random)),
            KeyCode::Digit5 => self.apply(Command::Generate(Shape::SolarSystem)),
            KeyCode::KeyT => self.apply(Command::ToggleTrails),
            KeyCode::Tab => self.panel.toggle_mode(),
            KeyCode::ArrowUp | KeyCode::KeyW => self.camera.pan(Vec2::Y),
            KeyCode::ArrowDown | KeyCode::KeyS => self.camera.pan(Vec2::NEG_Y),
            KeyCode::ArrowLeft | KeyCode::KeyA => self.camera.pan(Vec2::NEG_X),
            KeyCode::ArrowRight | KeyCode::KeyD => self.camera.pan(Vec2::X),
            _ => {}
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let num_instances = self.renderer.update_instances(
            &self.ctx,
            &self.camera,
            &self.bodies,
            &self.trails,
            self.selected,
        );

        // Build egui UI
        let status = Status {
            fps: self.fps,
            paused: self.run_state.is_paused(),
            trails: self.trails.is_enabled(),
            summary: Summary::of(&self.bodies, &ForceField::from(&self.simulation)),
            selected: self.selected.and_then(|i| self.bodies.get(i)),
        };
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let mut commands = Vec::new();
        let drag = self.drag_start.map(|start| (start, self.cursor));
        let full_output = self.egui.ctx.clone().run(raw_input, |ctx| {
            commands = self.panel.show(ctx, &status);
            if let Some((start, end)) = drag {
                draw_drag_line(ctx, start, end);
            }
        });
        for command in commands {
            self.apply(command);
        }

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, num_instances);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui
            .state
            .on_window_event(&self.ctx.window, event)
            .consumed
    }
}

/// Preview of the launch velocity while the mouse is held down
fn draw_drag_line(ctx: &egui::Context, start: PhysicalPosition<f64>, end: PhysicalPosition<f64>) {
    let scale = ctx.pixels_per_point();
    let from = egui::pos2(start.x as f32 / scale, start.y as f32 / scale);
    let to = egui::pos2(end.x as f32 / scale, end.y as f32 / scale);
    let stroke = egui::Stroke::new(2.0, egui::Color32::GREEN);

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("drag_line"),
    ));
    painter.line_segment([from, to], stroke);
    painter.circle_stroke(from, CLUSTER_BODY_RADIUS as f32, stroke);
}

fn main() -> Result<()> {
    env_logger::init();

    let (simulation, viewer) = Args::parse().into_configs()?;
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Gravity Simulation - Rust/wgpu",
        viewer.width,
        viewer.height,
    ))?;

    let mut app = App::new(ctx, simulation, viewer);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                // Cursor and button releases are tracked even over the panel
                // so a drag that ends on it still completes.
                match event {
                    WindowEvent::CursorMoved { position, .. } => app.cursor = *position,
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        button: MouseButton::Left,
                        ..
                    } => app.handle_mouse_button(ElementState::Released),
                    _ => {}
                }

                let consumed = app.handle_window_event(event);
                if consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(*size),
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => app.handle_mouse_button(ElementState::Pressed),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => app.handle_key(*key, *state),
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.camera.zoom_by(scroll);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = std::time::Instant::now();
                        let frame_dt = (now - last_time).as_secs_f64();
                        last_time = now;

                        app.update(frame_dt);
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => log::warn!("render error: {e:?}"),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
