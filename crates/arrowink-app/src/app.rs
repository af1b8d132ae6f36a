//! Core application state and lifecycle.

use arrowink_core::input::{Modifiers, MouseButton as PointerButton, PointerEvent};
use arrowink_core::transformer::{Corner, Edge, HandleKind};
use arrowink_core::{ArrowGeometry, ArrowShape, InputState, ShapeId, ShapeStyle, Stage, export_svg};
use arrowink_render::{RenderContext, Renderer, VelloRenderer};
use kurbo::{Point, Size};
use peniko::Color;
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Window, WindowId};

use crate::event_handler::EventHandler;
use crate::ui::{UiAction, UiState, render_ui};

#[cfg(feature = "native")]
mod file_ops {
    use arrowink_core::{EXPORT_FILE_NAME, SvgDocument};

    /// Save the SVG through a native file dialog. Returns a status line for the overlay.
    pub fn save_svg(document: &SvgDocument) -> Option<String> {
        let dialog = rfd::FileDialog::new()
            .set_title("Export SVG")
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("SVG Image", &["svg"]);

        let Some(path) = dialog.save_file() else {
            log::info!("Export cancelled");
            return None;
        };

        match document.save(&path) {
            Ok(()) => {
                log::info!("Exported {} bytes to: {:?}", document.to_svg_string().len(), path);
                Some(format!("Saved {}", path.display()))
            }
            Err(e) => {
                log::error!("Failed to write SVG: {}", e);
                Some("Export failed".to_string())
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod file_ops {
    use arrowink_core::{EXPORT_FILE_NAME, SVG_MIME_TYPE, SvgDocument};
    use wasm_bindgen::{JsCast, JsValue};

    /// Trigger a browser download of the SVG. Returns a status line for the overlay.
    pub fn save_svg(document: &SvgDocument) -> Option<String> {
        let svg = document.to_svg_string();
        match download_file(EXPORT_FILE_NAME, &svg, SVG_MIME_TYPE) {
            Ok(()) => {
                log::info!("Downloaded {} ({} bytes)", EXPORT_FILE_NAME, svg.len());
                Some(format!("Downloaded {EXPORT_FILE_NAME}"))
            }
            Err(e) => {
                log::error!("Failed to download SVG: {:?}", e);
                Some("Export failed".to_string())
            }
        }
    }

    fn download_file(filename: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        // Create blob
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&JsValue::from_str(content));

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)?;

        // Create download URL
        let url = web_sys::Url::create_object_url_with_blob(&blob)?;

        // Create and click download link
        let a = document
            .create_element("a")?
            .dyn_into::<web_sys::HtmlAnchorElement>()?;

        a.set_href(&url);
        a.set_download(filename);
        a.click();

        // Clean up
        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Endpoints of the arrow mounted at startup, in stage units.
    pub initial_geometry: ArrowGeometry,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "ArrowInk".to_string(),
            width: 800,
            height: 600,
            background_color: Color::WHITE,
            initial_geometry: ArrowGeometry::default(),
            stroke_color: Color::BLACK,
            stroke_width: 5.0,
        }
    }
}

impl AppConfig {
    /// The arrow mounted at startup.
    fn initial_arrow(&self) -> ArrowShape {
        let style = ShapeStyle::new(self.stroke_color.into(), self.stroke_width);
        ArrowShape::new(self.initial_geometry, style)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    stage: Stage,
    /// The mounted arrow, if any.
    shape_id: Option<ShapeId>,
    input: InputState,
    config: AppConfig,

    // Event handling
    event_handler: EventHandler,
}

impl AppState {
    /// Whether an arrow is mounted and can be exported.
    fn can_export(&self) -> bool {
        self.shape_id.is_some_and(|id| self.stage.contains(id))
    }

    /// Export the mounted arrow and hand the document to the platform save path.
    fn export(&mut self) {
        let Some(id) = self.shape_id else {
            log::debug!("Export requested with no arrow mounted");
            return;
        };
        match export_svg(&self.stage, id) {
            Ok(document) => {
                if let Some(status) = file_ops::save_svg(&document) {
                    self.ui_state.status = Some(status);
                }
            }
            Err(e) => log::debug!("Export skipped: {}", e),
        }
    }

    /// Window position (physical pixels) to stage coordinates.
    fn to_stage(&self, x: f64, y: f64) -> Point {
        let scale = self.stage.pixel_ratio;
        Point::new(x / scale, y / scale)
    }

    /// Cursor icon for whatever lies under the pointer.
    fn cursor_icon(&self, point: Point) -> CursorIcon {
        match self.event_handler.get_cursor_for_position(&self.stage, point) {
            Some(Some(kind)) => handle_cursor(kind, self.event_handler.is_manipulating()),
            Some(None) => CursorIcon::Move,
            None => CursorIcon::Default,
        }
    }
}

fn handle_cursor(kind: HandleKind, active: bool) -> CursorIcon {
    match kind {
        HandleKind::Corner(Corner::TopLeft | Corner::BottomRight) => CursorIcon::NwseResize,
        HandleKind::Corner(Corner::TopRight | Corner::BottomLeft) => CursorIcon::NeswResize,
        HandleKind::Edge(Edge::Top | Edge::Bottom) => CursorIcon::NsResize,
        HandleKind::Edge(Edge::Left | Edge::Right) => CursorIcon::EwResize,
        HandleKind::Rotate if active => CursorIcon::Grabbing,
        HandleKind::Rotate => CursorIcon::Grab,
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Left),
        MouseButton::Right => Some(PointerButton::Right),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {}", e);
                return;
            }
        };
        let app = App::new();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            if let Err(e) = event_loop.run_app(&mut app) {
                log::error!("Event loop error: {}", e);
            }
        }
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("RenderContext not initialized");
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = match vello::Renderer::new(device, RendererOptions::default()) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create Vello renderer: {:?}", e);
                return;
            }
        };

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        // Stage works in logical pixels
        let scale = window.scale_factor();
        let mut stage = Stage::new(
            surface.config.width as f64 / scale,
            surface.config.height as f64 / scale,
        )
        .with_pixel_ratio(scale);

        let shape_id = stage.add_arrow(self.config.initial_arrow());
        if let Err(e) = stage.attach_transformer(shape_id) {
            log::warn!("Failed to attach transformer: {}", e);
        }

        log::info!(
            "ArrowInk initialized - {}x{} (scale {})",
            surface.config.width,
            surface.config.height,
            scale
        );

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            stage,
            shape_id: Some(shape_id),
            input: InputState::new(),
            config: self.config.clone(),
            event_handler: EventHandler::new(),
        });

        self.pending_window = None;

        // Request initial redraw
        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        // On WASM, attach canvas to DOM
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let Some(web_window) = web_sys::window() else {
                log::error!("No browser window");
                return;
            };
            let Some(document) = web_window.document() else {
                log::error!("No document");
                return;
            };

            if let Some(loading) = document.get_element_by_id("loading") {
                loading.remove();
            }

            let canvas = document
                .get_element_by_id("arrowink-canvas")
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .or_else(|| {
                    let app_div = document.get_element_by_id("app")?;
                    let canvas = document.create_element("canvas").ok()?;
                    canvas.set_id("arrowink-canvas");
                    app_div.append_child(&canvas).ok()?;
                    canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
                });
            let Some(canvas) = canvas else {
                log::error!("Failed to create canvas");
                return;
            };

            // Fixed stage size, sharp on high-DPI screens
            let dpr = web_window.device_pixel_ratio();
            canvas.set_width((self.config.width as f64 * dpr) as u32);
            canvas.set_height((self.config.height as f64 * dpr) as u32);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{}px", self.config.width));
            let _ = style.set_property("height", &format!("{}px", self.config.height));
            let _ = style.set_property("display", "block");

            log::info!("Canvas created: {}x{} (dpr: {})", self.config.width, self.config.height, dpr);

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(Some(canvas))
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self
                .render_cx
                .get_or_insert_with(vello::util::RenderContext::new);

            let surface = match pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            )) {
                Ok(surface) => surface,
                Err(e) => {
                    log::error!("Failed to create surface: {:?}", e);
                    event_loop.exit();
                    return;
                }
            };

            // Transmute lifetime to 'static - safe because App owns everything
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // On WASM, handle async initialization
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let size = window.inner_size();
                    let (width, height) = if size.width == 0 || size.height == 0 {
                        (self.config.width, self.config.height)
                    } else {
                        (size.width, size.height)
                    };

                    // Get raw pointer to self for async callback
                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        log::info!("Creating surface asynchronously...");

                        let mut render_cx = vello::util::RenderContext::new();

                        match render_cx
                            .create_surface(window_clone.clone(), width, height, PresentMode::AutoVsync)
                            .await
                        {
                            Ok(surface) => {
                                let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };

                                // SAFETY: WASM is single-threaded and the event loop keeps the App alive
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("Failed to create surface: {:?}", e);
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }

                // Request redraw to keep the event loop running
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);

        // An ongoing gesture keeps the pointer even when it crosses the overlay
        let egui_wants_input = !state.event_handler.is_manipulating()
            && (egui_response.consumed
                || state.egui_ctx.is_pointer_over_area()
                || state.egui_ctx.wants_pointer_input()
                || state.egui_ctx.wants_keyboard_input());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                let scale = state.stage.pixel_ratio;
                state.stage.set_size(size.width as f64 / scale, size.height as f64 / scale);

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                state.stage.pixel_ratio = scale_factor;
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let width = state.surface.config.width;
                let height = state.surface.config.height;

                // Build the stage scene
                let render_ctx = RenderContext::new(&state.stage, Size::new(width as f64, height as f64))
                    .with_scale_factor(state.stage.pixel_ratio)
                    .with_background(state.config.background_color)
                    .with_rotation_info(state.event_handler.rotation_state);
                state.shape_renderer.build_scene(&render_ctx);
                let base_color = state.shape_renderer.background_color(&render_ctx);
                let scene = state.shape_renderer.take_scene();

                // Run egui and collect any action
                let can_export = state.can_export();
                let egui_input = state.egui_state.take_egui_input(&state.window);
                let mut ui_action = None;
                let egui_output = state.egui_ctx.run(egui_input, |ctx| {
                    ui_action = render_ui(ctx, &mut state.ui_state, can_export);
                });

                match ui_action {
                    Some(UiAction::ExportSvg) => state.export(),
                    Some(UiAction::ShowShortcuts) => {
                        state.ui_state.shortcuts_modal_open = !state.ui_state.shortcuts_modal_open;
                    }
                    None => {}
                }

                state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
                let egui_primitives = state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

                // Render
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                let device_handle = &render_cx.devices[state.surface.dev_id];
                let device = &device_handle.device;
                let queue = &device_handle.queue;

                let surface_texture = match state.surface.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(e) => {
                        log::warn!("Failed to get surface texture: {:?}", e);
                        return;
                    }
                };

                let params = RenderParams {
                    base_color,
                    width,
                    height,
                    antialiasing_method: AaConfig::Area,
                };

                // Vello's compute shaders need a StorageBinding Rgba8Unorm target
                let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
                    label: Some("vello render texture"),
                    size: vello::wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: vello::wgpu::TextureDimension::D2,
                    format: vello::wgpu::TextureFormat::Rgba8Unorm,
                    usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                        | vello::wgpu::TextureUsages::COPY_SRC
                        | vello::wgpu::TextureUsages::TEXTURE_BINDING,
                    view_formats: &[],
                });

                let render_texture_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

                if let Err(e) =
                    state
                        .vello_renderer
                        .render_to_texture(device, queue, &scene, &render_texture_view, &params)
                {
                    log::error!("Failed to render: {:?}", e);
                    return;
                }

                let surface_view = surface_texture
                    .texture
                    .create_view(&vello::wgpu::TextureViewDescriptor::default());

                // Blit the RGBA intermediate texture to the surface texture
                {
                    let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                        label: Some("blit encoder"),
                    });
                    state
                        .texture_blitter
                        .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
                    queue.submit(std::iter::once(blit_encoder.finish()));
                }

                for (id, image_delta) in &egui_output.textures_delta.set {
                    state.egui_renderer.update_texture(device, queue, *id, image_delta);
                }

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [width, height],
                    pixels_per_point: egui_output.pixels_per_point,
                };

                // egui on top of the stage
                {
                    let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                        label: Some("egui encoder"),
                    });

                    state.egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut egui_encoder,
                        &egui_primitives,
                        &screen_descriptor,
                    );

                    let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                        label: Some("egui render pass"),
                        color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                            view: &surface_view,
                            resolve_target: None,
                            ops: vello::wgpu::Operations {
                                load: vello::wgpu::LoadOp::Load,
                                store: vello::wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    // egui-wgpu needs a 'static render pass
                    let mut render_pass = render_pass.forget_lifetime();
                    state
                        .egui_renderer
                        .render(&mut render_pass, &egui_primitives, &screen_descriptor);
                    drop(render_pass);

                    queue.submit(std::iter::once(egui_encoder.finish()));
                }

                for id in &egui_output.textures_delta.free {
                    state.egui_renderer.free_texture(id);
                }
                surface_texture.present();

                state.input.begin_frame();
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.to_stage(position.x, position.y);
                state.input.handle_pointer_event(PointerEvent::Move { position: point });

                if egui_wants_input {
                    return;
                }

                if state.input.is_button_pressed(PointerButton::Left) && state.event_handler.is_manipulating() {
                    state.event_handler.handle_drag(&mut state.stage, point, &state.input);
                }

                state.window.set_cursor(state.cursor_icon(point));
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                if egui_wants_input {
                    return;
                }

                let Some(button) = pointer_button(button) else {
                    return;
                };
                let position = state.input.pointer_position;

                match btn_state {
                    ElementState::Pressed => {
                        state.input.handle_pointer_event(PointerEvent::Down { position, button });
                        if button == PointerButton::Left {
                            state.event_handler.handle_press(&mut state.stage, position);
                        }
                    }
                    ElementState::Released => {
                        state.input.handle_pointer_event(PointerEvent::Up { position, button });
                        if button == PointerButton::Left {
                            if let Some(geometry) = state.event_handler.handle_release(&mut state.stage, &state.input) {
                                log::debug!("Arrow geometry now {:?}", geometry.to_points());
                            }
                        }
                    }
                }

                state.window.set_cursor(state.cursor_icon(position));
                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let mods = modifiers.state();
                state.input.set_modifiers(Modifiers {
                    shift: mods.shift_key(),
                    ctrl: mods.control_key(),
                    alt: mods.alt_key(),
                    meta: mods.super_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_input || event.state != ElementState::Pressed {
                    return;
                }

                let ctrl = state.input.modifiers.ctrl || state.input.modifiers.meta;
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        if state.ui_state.shortcuts_modal_open {
                            state.ui_state.shortcuts_modal_open = false;
                        } else {
                            state.event_handler.cancel(&mut state.stage);
                        }
                    }
                    Key::Character(c) if ctrl && c.eq_ignore_ascii_case("e") => {
                        if state.can_export() {
                            state.export();
                        }
                    }
                    Key::Character(c) if c.as_str() == "?" => {
                        state.ui_state.shortcuts_modal_open = !state.ui_state.shortcuts_modal_open;
                    }
                    _ => {}
                }
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_arrow() {
        let config = AppConfig::default();
        let arrow = config.initial_arrow();
        assert_eq!(arrow.geometry.to_points(), [50.0, 50.0, 200.0, 200.0]);
        assert_eq!(arrow.style.stroke_width, 5.0);
        assert_eq!(arrow.style.stroke_color.to_css(), "#000000");
    }

    #[test]
    fn test_handle_cursor() {
        assert_eq!(
            handle_cursor(HandleKind::Corner(Corner::TopLeft), false),
            CursorIcon::NwseResize
        );
        assert_eq!(handle_cursor(HandleKind::Edge(Edge::Left), false), CursorIcon::EwResize);
        assert_eq!(handle_cursor(HandleKind::Rotate, true), CursorIcon::Grabbing);
    }

    #[test]
    fn test_pointer_button_mapping() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Left));
        assert_eq!(pointer_button(MouseButton::Back), None);
    }
}
