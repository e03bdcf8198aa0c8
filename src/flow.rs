//! Application event loop.
//!
//! This module drives the [`FrameRenderer`] from winit. Setup runs once when
//! the application is resumed: the GPU context is acquired, the textures are
//! loaded and bound, and the scene program is built. On success the renderer
//! becomes ready and the first redraw is requested; every finished frame
//! requests the next one. Closing the window (or leaving the page) stops the
//! loop.
//!
//! Setup is asynchronous. Natively it is driven to completion on a tokio
//! runtime; on the web it is spawned onto the browser's executor and reports
//! back through the event loop proxy.

use std::{fmt::Debug, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::RenderSettings,
    context::Context,
    error::SetupError,
    render::{FrameRenderer, SceneResources},
    resources::texture::load_material_images,
    scene::{self, SceneObject},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

type SetupResult = Result<(Context, SceneResources), SetupError>;

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Box<SetupResult>),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(result) => f
                .debug_tuple("Initialized")
                .field(&(**result).as_ref().map(|_| "ready"))
                .finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    renderer: FrameRenderer,
    ctx: Option<Context>,
    setup_started: bool,
    clock: Instant,
}

impl App {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        scene: Vec<SceneObject>,
        settings: RenderSettings,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            renderer: FrameRenderer::new(scene, settings),
            ctx: None,
            setup_started: false,
            clock: Instant::now(),
        })
    }

    fn finish_setup(&mut self, result: SetupResult) {
        match result {
            Ok((ctx, resources)) => {
                self.renderer.ready(resources);
                log::info!("Scene ready, starting frame loop");
                self.clock = Instant::now();
                ctx.window.request_redraw();
                self.ctx = Some(ctx);
            }
            Err(e) => report_setup_error(&e),
        }
    }

    fn redraw(&mut self) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        let time_ms = self.clock.elapsed().as_secs_f64() * 1000.0;
        match self.renderer.render(ctx, time_ms) {
            Ok(true) => ctx.window.request_redraw(),
            Ok(false) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = ctx.window.inner_size();
                ctx.resize(size.width, size.height);
                ctx.window.request_redraw();
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
                ctx.window.request_redraw();
            }
        }
    }
}

fn report_setup_error(e: &SetupError) {
    log::error!("Scene setup failed: {}", e);
    #[cfg(target_arch = "wasm32")]
    if let SetupError::ContextUnavailable { .. } = e {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message("Browser does not support WebGL");
        }
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.setup_started {
            return;
        }
        self.setup_started = true;

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Castle");

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(self.renderer.settings().canvas_id));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!(
                    "No canvas with id `{}`, letting winit create one",
                    self.renderer.settings().canvas_id
                ),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let scene = self.renderer.scene().to_vec();
        let texture_dir = self.renderer.settings().texture_dir;
        let init_future = async move {
            let ctx = Context::new(window).await?;
            let sources = load_material_images(texture_dir).await;
            let resources = SceneResources::new(
                &ctx.device,
                &ctx.queue,
                ctx.config.format,
                &scene,
                &sources,
            )
            .await?;
            Ok::<_, SetupError>((ctx, resources))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.async_runtime.block_on(init_future);
            self.finish_setup(result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = init_future.await;
                if proxy.send_event(FlowEvent::Initialized(Box::new(result))).is_err() {
                    log::error!("Event loop closed before the scene was ready");
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(result) => {
                // This is the message from our wasm `spawn_local`
                self.finish_setup(*result);
                if let Some(ctx) = self.ctx.as_mut() {
                    let size = ctx.window.inner_size();
                    ctx.resize(size.width, size.height);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.renderer.stop();
                log::info!("Frame loop stopped");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(ctx) = self.ctx.as_mut() {
                    ctx.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Builds the castle and runs the frame loop until the window is closed.
pub fn run(settings: RenderSettings) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let scene = scene::castle()?;
    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, scene, settings)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
