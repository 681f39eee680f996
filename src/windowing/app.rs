use crate::World;
use crate::config::JengaConfig;
use crate::rendering::Renderer;
use crate::utils::FrameCounter;
use crate::windowing::AppState;
use futures::executor::block_on;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

const TITLE_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

pub struct AppSettings<S: AppState> {
    pub main_window: WindowAttributes,
    pub config: JengaConfig,
    pub state: S,
}

impl<S: AppState> AppSettings<S> {
    pub fn with_config(mut self, config: JengaConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs until the window is closed. Errors that stopped the loop are returned.
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let event_loop = match EventLoop::new() {
            Err(EventLoopError::NotSupported(_)) => {
                return Err("No graphics backend found that could be used.".into());
            }
            e => e?,
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        let title = self.main_window.title.clone();
        let mut app = App {
            renderer: None,
            world: World::new(self.config),
            window_attributes: self.main_window,
            state: self.state,
            frame_counter: FrameCounter::default(),
            title,
            last_title_update: Instant::now(),
            fatal: None,
        };

        event_loop.run_app(&mut app)?;

        match app.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

pub struct App<S: AppState> {
    renderer: Option<Renderer>,
    world: World,
    window_attributes: WindowAttributes,
    state: S,
    frame_counter: FrameCounter,
    title: String,
    last_title_update: Instant,
    fatal: Option<Box<dyn Error>>,
}

impl<S: AppState> App<S> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, e: Box<dyn Error>) {
        error!("{e}");
        self.fatal = Some(e);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let window = Arc::new(event_loop.create_window(self.window_attributes.clone())?);
        let renderer = block_on(Renderer::new(window))?;

        let size = renderer.window().inner_size();
        self.world
            .scene
            .camera
            .resize(size.width as f32, size.height as f32);

        self.state.init(&mut self.world, renderer.window())?;
        renderer.window().request_redraw();
        self.renderer = Some(renderer);

        Ok(())
    }

    fn redraw(&mut self) -> Result<(), Box<dyn Error>> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        if let Err(e) = self.state.update(&mut self.world, renderer.window()) {
            error!("Error happened when calling update function hook: {e}");
        }

        self.world.update()?;
        self.frame_counter.new_frame_from_world(&self.world);

        if self.last_title_update.elapsed() >= TITLE_UPDATE_INTERVAL {
            self.last_title_update = Instant::now();
            renderer.window().set_title(&format!(
                "{} | {} fps | {} bricks",
                self.title,
                self.frame_counter.fps(),
                self.world.brick_count()
            ));
        }

        renderer.render(&self.world.scene)?;
        renderer.window().request_redraw();

        Ok(())
    }
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        info!("Initializing render state");
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if event_loop.exiting() {
            return;
        }

        if self.world.is_shutting_down() {
            event_loop.exit();
            return;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if window_id != renderer.window().id() {
            return;
        }

        self.world.input.process_event(&event);

        match event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                self.world
                    .scene
                    .camera
                    .resize(size.width as f32, size.height as f32);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };

        if let Err(e) = self.state.destroy(&mut self.world, renderer.window()) {
            error!("Error happened when calling destroy function hook: {e}");
        }
        info!("Shutting down");
    }
}
