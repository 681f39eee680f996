use crate::World;
use crate::config::JengaConfig;
use crate::windowing::AppSettings;
use std::error::Error;
use winit::dpi::{PhysicalSize, Size};
use winit::window::{Window, WindowAttributes};

/// Hooks into the lifetime of the application. Every hook is optional.
#[allow(unused)]
pub trait AppState: Sized {
    fn init(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn update(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn destroy(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

pub trait AppRuntime: AppState {
    fn configure(self, title: &str, width: u32, height: u32) -> AppSettings<Self>;
}

impl<S: AppState> AppRuntime for S {
    fn configure(self, title: &str, width: u32, height: u32) -> AppSettings<Self> {
        AppSettings {
            main_window: WindowAttributes::default()
                .with_inner_size(Size::Physical(PhysicalSize { width, height }))
                .with_title(title),
            config: JengaConfig::default(),
            state: self,
        }
    }
}
