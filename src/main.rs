use jenga::{AppState, JengaApp, World};
use log::info;
use std::error::Error;
use winit::window::Window;

#[derive(Debug, Default, JengaApp)]
struct Jenga;

impl AppState for Jenga {
    fn init(&mut self, world: &mut World, _window: &Window) -> Result<(), Box<dyn Error>> {
        world.build_scene()?;

        info!("Hold any mouse button for slow motion, press space to rebuild the tower");
        info!("Drag with the left mouse button to orbit, scroll to zoom");
        Ok(())
    }
}
