use crate::World;
use crate::prefabs::BodyError;
use log::trace;

/// A recipe for something that can be put into a [`World`].
pub trait Prefab {
    type Output;

    fn prefab_name(&self) -> &'static str;
    fn build(&self, world: &mut World) -> Result<Self::Output, BodyError>;
    fn spawn(&self, world: &mut World) -> Result<Self::Output, BodyError> {
        let output = self.build(world)?;
        trace!("Spawned {}", self.prefab_name());
        Ok(output)
    }
}
