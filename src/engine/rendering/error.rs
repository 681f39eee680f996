use snafu::Snafu;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Unable to create a surface for the window: {source}"))]
    CreateSurface { source: wgpu::CreateSurfaceError },

    #[snafu(display("No graphics adapter can draw to this window: {source}"))]
    RequestAdapter { source: wgpu::RequestAdapterError },

    #[snafu(display("Unable to open the graphics device: {source}"))]
    RequestDevice { source: wgpu::RequestDeviceError },

    #[snafu(display("The window surface doesn't support any texture format"))]
    SurfaceUnsupported,

    #[snafu(display("The application ran out of GPU memory"))]
    OutOfMemory,
}
