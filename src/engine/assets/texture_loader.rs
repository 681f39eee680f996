use crossbeam_channel::{Receiver, TryRecvError, bounded};
use image::RgbaImage;
use log::{debug, error};
use snafu::{ResultExt, Snafu};
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum TextureError {
    #[snafu(display("Failed to load texture {}: {source}", path.display()))]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[snafu(display("Texture loader for {} stopped without a result", path.display()))]
    Disconnected { path: PathBuf },

    #[snafu(display("Failed to spawn the texture loader thread: {source}"))]
    Spawn { source: std::io::Error },
}

pub fn load_rgba(path: &Path) -> Result<RgbaImage, TextureError> {
    let image = image::open(path).context(LoadErr { path })?;
    Ok(image.into_rgba8())
}

/// A texture being decoded on a background thread.
///
/// The frame loop polls it once per frame and never blocks on it. Dropping a pending
/// texture discards the result once it arrives.
#[derive(Debug)]
pub struct PendingTexture {
    path: PathBuf,
    rx: Receiver<Result<RgbaImage, TextureError>>,
    done: bool,
}

impl PendingTexture {
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self, TextureError> {
        let path = path.into();
        let (tx, rx) = bounded(1);

        let thread_path = path.clone();
        std::thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || {
                debug!("Loading texture {}", thread_path.display());
                let result = load_rgba(&thread_path);
                if tx.send(result).is_err() {
                    debug!("Nobody waits for texture {} anymore", thread_path.display());
                }
            })
            .context(SpawnErr)?;

        Ok(PendingTexture {
            path,
            rx,
            done: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the result once it's available. After a result was returned this only
    /// returns `None`.
    pub fn poll(&mut self) -> Option<Result<RgbaImage, TextureError>> {
        if self.done {
            return None;
        }

        match self.rx.try_recv() {
            Ok(result) => {
                self.done = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                error!("Texture loader for {} disconnected", self.path.display());
                Some(DisconnectedErr { path: &self.path }.fail())
            }
        }
    }

    /// Blocks until the texture is decoded.
    pub fn wait(mut self) -> Result<RgbaImage, TextureError> {
        if self.done {
            return DisconnectedErr { path: &self.path }.fail();
        }
        self.done = true;
        self.rx
            .recv()
            .ok()
            .unwrap_or_else(|| DisconnectedErr { path: &self.path }.fail())
    }
}
