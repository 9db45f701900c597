// Error type for everything around the pencil: window, files, colors.
// The drawing core itself never fails; out-of-range cells are simply dropped.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // pushing the frame buffer failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pixel file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image export error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid color {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
