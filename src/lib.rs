// Pixel pencil: draw on a grid of square cells with a mouse or finger.
// Fast strokes are rasterized between samples so they never leave gaps.

pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod pencil;
pub mod persist;
pub mod raster;
pub mod surface;
pub mod types;
pub mod window;

pub use config::PencilConfig;
pub use error::{Error, Result};
pub use events::{EventKind, ListenerId, PencilEvent};
pub use grid::PixelGrid;
pub use input::{Device, InputEvent, InputSource, Key, Listeners, PointerEvent, Propagation, Subscriptions};
pub use pencil::{InteractionState, Pencil};
pub use raster::rasterize;
pub use surface::RenderSurface;
pub use types::{Color, FrameBuffer, GridCoord, GridExtent};
