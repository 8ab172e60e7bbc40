#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod piece;
pub mod plot;
pub mod pull;
pub mod renderer;
pub mod util;

pub use app::PieceApp;
pub use bitmap::{Bitmap, Ink};
pub use config::{HostConfig, PieceKind, PullConfig};
pub use error::{PieceError, PlotError};
pub use geometry::{Point, Rect};
pub use input::{InputHandler, Pen, PenEvent};
pub use piece::{Cursor, Piece};
pub use plot::PlotPiece;
pub use pull::PullPiece;
pub use renderer::Renderer;
