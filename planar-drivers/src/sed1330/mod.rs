//! SED1330 LCD controller
//!
//! Three layers, each owning the one below:
//!
//! - [`Transport`]: single bus cycles (command, data, read) with busy polling
//! - [`Sed1330`]: controller session (init, cursor, text, clears)
//! - [`Canvas`]: pixel read-modify-write, masked against the touch path

mod canvas;
mod session;
mod transport;

pub use canvas::Canvas;
pub use session::{init_frames, Sed1330, INIT_FRAMES};
pub use transport::Transport;
