#![forbid(unsafe_code)]

pub mod compose;
pub mod core;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod player;
pub mod sheet;
pub mod surface;

pub use core::{FrameIndex, SurfaceSize};
pub use error::{BlitlineError, BlitlineResult};
pub use loader::{load_timeline, timeline_from_js_str, timeline_from_json_str};
pub use model::{Blit, Frame, Timeline};
pub use player::{Animation, FrameTiming, Frames, Player, RenderedFrame, render_frame};
pub use sheet::{SpriteSheet, decode_sheet, load_sheet};
pub use surface::Surface;
