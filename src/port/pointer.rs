//! Pointer port for coordinate capture.
//!
//! The binary runs headless and attaches no pointer; `click` coordinates
//! are then typed as `x, y`. A desktop front end plugs in here.

use crate::error::Result;

/// Blocks until the user clicks and returns the pointer position.
pub trait Pointer {
    fn wait_for_click(&mut self) -> Result<(i32, i32)>;
}
