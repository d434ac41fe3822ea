//! HTTP handlers for the session surface

pub mod drawing;
pub mod health;
pub mod map;
pub mod session;

pub use drawing::*;
pub use health::*;
pub use map::*;
pub use session::*;
