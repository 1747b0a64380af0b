#![forbid(unsafe_code)]

//! Kinetic interaction engine: deterministic motion primitives plus the
//! pointer, scroll, and text effects of an editorial portfolio site,
//! composed from a structured content document.
//!
//! All time is injected (`step(dt)` / millisecond clocks) and all
//! randomness is seeded, so every effect can be driven and asserted
//! headlessly.

pub mod content;
pub mod dispatch;
pub mod ease;
pub mod error;
pub mod events;
pub mod filters;
pub mod gate;
pub mod glitch;
pub mod motion;
pub mod pointer;
pub mod ripple;
pub mod scroll;
pub mod spring;
pub mod stage;

pub use kurbo;

pub use content::SiteContent;
pub use ease::Ease;
pub use error::{KineticError, KineticResult};
pub use events::{Dispatcher, Event};
pub use stage::{Stage, StageFrame};
