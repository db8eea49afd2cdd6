//! Browser shell plumbing: the rendering surface boundary and the
//! single-domain navigation guard. The iced application in [`crate::gui`]
//! wires these together.

pub mod guard;
pub mod surface;

pub use guard::{GuardState, NavigationGuard};
pub use surface::{HistorySurface, RenderSurface};
