mod core;
mod page;
mod scroll;
mod starfield;

pub use core::CorePlugin;
pub(crate) use core::{StartupSet, UpdateSet};
pub use page::PagePlugin;
pub use scroll::ScrollPlugin;
pub use starfield::StarfieldPlugin;
