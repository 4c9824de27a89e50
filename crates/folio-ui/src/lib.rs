//! # folio-ui
//!
//! Class and style toggling for the interactive parts of the page that are
//! not language or conversation related.

pub mod filter;
pub mod nav;
pub mod scroll;
pub mod show_more;
pub mod throttle;

pub use filter::ProjectFilter;
pub use nav::NavHighlight;
pub use scroll::ScrollReveal;
pub use show_more::ShowMore;
pub use throttle::{Debounce, Throttle};
