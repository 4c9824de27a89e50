//! # folio-channels
//!
//! Contact hand-off. A pending message plus a chosen channel becomes an
//! external URI (`wa.me`, `mailto:`) that is opened through the
//! [`Navigator`](folio_core::traits::Navigator). Delivery is the external
//! app's business; the contract ends at the hand-off.

pub mod copy;
pub mod email;
pub mod handoff;
pub mod whatsapp;

pub use copy::ChannelCopy;
pub use email::EmailChannel;
pub use handoff::{ChannelKind, ContactChannel, ContactHandoff};
pub use whatsapp::WhatsAppChannel;
