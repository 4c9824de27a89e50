//! # folio-chat
//!
//! The scripted conversation: keyword rules, the conversation widget state
//! machine with its cancellable typing delay, the contact choice surface
//! and the project inquiry form.

pub mod bindings;
pub mod choice;
pub mod inquiry;
pub mod rules;
pub mod session;
pub mod typing;
pub mod widget;

pub use choice::ContactChoice;
pub use rules::{Reply, ResponseEngine, ResponseRule, RuleSet};
pub use session::{ConversationSession, Screen, WidgetState};
pub use typing::{PendingReply, ReplyDelay, TypingTimer};
pub use widget::{ConversationWidget, IgnoreReason, InquiryOutcome, SubmitOutcome};
