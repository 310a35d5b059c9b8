//! Conversation state: the message log and the controller that drives it.

pub mod controller;
pub mod message;

pub use controller::{Connectivity, Conversation};
pub use message::{Message, MessageLog, MessageOptions, RiskScore, Sender, TutorialLink};
