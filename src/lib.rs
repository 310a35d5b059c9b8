//! Coach Carter: terminal client for an AI fitness coach.

pub mod backend;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod error;
pub mod onboarding;
