// src/line/mod.rs

pub mod client;
pub mod events;
pub mod signature;

pub use client::LineClient;
pub use events::{WebhookEvent, WebhookPayload};
pub use signature::verify_signature;
