//! Core types for dialectic.

pub mod message;

pub use message::*;
