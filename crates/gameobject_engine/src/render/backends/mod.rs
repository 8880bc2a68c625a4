//! Rendering backend implementations
//!
//! Window-backed renderers live in applications. The engine ships a headless
//! backend for tools, servers and tests.

pub mod headless;

pub use headless::{DrawCall, HeadlessBackend};
