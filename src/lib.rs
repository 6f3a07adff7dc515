//! Swiftris (workspace facade crate).
//!
//! Re-exports the member crates under short names so tests, benches and the
//! binary can write `swiftris::core::GameSession` and friends.

pub use swiftris_core as core;
pub use swiftris_engine as engine;
pub use swiftris_types as types;
