//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds
//! - Storage (LocalStorage on web, memory on native)
//! - The JS-facing session handle

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::default_slot;

/// Seed for a new run
#[cfg(target_arch = "wasm32")]
pub fn run_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_seed() -> u64 {
    rand::random()
}
