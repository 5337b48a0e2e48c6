// waffle/src/platform/macos/mod.rs
//
//! Backends for macOS.

pub(crate) mod cgl;
