// waffle/src/platform/generic/mod.rs
//
//! Backends that are not tied to one operating system.

#[cfg(egl)]
pub(crate) mod egl;
