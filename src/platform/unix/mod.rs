// waffle/src/platform/unix/mod.rs
//
//! Backends for desktop Unix systems: X11 with GLX or EGL, Wayland, and surfaceless EGL.

#[cfg(x11)]
pub(crate) mod x11;

#[cfg(glx)]
pub(crate) mod glx;

#[cfg(x11_egl)]
pub(crate) mod x11_egl;

#[cfg(wayland)]
pub(crate) mod wayland;

#[cfg(surfaceless_egl)]
pub(crate) mod surfaceless;
