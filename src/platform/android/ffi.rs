// waffle/src/platform/android/ffi.rs
//
//! The parts of the NDK's `native_window.h` used here.

use std::os::raw::{c_int, c_void};

#[link(name = "android")]
extern "C" {
    pub(crate) fn ANativeWindow_acquire(window: *mut c_void);
    pub(crate) fn ANativeWindow_release(window: *mut c_void);
    pub(crate) fn ANativeWindow_getWidth(window: *mut c_void) -> c_int;
    pub(crate) fn ANativeWindow_getHeight(window: *mut c_void) -> c_int;
}
