// waffle/src/platform/generic/egl/ffi.rs
//
//! EGL extension constants and entry points that the generated bindings do not cover.

#![allow(dead_code)]

use crate::egl::types::{EGLDisplay, EGLenum, EGLint};

use std::os::raw::{c_char, c_void};

pub(crate) const EGL_PLATFORM_ANDROID_KHR: EGLenum = 0x3141;
pub(crate) const EGL_PLATFORM_X11_KHR: EGLenum = 0x31d5;
pub(crate) const EGL_PLATFORM_WAYLAND_KHR: EGLenum = 0x31d8;
pub(crate) const EGL_PLATFORM_SURFACELESS_MESA: EGLenum = 0x31dd;

// EGL_KHR_create_context
pub(crate) const EGL_CONTEXT_MAJOR_VERSION_KHR: EGLint = 0x3098;
pub(crate) const EGL_CONTEXT_MINOR_VERSION_KHR: EGLint = 0x30fb;
pub(crate) const EGL_CONTEXT_FLAGS_KHR: EGLint = 0x30fc;
pub(crate) const EGL_CONTEXT_OPENGL_PROFILE_MASK_KHR: EGLint = 0x30fd;
pub(crate) const EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT_KHR: EGLint = 0x01;
pub(crate) const EGL_CONTEXT_OPENGL_COMPATIBILITY_PROFILE_BIT_KHR: EGLint = 0x02;
pub(crate) const EGL_CONTEXT_OPENGL_DEBUG_BIT_KHR: EGLint = 0x01;
pub(crate) const EGL_CONTEXT_OPENGL_FORWARD_COMPATIBLE_BIT_KHR: EGLint = 0x02;
pub(crate) const EGL_CONTEXT_OPENGL_ROBUST_ACCESS_BIT_KHR: EGLint = 0x04;
pub(crate) const EGL_OPENGL_ES3_BIT_KHR: EGLint = 0x40;

// EGL_EXT_create_context_robustness
pub(crate) const EGL_CONTEXT_OPENGL_ROBUST_ACCESS_EXT: EGLint = 0x30bf;

/// `eglGetProcAddress`. Declared by hand so that a null result is representable.
pub(crate) type GetProcAddressFn = unsafe extern "C" fn(name: *const c_char) -> *const c_void;

/// `eglGetPlatformDisplayEXT` from `EGL_EXT_platform_base`.
pub(crate) type GetPlatformDisplayExtFn = unsafe extern "C" fn(
    platform: EGLenum,
    native_display: *mut c_void,
    attrib_list: *const EGLint,
) -> EGLDisplay;
