// waffle/src/platform/unix/glx/ffi.rs
//
//! Extra FFI declarations.

#![allow(dead_code)]

use crate::glx::types::{Display, GLXContext, GLXFBConfig};

use std::os::raw::{c_int, c_uchar, c_void};

// GLX_ARB_create_context
pub(crate) const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
pub(crate) const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
pub(crate) const GLX_CONTEXT_FLAGS_ARB: c_int = 0x2094;
pub(crate) const GLX_CONTEXT_DEBUG_BIT_ARB: c_int = 0x0001;
pub(crate) const GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB: c_int = 0x0002;

// GLX_ARB_create_context_profile
pub(crate) const GLX_CONTEXT_PROFILE_MASK_ARB: c_int = 0x9126;
pub(crate) const GLX_CONTEXT_CORE_PROFILE_BIT_ARB: c_int = 1;
pub(crate) const GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB: c_int = 2;

// GLX_EXT_create_context_es_profile and GLX_EXT_create_context_es2_profile
pub(crate) const GLX_CONTEXT_ES_PROFILE_BIT_EXT: c_int = 0x0004;

// GLX_ARB_create_context_robustness
pub(crate) const GLX_CONTEXT_ROBUST_ACCESS_BIT_ARB: c_int = 0x0004;

/// `glXGetProcAddressARB`. Declared by hand so that a null result is representable.
pub(crate) type GetProcAddressFn = unsafe extern "C" fn(name: *const c_uchar) -> *const c_void;

pub(crate) type CreateContextAttribsFn = unsafe extern "C" fn(
    dpy: *mut Display,
    config: GLXFBConfig,
    share_context: GLXContext,
    direct: c_int,
    attrib_list: *const c_int,
) -> GLXContext;
