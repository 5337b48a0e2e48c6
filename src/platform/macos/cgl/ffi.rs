// waffle/src/platform/macos/cgl/ffi.rs
//
//! FFI declarations not provided by the upstream `cgl` crate.

#![allow(non_upper_case_globals)]

use cgl::{CGLContextObj, CGLPixelFormatAttribute};
use objc2::encode::{Encode, Encoding};

// Choose a renderer compatible with GL 1.0.
pub(crate) const kCGLOGLPVersion_Legacy: CGLPixelFormatAttribute = 0x1000;
// Choose a renderer capable of GL3.2 or later.
pub(crate) const kCGLOGLPVersion_3_2_Core: CGLPixelFormatAttribute = 0x3200;
// Choose a renderer capable of GL4.1 or later.
pub(crate) const kCGLOGLPVersion_GL4_Core: CGLPixelFormatAttribute = 0x4100;

/// A `CGLContextObj` as passed to Objective-C methods.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub(crate) struct CglContextRef(pub(crate) CGLContextObj);

unsafe impl Encode for CglContextRef {
    const ENCODING: Encoding = Encoding::Pointer(&Encoding::Struct("_CGLContextObject", &[]));
}
