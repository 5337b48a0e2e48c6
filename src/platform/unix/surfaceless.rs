// waffle/src/platform/unix/surfaceless.rs
//
//! EGL without any window system, through `EGL_MESA_platform_surfaceless`.
//!
//! There is nothing to show, so windows are pbuffers.

use crate::dl::ClientLibraries;
use crate::egl;
use crate::egl::types::{EGLDisplay, EGLNativeWindowType, EGLSurface, EGLenum, EGLint};
use crate::enums::Platform;
use crate::error::Error;
use crate::native::{NativeDisplay, NativeWindow};
use crate::platform::generic::egl::ffi::EGL_PLATFORM_SURFACELESS_MESA;
use crate::platform::generic::egl::{EglConnection, EglHooks, EglNativeWindow};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::os::raw::c_void;
use std::ptr;

pub(crate) struct SurfacelessHooks;

impl EglHooks for SurfacelessHooks {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::SurfacelessEgl
    }

    #[inline]
    fn egl_platform(&self) -> Option<EGLenum> {
        Some(EGL_PLATFORM_SURFACELESS_MESA)
    }

    fn client_libraries(&self) -> ClientLibraries {
        ClientLibraries::linux()
    }

    fn connect(&self, _: Option<&str>) -> Result<Box<dyn EglConnection>, Error> {
        Ok(Box::new(SurfacelessConnection))
    }
}

struct SurfacelessConnection;

impl EglConnection for SurfacelessConnection {
    #[inline]
    fn native_display(&self) -> *mut c_void {
        ptr::null_mut()
    }

    fn native(&self, egl_display: EGLDisplay) -> NativeDisplay {
        NativeDisplay::SurfacelessEgl { egl_display }
    }

    #[inline]
    fn surface_type(&self) -> EGLint {
        egl::PBUFFER_BIT as EGLint
    }

    fn create_window(&self, _: EGLint, attributes: &WindowAttributes)
                     -> Result<Box<dyn EglNativeWindow>, Error> {
        if attributes.fullscreen {
            return Err(Error::unsupported("surfaceless EGL has no screen to fill"));
        }
        Ok(Box::new(PbufferWindow { size: attributes.size }))
    }
}

struct PbufferWindow {
    size: Size2D<u32>,
}

impl EglNativeWindow for PbufferWindow {
    #[inline]
    fn egl_window(&self) -> Option<EGLNativeWindowType> {
        None
    }

    fn show(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn resize(&mut self, _: Size2D<u32>) -> Result<(), Error> {
        Err(Error::unsupported("surfaceless EGL windows cannot be resized"))
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.size
    }

    fn native(&self, egl_surface: EGLSurface) -> NativeWindow {
        NativeWindow::SurfacelessEgl { egl_surface }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn pbuffer_windows_cannot_resize_or_fill_the_screen() {
        let connection = SurfacelessConnection;
        let err = connection.create_window(0, &WindowAttributes::fullscreen()).err().unwrap();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

        let mut window = connection.create_window(0, &WindowAttributes::windowed(64, 32)).unwrap();
        assert!(window.egl_window().is_none());
        assert_eq!(window.size(), Size2D::new(64, 32));
        assert!(window.show().is_ok());
        let err = window.resize(Size2D::new(10, 10)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);
    }
}
