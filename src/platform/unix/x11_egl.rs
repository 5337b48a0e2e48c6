// waffle/src/platform/unix/x11_egl.rs
//
//! EGL on an Xlib display.

use super::x11::window::XlibWindow;
use super::x11::{XlibDisplay, XlibLibrary};
use crate::dl::ClientLibraries;
use crate::egl::types::{EGLDisplay, EGLNativeWindowType, EGLSurface, EGLenum, EGLint};
use crate::enums::Platform;
use crate::error::Error;
use crate::native::{NativeDisplay, NativeWindow};
use crate::platform::generic::egl::ffi::EGL_PLATFORM_X11_KHR;
use crate::platform::generic::egl::{EglConnection, EglHooks, EglNativeWindow};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::os::raw::c_void;
use std::rc::Rc;
use std::sync::Arc;
use x11_dl::xlib;

pub(crate) struct X11EglHooks {
    xlib: Arc<XlibLibrary>,
}

impl X11EglHooks {
    pub(crate) fn new() -> Result<X11EglHooks, Error> {
        Ok(X11EglHooks { xlib: XlibLibrary::open()? })
    }
}

impl EglHooks for X11EglHooks {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::X11Egl
    }

    #[inline]
    fn egl_platform(&self) -> Option<EGLenum> {
        Some(EGL_PLATFORM_X11_KHR)
    }

    fn client_libraries(&self) -> ClientLibraries {
        ClientLibraries::linux()
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn EglConnection>, Error> {
        let x = XlibDisplay::open(self.xlib.clone(), name)?;
        Ok(Box::new(X11EglConnection { x }))
    }
}

struct X11EglConnection {
    x: Rc<XlibDisplay>,
}

impl EglConnection for X11EglConnection {
    #[inline]
    fn native_display(&self) -> *mut c_void {
        self.x.display_ptr()
    }

    fn native(&self, egl_display: EGLDisplay) -> NativeDisplay {
        NativeDisplay::X11Egl {
            xlib_display: self.x.display_ptr(),
            screen: self.x.screen(),
            egl_display,
        }
    }

    fn create_window(&self, visual_id: EGLint, attributes: &WindowAttributes)
                     -> Result<Box<dyn EglNativeWindow>, Error> {
        let x = XlibWindow::new(&self.x, visual_id as xlib::VisualID, attributes)?;
        Ok(Box::new(X11EglWindow { x }))
    }
}

struct X11EglWindow {
    x: XlibWindow,
}

impl EglNativeWindow for X11EglWindow {
    #[inline]
    fn egl_window(&self) -> Option<EGLNativeWindowType> {
        Some(self.x.window() as EGLNativeWindowType)
    }

    fn show(&mut self) -> Result<(), Error> {
        self.x.show()
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        self.x.resize(size)
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.x.size()
    }

    fn native(&self, egl_surface: EGLSurface) -> NativeWindow {
        NativeWindow::X11Egl {
            xlib_display: self.x.display().display_ptr(),
            xlib_window: self.x.window(),
            egl_surface,
        }
    }
}
