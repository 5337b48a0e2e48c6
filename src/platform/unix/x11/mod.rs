// waffle/src/platform/unix/x11/mod.rs
//
//! Xlib connections shared by the GLX and X11/EGL backends.

pub(crate) mod error;
pub(crate) mod window;

use crate::error::Error;

use std::ffi::CString;
use std::ops::Deref;
use std::os::raw::{c_int, c_void};
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;
use x11_dl::xlib::{self, Xlib};

/// `libX11`, loaded at runtime.
pub(crate) struct XlibLibrary(Xlib);

// Xlib entry points may be called from any thread; the displays opened with them may not, and
// those stay behind `Rc`.
unsafe impl Send for XlibLibrary {}
unsafe impl Sync for XlibLibrary {}

impl XlibLibrary {
    pub(crate) fn open() -> Result<Arc<XlibLibrary>, Error> {
        let xlib = Xlib::open().map_err(|err| {
            Error::unknown(format!("failed to load libX11: {}", err))
        })?;
        Ok(Arc::new(XlibLibrary(xlib)))
    }
}

impl Deref for XlibLibrary {
    type Target = Xlib;

    #[inline]
    fn deref(&self) -> &Xlib {
        &self.0
    }
}

/// An open Xlib `Display`, closed when the last reference goes away.
pub(crate) struct XlibDisplay {
    pub(crate) xlib: Arc<XlibLibrary>,
    display: *mut xlib::Display,
    screen: c_int,
}

impl XlibDisplay {
    /// Opens `name`, or `$DISPLAY` if `None`.
    pub(crate) fn open(xlib: Arc<XlibLibrary>, name: Option<&str>)
                       -> Result<Rc<XlibDisplay>, Error> {
        let c_name = match name {
            Some(name) => Some(CString::new(name).map_err(|_| {
                Error::bad_parameter(format!("display name {:?} contains NUL", name))
            })?),
            None => None,
        };
        unsafe {
            let display = (xlib.XOpenDisplay)(c_name.as_ref().map_or(ptr::null(), |n| n.as_ptr()));
            if display.is_null() {
                return Err(Error::unknown(format!("XOpenDisplay({}) failed",
                                                  name.unwrap_or("$DISPLAY"))));
            }
            let screen = (xlib.XDefaultScreen)(display);
            log::debug!("opened X display {} (screen {})", name.unwrap_or("$DISPLAY"), screen);
            Ok(Rc::new(XlibDisplay { xlib, display, screen }))
        }
    }

    #[inline]
    pub(crate) fn display(&self) -> *mut xlib::Display {
        self.display
    }

    #[inline]
    pub(crate) fn display_ptr(&self) -> *mut c_void {
        self.display as *mut c_void
    }

    #[inline]
    pub(crate) fn screen(&self) -> c_int {
        self.screen
    }

    #[inline]
    pub(crate) fn root_window(&self) -> xlib::Window {
        unsafe { (self.xlib.XRootWindow)(self.display, self.screen) }
    }

    /// The size of the default screen, in pixels.
    pub(crate) fn screen_size(&self) -> (u32, u32) {
        unsafe {
            let width = (self.xlib.XDisplayWidth)(self.display, self.screen);
            let height = (self.xlib.XDisplayHeight)(self.display, self.screen);
            (width.max(1) as u32, height.max(1) as u32)
        }
    }

    pub(crate) fn flush(&self) {
        unsafe {
            (self.xlib.XFlush)(self.display);
        }
    }
}

impl Drop for XlibDisplay {
    fn drop(&mut self) {
        unsafe {
            (self.xlib.XCloseDisplay)(self.display);
        }
    }
}
