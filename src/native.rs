// waffle/src/native.rs
//
//! Native handles underlying the library's objects.
//!
//! Handles are borrowed: they stay valid only as long as the object they were taken from.

use std::os::raw::{c_int, c_ulong, c_void};

#[cfg(rwh)]
use rwh_06::{HandleError, RawDisplayHandle, RawWindowHandle};
#[cfg(rwh)]
use std::ptr::NonNull;

/// The native connection behind a `Display`.
#[derive(Clone, Copy, Debug)]
pub enum NativeDisplay {
    Glx {
        xlib_display: *mut c_void,
        screen: c_int,
    },
    X11Egl {
        xlib_display: *mut c_void,
        screen: c_int,
        egl_display: *const c_void,
    },
    Wayland {
        wl_display: *mut c_void,
        egl_display: *const c_void,
    },
    Android {
        egl_display: *const c_void,
    },
    SurfacelessEgl {
        egl_display: *const c_void,
    },
    Cgl,
}

/// The native framebuffer configuration behind a `Config`.
#[derive(Clone, Copy, Debug)]
pub enum NativeConfig {
    Glx {
        xlib_display: *mut c_void,
        glx_fbconfig: *const c_void,
    },
    Egl {
        egl_display: *const c_void,
        egl_config: *const c_void,
    },
    Cgl {
        cgl_pixel_format: *mut c_void,
    },
}

/// The native rendering context behind a `Context`.
#[derive(Clone, Copy, Debug)]
pub enum NativeContext {
    Glx {
        xlib_display: *mut c_void,
        glx_context: *const c_void,
    },
    Egl {
        egl_display: *const c_void,
        egl_context: *const c_void,
    },
    Cgl {
        cgl_context: *mut c_void,
    },
}

/// The native window behind a `Window`.
#[derive(Clone, Copy, Debug)]
pub enum NativeWindow {
    Glx {
        xlib_display: *mut c_void,
        xlib_window: c_ulong,
    },
    X11Egl {
        xlib_display: *mut c_void,
        xlib_window: c_ulong,
        egl_surface: *const c_void,
    },
    Wayland {
        wl_display: *mut c_void,
        wl_surface: *mut c_void,
        wl_egl_window: *mut c_void,
        egl_surface: *const c_void,
    },
    Android {
        a_native_window: *mut c_void,
        egl_surface: *const c_void,
    },
    SurfacelessEgl {
        egl_surface: *const c_void,
    },
    Cgl {
        ns_window: *mut c_void,
        ns_view: *mut c_void,
    },
}

#[cfg(rwh)]
impl NativeDisplay {
    pub(crate) fn raw_display_handle(&self) -> Result<RawDisplayHandle, HandleError> {
        match *self {
            NativeDisplay::Glx { xlib_display, screen } |
            NativeDisplay::X11Egl { xlib_display, screen, .. } => {
                Ok(RawDisplayHandle::Xlib(rwh_06::XlibDisplayHandle::new(
                    NonNull::new(xlib_display),
                    screen,
                )))
            }
            NativeDisplay::Wayland { wl_display, .. } => {
                let wl_display = NonNull::new(wl_display).ok_or(HandleError::Unavailable)?;
                Ok(RawDisplayHandle::Wayland(rwh_06::WaylandDisplayHandle::new(wl_display)))
            }
            NativeDisplay::Android { .. } => {
                Ok(RawDisplayHandle::Android(rwh_06::AndroidDisplayHandle::new()))
            }
            NativeDisplay::Cgl => Ok(RawDisplayHandle::AppKit(rwh_06::AppKitDisplayHandle::new())),
            NativeDisplay::SurfacelessEgl { .. } => Err(HandleError::NotSupported),
        }
    }
}

#[cfg(rwh)]
impl NativeWindow {
    pub(crate) fn raw_window_handle(&self) -> Result<RawWindowHandle, HandleError> {
        match *self {
            NativeWindow::Glx { xlib_window, .. } |
            NativeWindow::X11Egl { xlib_window, .. } => {
                Ok(RawWindowHandle::Xlib(rwh_06::XlibWindowHandle::new(xlib_window)))
            }
            NativeWindow::Wayland { wl_surface, .. } => {
                let wl_surface = NonNull::new(wl_surface).ok_or(HandleError::Unavailable)?;
                Ok(RawWindowHandle::Wayland(rwh_06::WaylandWindowHandle::new(wl_surface)))
            }
            NativeWindow::Android { a_native_window, .. } => {
                let window = NonNull::new(a_native_window).ok_or(HandleError::Unavailable)?;
                Ok(RawWindowHandle::AndroidNdk(rwh_06::AndroidNdkWindowHandle::new(window)))
            }
            NativeWindow::Cgl { ns_view, .. } => {
                let ns_view = NonNull::new(ns_view).ok_or(HandleError::Unavailable)?;
                Ok(RawWindowHandle::AppKit(rwh_06::AppKitWindowHandle::new(ns_view)))
            }
            NativeWindow::SurfacelessEgl { .. } => Err(HandleError::NotSupported),
        }
    }
}
