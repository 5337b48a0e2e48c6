// waffle/src/platform/android/mod.rs
//
//! EGL on Android.
//!
//! Applications do not create windows on Android; the system hands them an `ANativeWindow`.
//! Windows here therefore only wrap one, through `Window::from_raw_window_handle()`.

mod ffi;

use crate::dl::ClientLibraries;
use crate::egl::types::{EGLDisplay, EGLNativeWindowType, EGLSurface, EGLenum, EGLint};
use crate::enums::Platform;
use crate::error::Error;
use crate::native::{NativeDisplay, NativeWindow};
use crate::platform::generic::egl::ffi::EGL_PLATFORM_ANDROID_KHR;
use crate::platform::generic::egl::{EglConnection, EglHooks, EglNativeWindow};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use rwh_06::RawWindowHandle;
use std::os::raw::c_void;
use std::ptr;

pub(crate) struct AndroidHooks;

impl EglHooks for AndroidHooks {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::Android
    }

    #[inline]
    fn egl_platform(&self) -> Option<EGLenum> {
        Some(EGL_PLATFORM_ANDROID_KHR)
    }

    fn client_libraries(&self) -> ClientLibraries {
        ClientLibraries::new([
            &[],
            &["libGLESv1_CM.so"],
            &["libGLESv2.so"],
            &["libGLESv3.so"],
        ])
    }

    #[inline]
    fn supports_desktop_gl(&self) -> bool {
        false
    }

    fn connect(&self, _: Option<&str>) -> Result<Box<dyn EglConnection>, Error> {
        Ok(Box::new(AndroidConnection))
    }
}

struct AndroidConnection;

impl EglConnection for AndroidConnection {
    /// `EGL_DEFAULT_DISPLAY`.
    #[inline]
    fn native_display(&self) -> *mut c_void {
        ptr::null_mut()
    }

    fn native(&self, egl_display: EGLDisplay) -> NativeDisplay {
        NativeDisplay::Android { egl_display }
    }

    fn create_window(&self, _: EGLint, _: &WindowAttributes)
                     -> Result<Box<dyn EglNativeWindow>, Error> {
        Err(Error::unsupported(
            "Android windows are owned by the system; wrap one with \
             Window::from_raw_window_handle()",
        ))
    }

    fn wrap_window(&self, handle: RawWindowHandle) -> Result<Box<dyn EglNativeWindow>, Error> {
        match handle {
            RawWindowHandle::AndroidNdk(handle) => {
                let a_native_window = handle.a_native_window.as_ptr();
                unsafe { ffi::ANativeWindow_acquire(a_native_window) };
                Ok(Box::new(AndroidWindow { a_native_window }))
            }
            _ => Err(Error::bad_parameter("expected an AndroidNdk window handle")),
        }
    }
}

/// A reference to an `ANativeWindow`, released on drop.
struct AndroidWindow {
    a_native_window: *mut c_void,
}

impl EglNativeWindow for AndroidWindow {
    #[inline]
    fn egl_window(&self) -> Option<EGLNativeWindowType> {
        Some(self.a_native_window as EGLNativeWindowType)
    }

    // Visibility belongs to the activity.
    fn show(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn resize(&mut self, _: Size2D<u32>) -> Result<(), Error> {
        Err(Error::unsupported("Android windows are sized by the system"))
    }

    fn size(&self) -> Size2D<u32> {
        unsafe {
            let width = ffi::ANativeWindow_getWidth(self.a_native_window);
            let height = ffi::ANativeWindow_getHeight(self.a_native_window);
            Size2D::new(width.max(0) as u32, height.max(0) as u32)
        }
    }

    fn native(&self, egl_surface: EGLSurface) -> NativeWindow {
        NativeWindow::Android {
            a_native_window: self.a_native_window,
            egl_surface,
        }
    }
}

impl Drop for AndroidWindow {
    fn drop(&mut self) {
        unsafe { ffi::ANativeWindow_release(self.a_native_window) }
    }
}
