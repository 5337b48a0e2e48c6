// waffle/src/platform/unix/x11/error.rs
//
//! Translation of X11 errors to `waffle` errors.

use super::XlibDisplay;
use crate::error::{Error, ErrorCode};
use crate::WindowingApiError;

use std::cell::Cell;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use x11_dl::xlib::{self, XErrorEvent};

thread_local! {
    static LAST_X_ERROR_CODE: Cell<u8> = const { Cell::new(0) };
}

unsafe extern "C" fn xlib_error_handler(_: *mut xlib::Display, event: *mut XErrorEvent) -> c_int {
    let error_code = (*event).error_code;
    LAST_X_ERROR_CODE.with(|last_x_error_code| last_x_error_code.set(error_code));
    0
}

/// Runs `f` with X errors recorded instead of terminating the process.
///
/// Returns the result of `f` and the code of the last X error it caused, if any.
pub(crate) fn trap_errors<T, F>(display: &XlibDisplay, f: F) -> (T, Option<u8>)
where
    F: FnOnce() -> T,
{
    let xlib = &display.xlib;
    LAST_X_ERROR_CODE.with(|last_x_error_code| last_x_error_code.set(0));
    unsafe {
        let previous_handler = (xlib.XSetErrorHandler)(Some(xlib_error_handler));
        let result = f();
        (xlib.XSync)(display.display(), xlib::False);
        (xlib.XSetErrorHandler)(previous_handler);

        let error_code = LAST_X_ERROR_CODE.with(|last_x_error_code| last_x_error_code.get());
        (result, if error_code == 0 { None } else { Some(error_code) })
    }
}

fn error_text(display: &XlibDisplay, xlib_error: u8) -> String {
    let mut error_text: Vec<u8> = vec![0; 256];
    unsafe {
        (display.xlib.XGetErrorText)(display.display(),
                                     xlib_error as c_int,
                                     error_text.as_mut_ptr() as *mut c_char,
                                     error_text.len() as c_int - 1);
        CStr::from_ptr(error_text.as_ptr() as *const c_char).to_string_lossy().into_owned()
    }
}

pub(crate) fn xlib_error_to_windowing_api_error(display: &XlibDisplay, xlib_error: u8)
                                                -> WindowingApiError {
    match xlib_error {
        xlib::BadValue => WindowingApiError::BadValue,
        xlib::BadWindow => WindowingApiError::BadWindow,
        xlib::BadMatch => WindowingApiError::BadMatch,
        xlib::BadDrawable => WindowingApiError::BadDrawable,
        xlib::BadAlloc => WindowingApiError::BadAlloc,
        _ if error_text(display, xlib_error).starts_with("GLXBadFBConfig") => {
            WindowingApiError::BadPixelFormat
        }
        _ if error_text(display, xlib_error).starts_with("GLXBadContext") => {
            WindowingApiError::BadContext
        }
        _ => WindowingApiError::Failed,
    }
}

/// Builds the error for a failed Xlib or GLX call.
pub(crate) fn x_error(display: &XlibDisplay, call: &str, xlib_error: Option<u8>) -> Error {
    match xlib_error {
        Some(xlib_error) => {
            let code = if xlib_error == xlib::BadAlloc {
                ErrorCode::BadAlloc
            } else {
                ErrorCode::Unknown
            };
            Error::native(code,
                          format!("{} failed: {}", call, error_text(display, xlib_error)),
                          xlib_error_to_windowing_api_error(display, xlib_error))
        }
        None => Error::unknown(format!("{} failed", call)),
    }
}
