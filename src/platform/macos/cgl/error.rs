// waffle/src/platform/macos/cgl/error.rs
//
//! Translation of errors from the CGL API to `waffle` errors.

use crate::error::{Error, ErrorCode, WindowingApiError};
use cgl::CGLError;

// No CGL error occurred.
#[allow(non_upper_case_globals)]
pub(crate) const kCGLNoError: CGLError = 0;

pub(crate) trait ToWindowingApiError {
    fn to_windowing_api_error(self) -> WindowingApiError;
}

impl ToWindowingApiError for CGLError {
    fn to_windowing_api_error(self) -> WindowingApiError {
        match self {
            10000 => WindowingApiError::BadAttribute,
            10001 => WindowingApiError::BadProperty,
            10002 => WindowingApiError::BadPixelFormat,
            10004 => WindowingApiError::BadContext,
            10005 => WindowingApiError::BadDrawable,
            10006 => WindowingApiError::BadDisplay,
            10007 => WindowingApiError::BadState,
            10008 => WindowingApiError::BadValue,
            10009 => WindowingApiError::BadMatch,
            10010 => WindowingApiError::BadEnumeration,
            10013 => WindowingApiError::BadWindow,
            10014 => WindowingApiError::BadAddress,
            10016 => WindowingApiError::BadAlloc,
            10017 => WindowingApiError::BadConnection,
            _ => WindowingApiError::Failed,
        }
    }
}

/// Wraps a failed CGL call.
pub(crate) fn cgl_error(call: &str, err: CGLError) -> Error {
    let code = if err == 10016 { ErrorCode::BadAlloc } else { ErrorCode::Unknown };
    Error::native(code,
                  format!("{} failed with CGL error {}", call, err),
                  err.to_windowing_api_error())
}
