// waffle/src/platform/generic/egl/error.rs
//
//! Translation of errors from the EGL API to `waffle` errors.

use crate::egl;
use crate::egl::types::{EGLenum, EGLint};
use crate::egl::Egl;
use crate::error::{Error, ErrorCode};
use crate::WindowingApiError;

pub(crate) trait ToWindowingApiError {
    fn to_windowing_api_error(self) -> WindowingApiError;
}

impl ToWindowingApiError for EGLint {
    fn to_windowing_api_error(self) -> WindowingApiError {
        match self as EGLenum {
            egl::NOT_INITIALIZED => WindowingApiError::NotInitialized,
            egl::BAD_ACCESS => WindowingApiError::BadAccess,
            egl::BAD_ALLOC => WindowingApiError::BadAlloc,
            egl::BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
            egl::BAD_CONFIG => WindowingApiError::BadConfig,
            egl::BAD_CONTEXT => WindowingApiError::BadContext,
            egl::BAD_CURRENT_SURFACE => WindowingApiError::BadCurrentSurface,
            egl::BAD_DISPLAY => WindowingApiError::BadDisplay,
            egl::BAD_SURFACE => WindowingApiError::BadSurface,
            egl::BAD_MATCH => WindowingApiError::BadMatch,
            egl::BAD_PARAMETER => WindowingApiError::BadParameter,
            egl::BAD_NATIVE_PIXMAP => WindowingApiError::BadNativePixmap,
            egl::BAD_NATIVE_WINDOW => WindowingApiError::BadNativeWindow,
            egl::CONTEXT_LOST => WindowingApiError::ContextLost,
            _ => WindowingApiError::Failed,
        }
    }
}

fn error_name(code: EGLint) -> &'static str {
    match code as EGLenum {
        egl::SUCCESS => "EGL_SUCCESS",
        egl::NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
        egl::BAD_ACCESS => "EGL_BAD_ACCESS",
        egl::BAD_ALLOC => "EGL_BAD_ALLOC",
        egl::BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
        egl::BAD_CONFIG => "EGL_BAD_CONFIG",
        egl::BAD_CONTEXT => "EGL_BAD_CONTEXT",
        egl::BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
        egl::BAD_DISPLAY => "EGL_BAD_DISPLAY",
        egl::BAD_SURFACE => "EGL_BAD_SURFACE",
        egl::BAD_MATCH => "EGL_BAD_MATCH",
        egl::BAD_PARAMETER => "EGL_BAD_PARAMETER",
        egl::BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
        egl::BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
        egl::CONTEXT_LOST => "EGL_CONTEXT_LOST",
        _ => "unknown EGL error",
    }
}

/// Builds the error for a failed EGL call from `eglGetError()`.
pub(crate) fn last_error(egl: &Egl, call: &str) -> Error {
    let code = unsafe { egl.GetError() };
    let error_code = if code as EGLenum == egl::BAD_ALLOC {
        ErrorCode::BadAlloc
    } else {
        ErrorCode::Unknown
    };
    Error::native(error_code,
                  format!("{} failed with {} (0x{:04x})", call, error_name(code), code),
                  code.to_windowing_api_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn egl_errors_map_to_windowing_api_errors() {
        assert_eq!((egl::BAD_CONFIG as EGLint).to_windowing_api_error(),
                   WindowingApiError::BadConfig);
        assert_eq!((egl::BAD_NATIVE_WINDOW as EGLint).to_windowing_api_error(),
                   WindowingApiError::BadNativeWindow);
        assert_eq!((0x1234 as EGLint).to_windowing_api_error(), WindowingApiError::Failed);
        assert_eq!(error_name(egl::BAD_MATCH as EGLint), "EGL_BAD_MATCH");
    }
}
