// waffle/src/error.rs
//
//! Error codes, the errors that methods can produce, and the per-thread error record.

use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

/// The class of an error.
///
/// The numeric values are stable; `error_to_string()` maps them back to their names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// No error has been recorded on this thread since the last library call.
    NoError = 0x00,
    /// The library hit a condition it cannot recover from.
    Fatal = 0x01,
    /// The native windowing or GL stack failed for a reason the library cannot classify.
    Unknown = 0x02,
    /// An internal invariant of the library was violated.
    Internal = 0x03,
    /// Memory or a native resource could not be allocated.
    BadAlloc = 0x04,
    /// The library must be initialized with `init()` first.
    NotInitialized = 0x05,
    /// `init()` was called while the library was already initialized.
    AlreadyInitialized = 0x06,
    /// An attribute key or value is invalid.
    BadAttribute = 0x08,
    /// A function parameter is invalid.
    BadParameter = 0x10,
    /// The objects passed to a function were created from different displays.
    BadDisplayMatch = 0x11,
    /// The selected platform cannot perform the request.
    UnsupportedOnPlatform = 0x12,
    /// The requested platform was not compiled into this build.
    BuiltWithoutSupport = 0x13,
}

const ALL_ERROR_CODES: [ErrorCode; 12] = [
    ErrorCode::NoError,
    ErrorCode::Fatal,
    ErrorCode::Unknown,
    ErrorCode::Internal,
    ErrorCode::BadAlloc,
    ErrorCode::NotInitialized,
    ErrorCode::AlreadyInitialized,
    ErrorCode::BadAttribute,
    ErrorCode::BadParameter,
    ErrorCode::BadDisplayMatch,
    ErrorCode::UnsupportedOnPlatform,
    ErrorCode::BuiltWithoutSupport,
];

impl ErrorCode {
    /// Returns the symbolic name of this code, e.g. `WAFFLE_ERROR_BAD_ATTRIBUTE`.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorCode::NoError => "WAFFLE_NO_ERROR",
            ErrorCode::Fatal => "WAFFLE_ERROR_FATAL",
            ErrorCode::Unknown => "WAFFLE_ERROR_UNKNOWN",
            ErrorCode::Internal => "WAFFLE_ERROR_INTERNAL",
            ErrorCode::BadAlloc => "WAFFLE_ERROR_BAD_ALLOC",
            ErrorCode::NotInitialized => "WAFFLE_ERROR_NOT_INITIALIZED",
            ErrorCode::AlreadyInitialized => "WAFFLE_ERROR_ALREADY_INITIALIZED",
            ErrorCode::BadAttribute => "WAFFLE_ERROR_BAD_ATTRIBUTE",
            ErrorCode::BadParameter => "WAFFLE_ERROR_BAD_PARAMETER",
            ErrorCode::BadDisplayMatch => "WAFFLE_ERROR_BAD_DISPLAY_MATCH",
            ErrorCode::UnsupportedOnPlatform => "WAFFLE_ERROR_UNSUPPORTED_ON_PLATFORM",
            ErrorCode::BuiltWithoutSupport => "WAFFLE_ERROR_BUILT_WITHOUT_SUPPORT",
        }
    }

    /// Converts a raw error code back into an `ErrorCode`.
    pub fn from_raw(code: i32) -> Option<ErrorCode> {
        ALL_ERROR_CODES.iter().copied().find(|&c| c as i32 == code)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Returns the symbolic name of a raw error code, or `None` if the code is unknown.
pub fn error_to_string(code: i32) -> Option<&'static str> {
    ErrorCode::from_raw(code).map(ErrorCode::to_str)
}

/// Abstraction of the errors that EGL, GLX, CGL, and Xlib return.
///
/// They all tend to follow similar patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// CGL: Invalid pixel format attribute.
    /// EGL: An unrecognized attribute or attribute value was passed in the attribute list.
    /// X11: Attribute to get is bad.
    BadAttribute,
    /// CGL: Invalid renderer property.
    BadProperty,
    /// CGL: Invalid pixel format object.
    /// X11: Invalid framebuffer configuration, including an unsupported OpenGL version.
    BadPixelFormat,
    /// CGL: Invalid context object.
    /// EGL: An EGLContext argument does not name a valid EGL rendering context.
    /// X11: The context is invalid.
    BadContext,
    /// Invalid drawable.
    BadDrawable,
    /// CGL: Invalid display.
    /// EGL: An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// CGL: Invalid context state.
    BadState,
    /// CGL: Invalid numerical value.
    /// X11: Invalid value.
    BadValue,
    /// CGL: Invalid share context.
    /// EGL: Arguments are inconsistent.
    BadMatch,
    /// CGL: Invalid enumerant (constant).
    /// X11: Invalid enum value.
    BadEnumeration,
    /// CGL: Invalid window.
    BadWindow,
    /// CGL: Invalid address; e.g. null pointer passed to function requiring a non-null pointer.
    BadAddress,
    /// CGL: CGL couldn't allocate memory.
    /// EGL: EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// CGL: Invalid Core Graphics connection.
    BadConnection,
    /// EGL: EGL is not initialized, or could not be initialized, for the display.
    NotInitialized,
    /// EGL: EGL cannot access a requested resource.
    BadAccess,
    /// EGL: The current surface of the calling thread is no longer valid.
    BadCurrentSurface,
    /// EGL: An EGLSurface argument does not name a valid surface.
    BadSurface,
    /// EGL: One or more argument values are invalid.
    BadParameter,
    /// EGL: A NativePixmapType argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// EGL: A NativeWindowType argument does not refer to a valid native window.
    BadNativeWindow,
    /// EGL: A power management event has occurred. The context must be recreated.
    ContextLost,
    /// X11: Screen number is bad.
    BadScreen,
    /// X11: The GLX extension is unavailable on the server.
    NoExtension,
    /// X11: Visual number not known by GLX.
    BadVisual,
    /// EGL: The EGL configuration is unsupported.
    BadConfig,
}

/// An error produced by a library call.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    windowing_api_error: Option<WindowingApiError>,
}

impl Error {
    /// Creates an error with the given code and message.
    ///
    /// `NoError` is not a valid error code; it is promoted to `Internal`.
    pub fn new<M>(code: ErrorCode, message: M) -> Error
    where
        M: Into<String>,
    {
        let code = if code == ErrorCode::NoError {
            ErrorCode::Internal
        } else {
            code
        };
        Error {
            code,
            message: message.into(),
            windowing_api_error: None,
        }
    }

    /// Creates an error caused by a failing native windowing API call.
    pub(crate) fn native<M>(code: ErrorCode, message: M, native: WindowingApiError) -> Error
    where
        M: Into<String>,
    {
        let mut error = Error::new(code, message);
        error.windowing_api_error = Some(native);
        error
    }

    #[inline]
    pub(crate) fn bad_attribute<M: Into<String>>(message: M) -> Error {
        Error::new(ErrorCode::BadAttribute, message)
    }

    #[inline]
    pub(crate) fn bad_parameter<M: Into<String>>(message: M) -> Error {
        Error::new(ErrorCode::BadParameter, message)
    }

    #[inline]
    pub(crate) fn unsupported<M: Into<String>>(message: M) -> Error {
        Error::new(ErrorCode::UnsupportedOnPlatform, message)
    }

    #[inline]
    pub(crate) fn unknown<M: Into<String>>(message: M) -> Error {
        Error::new(ErrorCode::Unknown, message)
    }

    /// The class of this error.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// A human-readable description. May be empty.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The native windowing API failure that caused this error, if any.
    #[inline]
    pub fn windowing_api_error(&self) -> Option<WindowingApiError> {
        self.windowing_api_error
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl StdError for Error {}

/// The last error recorded on a thread.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorInfo {
    /// `NoError` if the last library call on this thread succeeded.
    pub code: ErrorCode,
    /// Empty when `code` is `NoError`, and possibly empty otherwise.
    pub message: String,
}

impl ErrorInfo {
    fn none() -> ErrorInfo {
        ErrorInfo {
            code: ErrorCode::NoError,
            message: String::new(),
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<ErrorInfo> = RefCell::new(ErrorInfo::none());
}

/// Returns a copy of the error recorded by the last library call made on this thread.
pub fn get_info() -> ErrorInfo {
    LAST_ERROR.with(|last| last.borrow().clone())
}

/// Returns the code of the error recorded by the last library call made on this thread.
pub fn get_code() -> ErrorCode {
    LAST_ERROR.with(|last| last.borrow().code)
}

pub(crate) fn reset() {
    LAST_ERROR.with(|last| *last.borrow_mut() = ErrorInfo::none());
}

pub(crate) fn record(error: &Error) {
    LAST_ERROR.with(|last| {
        *last.borrow_mut() = ErrorInfo {
            code: error.code,
            message: error.message.clone(),
        }
    });
}

/// Runs a public entry point: clears this thread's error record, then records the error the
/// call produced, if any.
pub(crate) fn track<T, F>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error>,
{
    reset();
    let result = f();
    if let Err(ref error) = result {
        log::debug!("{}", error);
        record(error);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn error_codes_round_trip_through_raw_values() {
        for &code in ALL_ERROR_CODES.iter() {
            assert_eq!(ErrorCode::from_raw(code as i32), Some(code));
        }
        assert_eq!(ErrorCode::from_raw(0x07), None);
        assert_eq!(error_to_string(0x11), Some("WAFFLE_ERROR_BAD_DISPLAY_MATCH"));
        assert_eq!(error_to_string(0x7f), None);
    }

    #[test]
    fn no_error_is_never_stored_in_an_error() {
        let error = Error::new(ErrorCode::NoError, "oops");
        assert_eq!(error.code(), ErrorCode::Internal);
    }

    #[test]
    fn track_records_and_clears() {
        let result: Result<(), Error> = track(|| Err(Error::bad_parameter("width is zero")));
        assert!(result.is_err());
        let info = get_info();
        assert_eq!(info.code, ErrorCode::BadParameter);
        assert_eq!(info.message, "width is zero");

        let result: Result<u32, Error> = track(|| Ok(7));
        assert_eq!(result, Ok(7));
        assert_eq!(get_code(), ErrorCode::NoError);
        assert!(get_info().message.is_empty());
    }

    #[test]
    fn records_are_thread_local() {
        let _ = track::<(), _>(|| Err(Error::unknown("native failure")));
        assert_eq!(get_code(), ErrorCode::Unknown);
        thread::spawn(|| assert_eq!(get_code(), ErrorCode::NoError))
            .join()
            .unwrap();
        assert_eq!(get_code(), ErrorCode::Unknown);
    }

    #[test]
    fn display_includes_code_and_message() {
        let error = Error::native(
            ErrorCode::Unknown,
            "eglCreateContext failed",
            WindowingApiError::BadMatch,
        );
        assert_eq!(
            error.to_string(),
            "WAFFLE_ERROR_UNKNOWN: eglCreateContext failed"
        );
        assert_eq!(error.windowing_api_error(), Some(WindowingApiError::BadMatch));
        assert_eq!(
            Error::new(ErrorCode::Fatal, "").to_string(),
            "WAFFLE_ERROR_FATAL"
        );
    }
}
