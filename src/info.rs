// waffle/src/info.rs
//
//! OpenGL information.

use crate::api;
use crate::enums::ContextApi;
use crate::error::{self, Error};

use glow::HasContext;
use std::ffi::CStr;
use std::fmt::{self, Display, Formatter};
use std::mem;
use std::os::raw::c_void;
use std::ptr;

/// Describes the OpenGL version that is requested when a context is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GLVersion {
    /// The major version number.
    pub major: u8,
    /// The minor version number.
    pub minor: u8,
}

impl GLVersion {
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }
}

impl Display for GLVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Strings and extensions reported by the current context.
#[derive(Clone, Debug)]
pub struct GLInfo {
    /// `GL_VENDOR`.
    pub vendor: String,
    /// `GL_RENDERER`.
    pub renderer: String,
    /// `GL_VERSION`.
    pub version: String,
    /// `GL_SHADING_LANGUAGE_VERSION`. Empty for OpenGL ES 1.x, which has no shaders.
    pub shading_language_version: String,
    /// The extension names, sorted.
    pub extensions: Vec<String>,
}

impl GLInfo {
    /// Queries the context current on this thread, which must be of the given API.
    ///
    /// GL entry points are resolved with `get_proc_address()`, falling back to `dl_sym()` on the
    /// API's client library.
    pub fn query(api: ContextApi) -> Result<GLInfo, Error> {
        error::track(|| {
            // Make sure the library is initialized before handing glow a loader.
            api::platform_backend()?;

            // glow queries GL_VERSION itself while loading and panics if that fails.
            check_version_string(api)?;

            let gl = unsafe { glow::Context::from_loader_function_cstr(|name| load(api, name)) };
            unsafe {
                let version = gl.get_parameter_string(glow::VERSION);
                let shading_language_version = if api == ContextApi::OpenGlEs1 {
                    String::new()
                } else {
                    gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
                };
                let mut extensions: Vec<String> =
                    gl.supported_extensions().iter().cloned().collect();
                extensions.sort();
                Ok(GLInfo {
                    vendor: gl.get_parameter_string(glow::VENDOR),
                    renderer: gl.get_parameter_string(glow::RENDERER),
                    version,
                    shading_language_version,
                    extensions,
                })
            }
        })
    }
}

type GetStringFn = unsafe extern "system" fn(name: u32) -> *const u8;

fn check_version_string(api: ContextApi) -> Result<(), Error> {
    let get_string = load(api, c"glGetString");
    if get_string.is_null() {
        return Err(Error::unknown(format!("glGetString could not be loaded for {}", api)));
    }
    let version = unsafe {
        let get_string: GetStringFn = mem::transmute(get_string);
        get_string(glow::VERSION)
    };
    if version.is_null() {
        return Err(Error::unknown(
            "glGetString(GL_VERSION) returned nothing; is a context current?",
        ));
    }
    Ok(())
}

fn load(api: ContextApi, name: &CStr) -> *const c_void {
    let address = api::get_proc_address_cstr(name).unwrap_or(ptr::null());
    if !address.is_null() {
        return address;
    }
    api::dl_sym_cstr(api.dl_library(), name).unwrap_or(ptr::null())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_by_major_then_minor() {
        assert!(GLVersion::new(3, 2) > GLVersion::new(3, 1));
        assert!(GLVersion::new(4, 0) > GLVersion::new(3, 3));
        assert!(GLVersion::new(1, 1) < GLVersion::new(2, 0));
        assert_eq!(GLVersion::new(4, 6).to_string(), "4.6");
    }
}
