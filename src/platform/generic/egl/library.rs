// waffle/src/platform/generic/egl/library.rs
//
//! Runtime loading of `libEGL` and the client libraries that go with it.

use super::ffi::{GetPlatformDisplayExtFn, GetProcAddressFn};
use crate::dl::{ClientLibraries, DynamicLibrary};
use crate::egl;
use crate::egl::Egl;
use crate::error::Error;

use std::ffi::CStr;
use std::mem;
use std::os::raw::c_void;

const EGL_LIBRARY_NAMES: [&str; 2] = ["libEGL.so.1", "libEGL.so"];

/// `libEGL`, its entry points, and the GL client libraries of the platform.
pub(crate) struct EglLibrary {
    pub(crate) egl: Egl,
    pub(crate) client_libraries: ClientLibraries,
    get_proc_address: Option<GetProcAddressFn>,
    client_extensions: String,
    // Keep last: the entry points above point into it.
    _library: DynamicLibrary,
}

// EGL entry points may be called from any thread.
unsafe impl Send for EglLibrary {}
unsafe impl Sync for EglLibrary {}

impl EglLibrary {
    pub(crate) fn open(client_libraries: ClientLibraries) -> Result<EglLibrary, Error> {
        let library = DynamicLibrary::open_any(&EGL_LIBRARY_NAMES)?;
        let egl = Egl::load_with(|name| library.symbol_str(name));
        let get_proc_address = unsafe {
            let symbol = library.symbol(c"eglGetProcAddress");
            if symbol.is_null() {
                None
            } else {
                Some(mem::transmute::<*const c_void, GetProcAddressFn>(symbol))
            }
        };

        // Client extensions are only reported with EGL_EXT_client_extensions. Without it the
        // query fails, which is the same as having none.
        let client_extensions = unsafe {
            let string = egl.QueryString(egl::NO_DISPLAY, egl::EXTENSIONS as i32);
            egl.GetError();
            if string.is_null() {
                String::new()
            } else {
                CStr::from_ptr(string).to_string_lossy().into_owned()
            }
        };
        log::debug!("EGL client extensions: {}", client_extensions);

        Ok(EglLibrary {
            egl,
            client_libraries,
            get_proc_address,
            client_extensions,
            _library: library,
        })
    }

    /// Calls `eglGetProcAddress`. Null if the function is unknown.
    pub(crate) fn get_proc_address(&self, name: &CStr) -> *const c_void {
        match self.get_proc_address {
            Some(get_proc_address) => unsafe { get_proc_address(name.as_ptr()) },
            None => std::ptr::null(),
        }
    }

    #[inline]
    pub(crate) fn has_client_extension(&self, name: &str) -> bool {
        has_extension(&self.client_extensions, name)
    }

    /// `eglGetPlatformDisplayEXT`, if `EGL_EXT_platform_base` is present.
    pub(crate) fn get_platform_display_ext(&self) -> Option<GetPlatformDisplayExtFn> {
        if !self.has_client_extension("EGL_EXT_platform_base") {
            return None;
        }
        let symbol = self.get_proc_address(c"eglGetPlatformDisplayEXT");
        if symbol.is_null() {
            None
        } else {
            Some(unsafe { mem::transmute::<*const c_void, GetPlatformDisplayExtFn>(symbol) })
        }
    }
}

/// Matches whole words of a space-separated extension string.
pub(crate) fn has_extension(extensions: &str, name: &str) -> bool {
    extensions.split_ascii_whitespace().any(|extension| extension == name)
}

#[cfg(test)]
mod tests {
    use super::has_extension;

    #[test]
    fn extensions_match_whole_words() {
        let extensions = "EGL_KHR_create_context EGL_KHR_create_context_no_error";
        assert!(has_extension(extensions, "EGL_KHR_create_context"));
        assert!(has_extension(extensions, "EGL_KHR_create_context_no_error"));
        assert!(!has_extension(extensions, "EGL_KHR_create"));
        assert!(!has_extension("", "EGL_KHR_create_context"));
    }
}
