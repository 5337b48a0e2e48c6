// waffle/src/dl.rs
//
//! Runtime loading of the native EGL, GLX and GL client libraries.

use crate::enums::DlLibrary;
use crate::error::Error;

use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;
use std::sync::OnceLock;

use libc::{dlclose, dlerror, dlopen, dlsym, RTLD_LAZY, RTLD_LOCAL};

/// A `dlopen()`ed shared library, closed on drop.
#[derive(Debug)]
pub(crate) struct DynamicLibrary {
    name: &'static str,
    handle: *mut c_void,
}

// dlopen handles may be used from any thread.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl DynamicLibrary {
    /// Opens the library with the given file name or path.
    pub(crate) fn open(name: &'static str) -> Result<DynamicLibrary, Error> {
        let c_name = CString::new(name)
            .map_err(|_| Error::bad_parameter(format!("library name {:?} contains NUL", name)))?;
        unsafe {
            let handle = dlopen(c_name.as_ptr(), RTLD_LAZY | RTLD_LOCAL);
            if handle.is_null() {
                return Err(Error::unknown(format!(
                    "dlopen(\"{}\") failed: {}",
                    name,
                    last_dl_error()
                )));
            }
            log::debug!("opened {}", name);
            Ok(DynamicLibrary { name, handle })
        }
    }

    /// Opens the first library of `names` that can be opened.
    pub(crate) fn open_any(names: &[&'static str]) -> Result<DynamicLibrary, Error> {
        let mut last_error = Error::bad_parameter("no library names were given");
        for &name in names {
            match DynamicLibrary::open(name) {
                Ok(library) => return Ok(library),
                Err(err) => last_error = err,
            }
        }
        Err(last_error)
    }

    #[inline]
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a symbol, returning null if the library does not export it.
    pub(crate) fn symbol(&self, name: &CStr) -> *const c_void {
        unsafe { dlsym(self.handle, name.as_ptr()) as *const c_void }
    }

    /// Like `symbol()`, taking a Rust string as the generated loaders do.
    pub(crate) fn symbol_str(&self, name: &str) -> *const c_void {
        match CString::new(name) {
            Ok(name) => self.symbol(&name),
            Err(_) => ptr::null(),
        }
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        unsafe {
            if dlclose(self.handle) != 0 {
                log::warn!("dlclose(\"{}\") failed: {}", self.name, last_dl_error());
            }
        }
    }
}

unsafe fn last_dl_error() -> String {
    let error = dlerror();
    if error.is_null() {
        String::from("unknown error")
    } else {
        CStr::from_ptr(error).to_string_lossy().into_owned()
    }
}

/// The client GL libraries of one platform, opened on first use.
pub(crate) struct ClientLibraries {
    names: [&'static [&'static str]; 4],
    libraries: [OnceLock<Option<DynamicLibrary>>; 4],
}

impl ClientLibraries {
    /// `names` lists candidate file names for GL, GLES1, GLES2 and GLES3, in that order. An
    /// empty list means the platform has no such library.
    pub(crate) fn new(names: [&'static [&'static str]; 4]) -> ClientLibraries {
        ClientLibraries {
            names,
            libraries: Default::default(),
        }
    }

    /// The client libraries of a desktop Linux system.
    #[cfg_attr(not(linux), allow(dead_code))]
    pub(crate) fn linux() -> ClientLibraries {
        ClientLibraries::new([
            &["libGL.so.1", "libGL.so"],
            &["libGLESv1_CM.so.1", "libGLESv1_CM.so"],
            &["libGLESv2.so.2", "libGLESv2.so"],
            &["libGLESv2.so.2", "libGLESv2.so"],
        ])
    }

    /// True if the platform has this library at all.
    #[inline]
    pub(crate) fn is_supported(&self, library: DlLibrary) -> bool {
        !self.names[library.index()].is_empty()
    }

    fn get(&self, library: DlLibrary) -> Result<&DynamicLibrary, Error> {
        let names = self.names[library.index()];
        if names.is_empty() {
            return Err(Error::unsupported(format!(
                "{} is not supported on this platform",
                library
            )));
        }
        let slot = self.libraries[library.index()].get_or_init(|| {
            match DynamicLibrary::open_any(names) {
                Ok(lib) => Some(lib),
                Err(err) => {
                    log::debug!("{}", err);
                    None
                }
            }
        });
        slot.as_ref()
            .ok_or_else(|| Error::unknown(format!("failed to open {}", names.join(" or "))))
    }

    pub(crate) fn can_open(&self, library: DlLibrary) -> bool {
        self.get(library).is_ok()
    }

    pub(crate) fn sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
        let lib = self.get(library)?;
        let symbol = lib.symbol(name);
        if symbol.is_null() {
            return Err(Error::unknown(format!(
                "dlsym(\"{}\", \"{}\") failed",
                lib.name(),
                name.to_string_lossy()
            )));
        }
        Ok(symbol)
    }
}
