// waffle/src/platform/macos/cgl/mod.rs
//
//! The CGL backend: Apple's OpenGL implementation, drawing into AppKit windows.

mod config;
mod context;
mod display;
mod error;
mod ffi;
mod window;

use self::display::CglDisplay;
use crate::dl::ClientLibraries;
use crate::enums::{DlLibrary, Platform};
use crate::error::Error;
use crate::platform::{DisplayBackend, PlatformBackend};

use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::sync::Arc;

const OPENGL_FRAMEWORK: &str = "/System/Library/Frameworks/OpenGL.framework/OpenGL";

pub(crate) struct CglPlatform {
    client_libraries: Arc<ClientLibraries>,
}

impl CglPlatform {
    pub(crate) fn new() -> Result<CglPlatform, Error> {
        let client_libraries = Arc::new(ClientLibraries::new([
            &[OPENGL_FRAMEWORK],
            &[],
            &[],
            &[],
        ]));
        // Everything needs the framework, so fail now rather than on first use.
        if !client_libraries.can_open(DlLibrary::OpenGl) {
            return Err(Error::unknown(format!("failed to open {}", OPENGL_FRAMEWORK)));
        }
        Ok(CglPlatform { client_libraries })
    }
}

impl PlatformBackend for CglPlatform {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::Cgl
    }

    fn connect(&self, _: Option<&str>) -> Result<Box<dyn DisplayBackend>, Error> {
        Ok(Box::new(CglDisplay::new(self.client_libraries.clone())))
    }

    // CGL has no GetProcAddress; every entry point is exported by the framework.
    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        self.client_libraries.sym(DlLibrary::OpenGl, name).unwrap_or(ptr::null())
    }

    fn dl_can_open(&self, library: DlLibrary) -> bool {
        self.client_libraries.can_open(library)
    }

    fn dl_sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
        self.client_libraries.sym(library, name)
    }
}
