// waffle/src/platform/unix/glx/mod.rs
//
//! The GLX backend: OpenGL contexts on X11 through `libGL`.

pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod display;
pub(crate) mod ffi;
pub(crate) mod window;

use self::display::GlxDisplay;
use self::ffi::{CreateContextAttribsFn, GetProcAddressFn};
use super::x11::XlibLibrary;
use crate::dl::{ClientLibraries, DynamicLibrary};
use crate::enums::{DlLibrary, Platform};
use crate::error::Error;
use crate::glx::Glx;
use crate::platform::{DisplayBackend, PlatformBackend};

use std::ffi::CStr;
use std::mem;
use std::os::raw::c_void;
use std::sync::Arc;

const GL_LIBRARY_NAMES: [&str; 2] = ["libGL.so.1", "libGL.so"];

/// `libGL` and the GLX entry points it exports.
pub(crate) struct GlxLibrary {
    pub(crate) glx: Glx,
    pub(crate) client_libraries: ClientLibraries,
    get_proc_address: GetProcAddressFn,
    pub(crate) create_context_attribs: Option<CreateContextAttribsFn>,
    _library: DynamicLibrary,
}

// GLX entry points may be called from any thread.
unsafe impl Send for GlxLibrary {}
unsafe impl Sync for GlxLibrary {}

impl GlxLibrary {
    fn open() -> Result<GlxLibrary, Error> {
        let library = DynamicLibrary::open_any(&GL_LIBRARY_NAMES)?;
        let glx = Glx::load_with(|name| library.symbol_str(name));

        unsafe {
            let symbol = library.symbol(c"glXGetProcAddressARB");
            if symbol.is_null() {
                return Err(Error::unknown(format!("{} does not export glXGetProcAddressARB",
                                                  library.name())));
            }
            let get_proc_address = mem::transmute::<*const c_void, GetProcAddressFn>(symbol);

            let symbol = get_proc_address(c"glXCreateContextAttribsARB".as_ptr() as *const u8);
            let create_context_attribs = if symbol.is_null() {
                None
            } else {
                Some(mem::transmute::<*const c_void, CreateContextAttribsFn>(symbol))
            };

            Ok(GlxLibrary {
                glx,
                client_libraries: ClientLibraries::linux(),
                get_proc_address,
                create_context_attribs,
                _library: library,
            })
        }
    }

    /// Calls `glXGetProcAddressARB`. Null if the function is unknown.
    #[inline]
    pub(crate) fn get_proc_address(&self, name: &CStr) -> *const c_void {
        unsafe { (self.get_proc_address)(name.as_ptr() as *const u8) }
    }
}

pub(crate) struct GlxPlatform {
    library: Arc<GlxLibrary>,
    xlib: Arc<XlibLibrary>,
}

impl GlxPlatform {
    pub(crate) fn new() -> Result<GlxPlatform, Error> {
        let xlib = XlibLibrary::open()?;
        let library = Arc::new(GlxLibrary::open()?);
        Ok(GlxPlatform { library, xlib })
    }
}

impl PlatformBackend for GlxPlatform {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::Glx
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn DisplayBackend>, Error> {
        Ok(Box::new(GlxDisplay::new(self.library.clone(), self.xlib.clone(), name)?))
    }

    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        self.library.get_proc_address(name)
    }

    fn dl_can_open(&self, library: DlLibrary) -> bool {
        self.library.client_libraries.can_open(library)
    }

    fn dl_sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
        self.library.client_libraries.sym(library, name)
    }
}
