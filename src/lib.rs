// waffle/src/lib.rs
//
//! Choose an OpenGL or OpenGL ES platform at runtime, then create displays, framebuffer
//! configurations, contexts and windows on it through one API.
//!
//! ```no_run
//! use waffle::{ConfigAttributes, Context, ContextApi, Display, InitAttributes, Platform, Window};
//!
//! waffle::init(&InitAttributes::new(Platform::Glx)).unwrap();
//! let display = Display::connect(None).unwrap();
//! let config = waffle::Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl))
//!     .unwrap();
//! let context = Context::create(&config, None).unwrap();
//! let mut window = Window::create(&config, 320, 240).unwrap();
//! window.show().unwrap();
//! waffle::make_current(&display, Some(&window), Some(&context)).unwrap();
//! window.swap_buffers().unwrap();
//! ```

mod api;
pub use crate::api::{current_platform, dl_can_open, dl_sym, get_proc_address, init};
pub use crate::api::{init_from_attrib_list, is_initialized, make_current, teardown};
pub use crate::api::InitAttributes;

pub mod error;
pub use crate::error::{error_to_string, Error, ErrorCode, ErrorInfo, WindowingApiError};

mod enums;
pub use crate::enums::{enum_to_string, ContextApi, ContextProfile, DlLibrary, Enum, Platform};

mod config_attributes;
pub use crate::config_attributes::{ConfigAttributes, ContextFlags};

mod window_attributes;
pub use crate::window_attributes::WindowAttributes;

mod display;
pub use crate::display::{Display, DisplayId};

mod config;
pub use crate::config::Config;

mod context;
pub use crate::context::Context;

mod window;
pub use crate::window::Window;

mod info;
pub use crate::info::{GLInfo, GLVersion};

pub mod native;

mod attrib_list;
mod dl;
mod platform;

#[cfg(egl)]
#[allow(non_camel_case_types, dead_code, clippy::all)]
mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[cfg(glx)]
#[allow(non_camel_case_types, dead_code, clippy::all)]
mod glx {
    include!(concat!(env!("OUT_DIR"), "/glx_bindings.rs"));
}

#[cfg(test)]
mod tests;
