// waffle/src/platform/unix/wayland/mod.rs
//
//! EGL on a Wayland compositor.
//!
//! The `wl_display` is opened through `libwayland-client` directly, so that EGL and
//! `wayland-client` share one connection. Windows are `xdg_toplevel`s.

mod window;

use self::window::WaylandWindow;
use crate::dl::ClientLibraries;
use crate::egl::types::{EGLDisplay, EGLenum, EGLint};
use crate::enums::Platform;
use crate::error::Error;
use crate::native::NativeDisplay;
use crate::platform::generic::egl::ffi::EGL_PLATFORM_WAYLAND_KHR;
use crate::platform::generic::egl::{EglConnection, EglHooks, EglNativeWindow};
use crate::window_attributes::WindowAttributes;

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use wayland_backend::client::Backend;
use wayland_client::globals::{registry_queue_init, GlobalList, GlobalListContents};
use wayland_client::protocol::wl_compositor::WlCompositor;
use wayland_client::protocol::wl_output::{self, WlOutput};
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::protocol::wl_surface::WlSurface;
use wayland_client::{delegate_noop, Connection, Dispatch, EventQueue, QueueHandle, WEnum};
use wayland_protocols::xdg::shell::client::xdg_surface::{self, XdgSurface};
use wayland_protocols::xdg::shell::client::xdg_toplevel::{self, XdgToplevel};
use wayland_protocols::xdg::shell::client::xdg_wm_base::{self, XdgWmBase};
use wayland_sys::client::{wl_display, wayland_client_handle};

pub(crate) struct WaylandHooks;

impl WaylandHooks {
    pub(crate) fn new() -> Result<WaylandHooks, Error> {
        if !wayland_sys::client::is_lib_available() {
            return Err(Error::unknown("failed to load libwayland-client.so.0"));
        }
        if !wayland_sys::egl::is_lib_available() {
            return Err(Error::unknown("failed to load libwayland-egl.so.1"));
        }
        Ok(WaylandHooks)
    }
}

impl EglHooks for WaylandHooks {
    #[inline]
    fn platform(&self) -> Platform {
        Platform::Wayland
    }

    #[inline]
    fn egl_platform(&self) -> Option<EGLenum> {
        Some(EGL_PLATFORM_WAYLAND_KHR)
    }

    fn client_libraries(&self) -> ClientLibraries {
        ClientLibraries::linux()
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn EglConnection>, Error> {
        Ok(Box::new(WaylandConnection { shared: Rc::new(WaylandShared::connect(name)?) }))
    }
}

/// Event state for one display's queue.
#[derive(Default)]
pub(crate) struct WaylandState;

/// Configuration received for one window.
#[derive(Default)]
pub(crate) struct ToplevelState {
    configured: AtomicBool,
    width: AtomicI32,
    height: AtomicI32,
}

impl ToplevelState {
    #[inline]
    pub(crate) fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// The size the compositor asked for, if it picked one.
    pub(crate) fn size(&self) -> Option<(i32, i32)> {
        let (width, height) =
            (self.width.load(Ordering::Acquire), self.height.load(Ordering::Acquire));
        if width > 0 && height > 0 {
            Some((width, height))
        } else {
            None
        }
    }
}

/// The current mode of the first output.
#[derive(Default)]
struct OutputState {
    width: AtomicI32,
    height: AtomicI32,
}

impl Dispatch<WlRegistry, GlobalListContents> for WaylandState {
    fn event(_: &mut Self,
             _: &WlRegistry,
             _: wl_registry::Event,
             _: &GlobalListContents,
             _: &Connection,
             _: &QueueHandle<Self>) {
    }
}

impl Dispatch<XdgWmBase, ()> for WaylandState {
    fn event(_: &mut Self,
             wm_base: &XdgWmBase,
             event: xdg_wm_base::Event,
             _: &(),
             _: &Connection,
             _: &QueueHandle<Self>) {
        if let xdg_wm_base::Event::Ping { serial } = event {
            wm_base.pong(serial);
        }
    }
}

impl Dispatch<XdgSurface, Arc<ToplevelState>> for WaylandState {
    fn event(_: &mut Self,
             surface: &XdgSurface,
             event: xdg_surface::Event,
             state: &Arc<ToplevelState>,
             _: &Connection,
             _: &QueueHandle<Self>) {
        if let xdg_surface::Event::Configure { serial } = event {
            surface.ack_configure(serial);
            state.configured.store(true, Ordering::Release);
        }
    }
}

impl Dispatch<XdgToplevel, Arc<ToplevelState>> for WaylandState {
    fn event(_: &mut Self,
             _: &XdgToplevel,
             event: xdg_toplevel::Event,
             state: &Arc<ToplevelState>,
             _: &Connection,
             _: &QueueHandle<Self>) {
        if let xdg_toplevel::Event::Configure { width, height, .. } = event {
            state.width.store(width, Ordering::Release);
            state.height.store(height, Ordering::Release);
        }
    }
}

impl Dispatch<WlOutput, Arc<OutputState>> for WaylandState {
    fn event(_: &mut Self,
             _: &WlOutput,
             event: wl_output::Event,
             state: &Arc<OutputState>,
             _: &Connection,
             _: &QueueHandle<Self>) {
        if let wl_output::Event::Mode { flags: WEnum::Value(flags), width, height, .. } = event {
            if flags.contains(wl_output::Mode::Current) {
                state.width.store(width, Ordering::Release);
                state.height.store(height, Ordering::Release);
            }
        }
    }
}

delegate_noop!(WaylandState: ignore WlCompositor);
delegate_noop!(WaylandState: ignore WlSurface);

fn wayland_error<E: std::fmt::Display>(call: &str, err: E) -> Error {
    Error::unknown(format!("{} failed: {}", call, err))
}

/// Protocol objects of one connection.
pub(crate) struct WaylandGlobals {
    pub(crate) connection: Connection,
    pub(crate) queue: RefCell<EventQueue<WaylandState>>,
    state: RefCell<WaylandState>,
    pub(crate) compositor: WlCompositor,
    pub(crate) wm_base: XdgWmBase,
    output: Option<(WlOutput, Arc<OutputState>)>,
}

/// A `wl_display` connection shared by a display and its windows.
pub(crate) struct WaylandShared {
    // Taken in `drop()` so the proxies go before the connection is closed.
    globals: Option<WaylandGlobals>,
    wl_display: *mut wl_display,
}

impl WaylandShared {
    fn connect(name: Option<&str>) -> Result<WaylandShared, Error> {
        let c_name = match name {
            Some(name) => Some(CString::new(name).map_err(|_| {
                Error::bad_parameter("the Wayland display name contains a NUL byte")
            })?),
            None => None,
        };
        let name_ptr = c_name.as_ref().map_or(ptr::null(), |name| name.as_ptr());
        let wl_display = unsafe { (wayland_client_handle().wl_display_connect)(name_ptr) };
        if wl_display.is_null() {
            return Err(Error::unknown(format!("wl_display_connect({:?}) failed", name)));
        }

        let mut shared = WaylandShared { globals: None, wl_display };
        shared.globals = Some(shared.bind_globals()?);
        Ok(shared)
    }

    fn bind_globals(&self) -> Result<WaylandGlobals, Error> {
        let backend = unsafe { Backend::from_foreign_display(self.wl_display) };
        let connection = Connection::from_backend(backend);
        let (globals, mut queue) = registry_queue_init::<WaylandState>(&connection)
            .map_err(|err| wayland_error("wl_display_get_registry", err))?;
        let qh = queue.handle();

        let compositor: WlCompositor = globals
            .bind(&qh, 1..=4, ())
            .map_err(|err| wayland_error("binding wl_compositor", err))?;
        let wm_base: XdgWmBase = globals
            .bind(&qh, 1..=2, ())
            .map_err(|err| wayland_error("binding xdg_wm_base", err))?;
        let output = bind_output(&globals, &qh);

        let mut state = WaylandState;
        queue.roundtrip(&mut state).map_err(|err| wayland_error("wl_display_roundtrip", err))?;

        Ok(WaylandGlobals {
            connection,
            queue: RefCell::new(queue),
            state: RefCell::new(state),
            compositor,
            wm_base,
            output,
        })
    }

    #[inline]
    pub(crate) fn wl_display(&self) -> *mut wl_display {
        self.wl_display
    }

    pub(crate) fn globals(&self) -> Result<&WaylandGlobals, Error> {
        self.globals.as_ref().ok_or_else(|| Error::unknown("the Wayland connection is closed"))
    }

    /// Blocks until the compositor has processed every request sent so far.
    pub(crate) fn roundtrip(&self) -> Result<(), Error> {
        let globals = self.globals()?;
        globals.queue
               .borrow_mut()
               .roundtrip(&mut globals.state.borrow_mut())
               .map_err(|err| wayland_error("wl_display_roundtrip", err))?;
        Ok(())
    }

    /// Handles events that have already arrived, without blocking.
    pub(crate) fn dispatch_pending(&self) -> Result<(), Error> {
        let globals = self.globals()?;
        let mut queue = globals.queue.borrow_mut();
        queue.dispatch_pending(&mut globals.state.borrow_mut())
             .map_err(|err| wayland_error("wl_display_dispatch_pending", err))?;
        queue.flush().map_err(|err| wayland_error("wl_display_flush", err))?;
        Ok(())
    }

    /// The size of the first output, if the compositor reported one.
    pub(crate) fn output_size(&self) -> Option<(i32, i32)> {
        let (_, state) = self.globals.as_ref()?.output.as_ref()?;
        let (width, height) =
            (state.width.load(Ordering::Acquire), state.height.load(Ordering::Acquire));
        if width > 0 && height > 0 {
            Some((width, height))
        } else {
            None
        }
    }
}

fn bind_output(globals: &GlobalList, qh: &QueueHandle<WaylandState>)
               -> Option<(WlOutput, Arc<OutputState>)> {
    let state = Arc::new(OutputState::default());
    let output = globals.bind::<WlOutput, _, _>(qh, 1..=4, state.clone()).ok()?;
    Some((output, state))
}

impl Drop for WaylandShared {
    fn drop(&mut self) {
        if let Some(globals) = self.globals.take() {
            globals.wm_base.destroy();
            if let Err(err) = globals.connection.flush() {
                log::warn!("{}", wayland_error("wl_display_flush", err));
            }
        }
        unsafe { (wayland_client_handle().wl_display_disconnect)(self.wl_display) }
    }
}

struct WaylandConnection {
    shared: Rc<WaylandShared>,
}

impl EglConnection for WaylandConnection {
    #[inline]
    fn native_display(&self) -> *mut c_void {
        self.shared.wl_display() as *mut c_void
    }

    fn native(&self, egl_display: EGLDisplay) -> NativeDisplay {
        NativeDisplay::Wayland {
            wl_display: self.shared.wl_display() as *mut c_void,
            egl_display,
        }
    }

    fn create_window(&self, _: EGLint, attributes: &WindowAttributes)
                     -> Result<Box<dyn EglNativeWindow>, Error> {
        Ok(Box::new(WaylandWindow::new(&self.shared, attributes)?))
    }
}
