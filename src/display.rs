// waffle/src/display.rs
//
//! Connections to the native display.

use crate::api;
use crate::enums::{ContextApi, Platform};
use crate::error::{self, Error, ErrorCode};
use crate::native::NativeDisplay;
use crate::platform::{DisplayBackend, PlatformBackend};

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(rwh)]
use rwh_06::{DisplayHandle, HandleError, HasDisplayHandle};

static NEXT_DISPLAY_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the display an object was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisplayId(pub u64);

/// A connection to the native display of the selected platform.
///
/// Configs, contexts and windows are created from a display and may only be combined with
/// objects from the same display.
pub struct Display {
    id: DisplayId,
    platform: Arc<dyn PlatformBackend>,
    backend: Box<dyn DisplayBackend>,
    phantom: PhantomData<*mut ()>,
}

impl Display {
    /// Connects to the native display.
    ///
    /// `name` is passed to the native connect call: an X11 `DISPLAY` string, or a Wayland socket
    /// name. `None` selects the default. Platforms without named displays ignore it.
    pub fn connect(name: Option<&str>) -> Result<Display, Error> {
        error::track(|| {
            let platform = api::platform_backend()?;
            let backend = platform.connect(name)?;
            let id = DisplayId(NEXT_DISPLAY_ID.fetch_add(1, Ordering::Relaxed));
            log::debug!("connected display {:?} on {}", id, platform.platform());
            Ok(Display { id, platform, backend, phantom: PhantomData })
        })
    }

    /// True if configs and contexts of the given API can be created on this display.
    pub fn supports_context_api(&self, api: ContextApi) -> Result<bool, Error> {
        error::track(|| Ok(self.backend.supports_context_api(api)))
    }

    /// The platform this display was connected with.
    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform.platform()
    }

    #[inline]
    pub fn id(&self) -> DisplayId {
        self.id
    }

    /// The native display handles.
    #[inline]
    pub fn native(&self) -> NativeDisplay {
        self.backend.native()
    }

    /// Closes the connection once every object created from it is gone.
    #[inline]
    pub fn disconnect(self) {
        drop(self)
    }

    #[inline]
    pub(crate) fn backend(&self) -> &dyn DisplayBackend {
        &*self.backend
    }

    pub(crate) fn check_match(&self, other: DisplayId, what: &str) -> Result<(), Error> {
        if other == self.id {
            Ok(())
        } else {
            Err(Error::new(ErrorCode::BadDisplayMatch,
                           format!("the {} was created from a different display", what)))
        }
    }
}

impl Debug for Display {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Display({}, {})", self.id.0, self.platform())
    }
}

#[cfg(rwh)]
impl HasDisplayHandle for Display {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        let raw = self.native().raw_display_handle()?;
        Ok(unsafe { DisplayHandle::borrow_raw(raw) })
    }
}
