// waffle/src/context.rs
//
//! OpenGL rendering contexts.

use crate::config::Config;
use crate::display::DisplayId;
use crate::enums::ContextApi;
use crate::error::{self, Error, ErrorCode};
use crate::native::NativeContext;
use crate::platform::ContextBackend;

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// An OpenGL or OpenGL ES rendering context.
///
/// Make it current with `make_current()`. The native context is destroyed on drop; use
/// `destroy()` to observe failures.
pub struct Context {
    display_id: DisplayId,
    backend: Box<dyn ContextBackend>,
    phantom: PhantomData<*mut ()>,
}

impl Context {
    /// Creates a context for the API, version, profile and flags of `config`.
    ///
    /// If `shared` is given, the new context shares objects with it. It must come from the same
    /// display.
    pub fn create(config: &Config, shared: Option<&Context>) -> Result<Context, Error> {
        error::track(|| {
            if let Some(shared) = shared {
                if shared.display_id != config.display_id() {
                    return Err(Error::new(ErrorCode::BadDisplayMatch,
                                          "the shared context was created from a different \
                                           display"));
                }
            }
            let backend = config.backend().create_context(shared.map(Context::backend))?;
            log::debug!("created {} context on {:?}", backend.api(), config.display_id());
            Ok(Context { display_id: config.display_id(), backend, phantom: PhantomData })
        })
    }

    /// The rendering API of this context.
    #[inline]
    pub fn api(&self) -> ContextApi {
        self.backend.api()
    }

    #[inline]
    pub fn display_id(&self) -> DisplayId {
        self.display_id
    }

    /// The native context handles.
    #[inline]
    pub fn native(&self) -> NativeContext {
        self.backend.native()
    }

    /// Destroys the context, reporting native failures.
    pub fn destroy(mut self) -> Result<(), Error> {
        error::track(|| self.backend.destroy())
    }

    #[inline]
    pub(crate) fn backend(&self) -> &dyn ContextBackend {
        &*self.backend
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if let Err(err) = self.backend.destroy() {
            log::warn!("failed to destroy context: {}", err);
        }
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Context({:?}, {})", self.display_id, self.api())
    }
}
