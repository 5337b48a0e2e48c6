// waffle/src/config.rs
//
//! Framebuffer configurations.

use crate::config_attributes::ConfigAttributes;
use crate::display::{Display, DisplayId};
use crate::error::{self, Error};
use crate::native::{NativeConfig, NativeDisplay};
use crate::platform::ConfigBackend;

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// A framebuffer configuration chosen for a set of attributes.
///
/// Some APIs call this a "pixel format" or "visual". Contexts and windows created from the same
/// config are compatible with each other.
pub struct Config {
    display_id: DisplayId,
    display_native: NativeDisplay,
    attributes: ConfigAttributes,
    backend: Box<dyn ConfigBackend>,
    phantom: PhantomData<*mut ()>,
}

impl Config {
    /// Chooses a configuration matching `attributes` on `display`.
    ///
    /// Fails with `BadAttribute` if the attributes are inconsistent, and with
    /// `UnsupportedOnPlatform` if the display cannot provide the requested API, version, profile
    /// or flags.
    pub fn choose(display: &Display, attributes: &ConfigAttributes) -> Result<Config, Error> {
        error::track(|| Config::choose_validated(display, attributes))
    }

    /// Like `choose()`, taking a `[key, value, ..., NONE]` attribute list.
    pub fn choose_from_attrib_list(display: &Display, attrib_list: &[i32])
                                   -> Result<Config, Error> {
        error::track(|| {
            let attributes = ConfigAttributes::from_attrib_list(attrib_list)?;
            Config::choose_validated(display, &attributes)
        })
    }

    fn choose_validated(display: &Display, attributes: &ConfigAttributes)
                        -> Result<Config, Error> {
        attributes.validate()?;
        if !display.backend().supports_context_api(attributes.context_api) {
            return Err(Error::unsupported(format!("{} does not support {}",
                                                  display.platform(),
                                                  attributes.context_api)));
        }
        let backend = display.backend().choose_config(attributes)?;
        log::debug!("chose config for {:?} on {:?}", attributes.context_api, display);
        Ok(Config {
            display_id: display.id(),
            display_native: display.native(),
            attributes: attributes.clone(),
            backend,
            phantom: PhantomData,
        })
    }

    /// The attributes this config was chosen with.
    #[inline]
    pub fn attributes(&self) -> &ConfigAttributes {
        &self.attributes
    }

    #[inline]
    pub fn display_id(&self) -> DisplayId {
        self.display_id
    }

    /// The native configuration handles.
    #[inline]
    pub fn native(&self) -> NativeConfig {
        self.backend.native()
    }

    #[inline]
    pub fn destroy(self) {
        drop(self)
    }

    #[inline]
    pub(crate) fn backend(&self) -> &dyn ConfigBackend {
        &*self.backend
    }

    #[inline]
    pub(crate) fn display_native(&self) -> NativeDisplay {
        self.display_native
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Config({:?}, {:?})", self.display_id, self.attributes.context_api)
    }
}
