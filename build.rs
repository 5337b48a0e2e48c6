// waffle/build.rs
//
//! The `waffle` build script.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        // Platforms
        macos: { target_os = "macos" },
        android: { target_os = "android" },
        linux: { all(unix, not(any(macos, android, target_os = "ios", target_env = "ohos"))) },

        // Backends:
        // Each backend is only valid on certain platforms, so the aliases below combine the
        // Cargo feature with the platform check.
        glx: { all(linux, feature = "glx") },
        x11_egl: { all(linux, feature = "x11-egl") },
        wayland: { all(linux, feature = "wayland") },
        surfaceless_egl: { all(linux, feature = "surfaceless-egl") },
        cgl: { macos },
        x11: { any(glx, x11_egl) },
        egl: { any(android, x11_egl, wayland, surfaceless_egl) },
        rwh: { any(feature = "rwh-06", android) },
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap();
    let target_family = env::var("CARGO_CFG_TARGET_FAMILY").ok();
    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());
    let is_free_unix = target_family.as_ref().map_or(false, |f| f == "unix")
        && target_os != "macos"
        && target_os != "ios";

    // Generate EGL bindings.
    if target_os == "android" || is_free_unix {
        let mut file = File::create(dest.join("egl_bindings.rs")).unwrap();
        let registry = Registry::new(Api::Egl, (1, 5), Profile::Core, Fallbacks::All, []);
        registry.write_bindings(StructGenerator, &mut file).unwrap();
    }

    // Generate GLX bindings.
    if is_free_unix && target_os != "android" && env::var_os("CARGO_FEATURE_GLX").is_some() {
        let mut file = File::create(dest.join("glx_bindings.rs")).unwrap();
        let registry = Registry::new(Api::Glx, (1, 4), Profile::Core, Fallbacks::All, []);
        registry.write_bindings(StructGenerator, &mut file).unwrap();
    }
}
