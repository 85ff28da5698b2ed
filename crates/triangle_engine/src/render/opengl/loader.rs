//! OpenGL function table loading

#![allow(unsafe_code)]

use std::ffi::c_void;

use glow::HasContext;

use crate::engine::BootstrapError;

/// Entry points that must resolve before the context is usable
///
/// `glow` does not report entry points that fail to resolve; the ones the
/// engine calls on its first frames are checked up front.
pub const REQUIRED_SYMBOLS: &[&str] = &[
    "glGetString",
    "glViewport",
    "glClearColor",
    "glClear",
    "glCreateShader",
    "glCreateProgram",
    "glGenBuffers",
    "glGenVertexArrays",
    "glDrawElements",
];

/// Check that every required symbol resolves to a non-null address
pub fn check_required_symbols<F>(resolver: &mut F) -> Result<(), BootstrapError>
where
    F: FnMut(&str) -> *const c_void,
{
    match REQUIRED_SYMBOLS.iter().find(|&&symbol| resolver(symbol).is_null()) {
        Some(symbol) => Err(BootstrapError::FunctionLoad((*symbol).to_string())),
        None => Ok(()),
    }
}

/// Load the OpenGL function table through `resolver`
///
/// The context the resolver belongs to must be current on this thread.
pub fn load_functions<F>(mut resolver: F) -> Result<glow::Context, BootstrapError>
where
    F: FnMut(&str) -> *const c_void,
{
    check_required_symbols(&mut resolver)?;

    // SAFETY: the resolver belongs to a context that is current on this thread
    // and every required entry point resolved above.
    let gl = unsafe { glow::Context::from_loader_function(resolver) };

    let version = gl.version();
    log::info!(
        "Loaded OpenGL {}.{} ({})",
        version.major,
        version.minor,
        version.vendor_info
    );

    Ok(gl)
}
