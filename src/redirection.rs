use crate::command::{RedirectMode, Redirection};
use crate::errors::RuntimeError;
use log::debug;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

/// Permission bits for files created by a redirection.
const CREATE_MODE: u32 = 0o644;

/// Opens the target of an output redirection.
///
/// Both modes create a missing file. Truncate drops existing content, append
/// writes after it.
pub fn open_target(redirect: &Redirection) -> Result<File, RuntimeError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(CREATE_MODE);
    match redirect.mode {
        RedirectMode::Truncate => options.truncate(true),
        RedirectMode::Append => options.append(true),
    };

    options.open(&redirect.path).map_err(|e| {
        debug!("open {} failed: {}", redirect.path.display(), e);
        RuntimeError::CannotOpenOutputFile
    })
}
