//! Filesystem introspection of loader sources.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::SourceSizeError;

const UNKNOWN_OWNER: &str = "unknown";

/// Name of the user owning `path`, or `unknown` if it cannot be determined.
#[must_use]
pub fn file_owner(path: impl AsRef<Path>) -> String {
    owner_name(path.as_ref()).unwrap_or_else(|| UNKNOWN_OWNER.to_owned())
}

#[cfg(unix)]
fn owner_name(path: &Path) -> Option<String> {
    use std::os::unix::fs::MetadataExt;

    let uid = std::fs::metadata(path).ok()?.uid();
    user_name(uid)
}

#[cfg(not(unix))]
fn owner_name(_path: &Path) -> Option<String> {
    None
}

#[cfg(unix)]
fn user_name(uid: libc::uid_t) -> Option<String> {
    const MAX_BUF: usize = 1 << 16;

    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: zeroed passwd is a valid out-parameter; getpwuid_r fills it
        // with pointers into `buf`, which outlives every read below.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }
        // SAFETY: pw_name is a NUL-terminated string inside `buf`.
        let name = unsafe { std::ffi::CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Byte size of a file, or the total size of regular files under a directory.
///
/// Symbolic links inside a directory are not followed or counted.
///
/// # Errors
///
/// Returns an error if `path` cannot be stat'ed or is neither a file nor a directory.
pub fn source_size(path: impl AsRef<Path>) -> Result<u64, SourceSizeError> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path)?;
    if meta.is_file() {
        return Ok(meta.len());
    }
    if !meta.is_dir() {
        return Err(SourceSizeError::NotFileOrDirectory(path.to_path_buf()));
    }

    let mut total = 0;
    for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => total += meta.len(),
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), "skipping unreadable file: {e}");
            }
        }
    }
    Ok(total)
}
