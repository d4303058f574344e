use std::collections::BTreeMap;

use crate::config::EinsteinApiConfig;
use crate::error::EinsteinApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

/// Build a deterministic header map for agent API requests.
///
/// `accept` distinguishes the streaming call from the plain session calls;
/// everything else is shared.
pub fn build_headers(
    config: &EinsteinApiConfig,
    accept: &str,
) -> Result<BTreeMap<String, String>, EinsteinApiError> {
    if config.access_token.trim().is_empty() {
        return Err(EinsteinApiError::MissingAccessToken);
    }

    let mut headers = BTreeMap::new();
    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("Bearer {}", config.access_token.trim()),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), accept.to_owned());
    headers.insert(HEADER_CONTENT_TYPE.to_owned(), ACCEPT_JSON.to_owned());

    let ua = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}

fn default_user_agent() -> String {
    match runtime_os_triplet() {
        Some((platform, release, arch)) => format!("chat-agent ({platform} {release}; {arch})"),
        None => "chat-agent".to_owned(),
    }
}

fn normalize_arch(arch: &str) -> String {
    match arch.to_ascii_lowercase().as_str() {
        "x86_64" | "amd64" => "x64".to_owned(),
        "x86" | "i386" | "i686" => "ia32".to_owned(),
        "aarch64" => "arm64".to_owned(),
        normalized => normalized.to_owned(),
    }
}

#[cfg(unix)]
fn runtime_os_triplet() -> Option<(String, String, String)> {
    use std::ffi::CStr;
    use std::mem::MaybeUninit;

    let mut raw = MaybeUninit::<libc::utsname>::uninit();
    // SAFETY: `uname` initializes the provided `utsname` struct on success.
    let rc = unsafe { libc::uname(raw.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }

    // SAFETY: We checked `uname` returned success, so `raw` is initialized.
    let raw = unsafe { raw.assume_init() };
    // SAFETY: `uname` provides NUL-terminated fixed-size C strings.
    let platform = unsafe { CStr::from_ptr(raw.sysname.as_ptr()) }
        .to_string_lossy()
        .to_lowercase();
    // SAFETY: `uname` provides NUL-terminated fixed-size C strings.
    let release = unsafe { CStr::from_ptr(raw.release.as_ptr()) }
        .to_string_lossy()
        .into_owned();
    // SAFETY: `uname` provides NUL-terminated fixed-size C strings.
    let arch = unsafe { CStr::from_ptr(raw.machine.as_ptr()) }.to_string_lossy();
    let arch = normalize_arch(&arch);

    if platform.is_empty() || release.is_empty() || arch.is_empty() {
        None
    } else {
        Some((platform, release, arch))
    }
}

#[cfg(not(unix))]
fn runtime_os_triplet() -> Option<(String, String, String)> {
    None
}
