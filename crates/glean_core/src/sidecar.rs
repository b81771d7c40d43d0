//! Sidecar key convention.
//!
//! A source object's metadata lives at `<key>.metadata.json` in the same
//! namespace. Both the listing filter and the existence probe derive keys
//! from here.

/// Suffix appended to a source key to name its sidecar.
pub const SIDECAR_SUFFIX: &str = ".metadata.json";

/// Content type sidecars are written with.
pub const SIDECAR_CONTENT_TYPE: &str = "application/json";

/// Derive the sidecar key for a source object key.
///
/// # Examples
///
/// ```
/// use glean_core::sidecar_key;
///
/// assert_eq!(sidecar_key("photos/a.jpg"), "photos/a.jpg.metadata.json");
/// ```
pub fn sidecar_key(key: &str) -> String {
    format!("{key}{SIDECAR_SUFFIX}")
}

/// Whether a key names a sidecar rather than a media object.
pub fn is_sidecar(key: &str) -> bool {
    key.ends_with(SIDECAR_SUFFIX)
}
