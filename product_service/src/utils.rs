use serde::de::DeserializeOwned;

/// Invalid UTF-8 in a request body surfaces as a JSON error.
pub fn des_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Splits a request path into its non-empty segments, so `/products/` and
/// `/products` route the same way.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
