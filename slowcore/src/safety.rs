//! Safety utilities for crash-proof slowPDF frames.
//!
//! Helpers that remove common panic sources: slicing strings on a byte
//! index that is not a character boundary, and panics inside per-frame
//! painting code.

/// Byte index just past the first `max_chars` characters of `s`,
/// or `s.len()` if it has no more than that.
pub fn char_boundary_after(s: &str, max_chars: usize) -> usize {
    s.char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Shorten `s` to at most `max_chars` characters and append `ellipsis`
/// if anything was cut. Counts characters, not bytes.
pub fn truncate_chars(s: &str, max_chars: usize, ellipsis: &str) -> String {
    let cut = char_boundary_after(s, max_chars);
    if cut == s.len() {
        s.to_string()
    } else {
        format!("{}{}", &s[..cut], ellipsis)
    }
}

/// Run a closure, catching any panic. Returns the closure result on success,
/// or `fallback` on panic. Used to isolate per-frame painting.
pub fn catch_or<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!("caught panic in frame, recovered: {}", msg);
            fallback
        }
    }
}
