/// Characters that may not appear in a single path segment on this OS.
#[cfg(unix)]
const FORBIDDEN: &[char] = &[':', '/'];

#[cfg(windows)]
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[cfg(not(any(unix, windows)))]
const FORBIDDEN: &[char] = &['/'];

/// Strip characters the host filesystem forbids in a path segment.
///
/// Everything else, including its order, is kept as-is. Distinct inputs
/// that differ only in forbidden characters will collide.
pub fn clean_filename(name: &str) -> String {
    name.chars().filter(|c| !FORBIDDEN.contains(c)).collect()
}

/// True when `name` can be used as a directory or file name as-is.
pub fn is_usable_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(FORBIDDEN)
}
