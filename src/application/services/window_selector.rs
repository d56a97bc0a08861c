//! Bounded selection of entries around the current one.

use std::ops::Range;

/// Computes the window bounds for a sequence of `len` items.
///
/// The sequence is split at the current item: `before` holds the items
/// strictly above it and `after` starts with it. Without a current item
/// everything is `before`. The window is the last `height` items of `before`
/// followed by the first `height` items of `after`.
#[must_use]
pub fn window_range(len: usize, current: Option<usize>, height: usize) -> Range<usize> {
    let split = current.filter(|&idx| idx < len).unwrap_or(len);
    let start = split.saturating_sub(height);
    let end = split.saturating_add(height).min(len);
    start..end
}

/// Trims `items` to at most `2 * height` contiguous entries around the
/// current one. With no height bound the items are returned unchanged.
#[must_use]
pub fn select_window<T>(
    mut items: Vec<T>,
    height: Option<usize>,
    is_current: impl Fn(&T) -> bool,
) -> Vec<T> {
    let Some(height) = height else {
        return items;
    };

    let current = items.iter().position(is_current);
    let range = window_range(items.len(), current, height);

    items.truncate(range.end);
    items.drain(..range.start);
    items
}
