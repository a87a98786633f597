//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid printing the same warning multiple times
//! when a caller sanitizes many similar fragments in one process.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (prints once per unique message)
///
/// Returns whether the message was actually printed, i.e. whether this was
/// its first occurrence since the last [`clear_warnings`].
///
/// # Example
/// ```ignore
/// let _ = warn_once("HTML parser", "tag <p> was not closed");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[scour {component}] {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call between unrelated batches of input)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
