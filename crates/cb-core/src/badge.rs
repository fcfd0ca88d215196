//! Badge text rendering
//!
//! Browsers cap badge text at 4 characters, so everything above 999
//! renders as "999+". Zero clears the badge.

/// Badge text for a bypass count.
pub fn badge_text(count: usize) -> String {
    if count == 0 {
        String::new()
    } else if count > 999 {
        "999+".to_string()
    } else {
        count.to_string()
    }
}
