//! Directive extraction from a raw CSP string
//!
//! Only `script-src` and `default-src` are interesting for bypass
//! matching. `script-src` wins whenever it is present, regardless of
//! where the two directives sit in the policy.

const SCRIPT_SRC: &str = "script-src";
const DEFAULT_SRC: &str = "default-src";

/// Extract the value of the script-src (or, failing that, default-src)
/// directive from a CSP string.
///
/// The input is expected to be lower-cased and trimmed by the caller.
/// Returns the text after the first occurrence of the directive name,
/// cut at the next `;` and trimmed. `None` means no usable directive:
/// the caller falls back to free-text matching.
pub fn extract_directive(csp: &str) -> Option<&str> {
    let name = if csp.contains(SCRIPT_SRC) {
        SCRIPT_SRC
    } else if csp.contains(DEFAULT_SRC) {
        DEFAULT_SRC
    } else {
        return None;
    };

    let start = csp.find(name)? + name.len();
    let rest = &csp[start..];
    let value = match rest.find(';') {
        Some(end) => &rest[..end],
        None => rest,
    };

    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Whether the input contains a directive this engine understands.
pub fn has_known_directive(input: &str) -> bool {
    input.contains(SCRIPT_SRC) || input.contains(DEFAULT_SRC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_src_basic() {
        assert_eq!(
            extract_directive("script-src 'self' cdn.example.com; img-src *"),
            Some("'self' cdn.example.com")
        );
    }

    #[test]
    fn test_script_src_wins_even_when_default_src_comes_first() {
        assert_eq!(
            extract_directive("default-src 'self'; script-src *.evil.com"),
            Some("*.evil.com")
        );
    }

    #[test]
    fn test_default_src_fallback() {
        assert_eq!(
            extract_directive("default-src 'self' static.foo.com"),
            Some("'self' static.foo.com")
        );
    }

    #[test]
    fn test_no_known_directive() {
        assert_eq!(extract_directive("img-src 'self'; style-src *"), None);
        assert_eq!(extract_directive("just some words"), None);
    }

    #[test]
    fn test_directive_without_semicolon_runs_to_end() {
        assert_eq!(
            extract_directive("script-src 'self' a.b.com"),
            Some("'self' a.b.com")
        );
    }

    #[test]
    fn test_empty_directive_value_is_absent() {
        assert_eq!(extract_directive("script-src ;img-src *"), None);
        assert_eq!(extract_directive("script-src"), None);
    }

    #[test]
    fn test_first_occurrence_is_used() {
        // Two script-src clauses: everything after the first name, cut
        // at the first ';'.
        assert_eq!(
            extract_directive("script-src a.com; script-src b.com"),
            Some("a.com")
        );
    }
}
