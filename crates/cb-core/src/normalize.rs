//! Source-expression normalization
//!
//! Turns a directive value's space-separated source expressions into a
//! deduplicated list of substring match tokens. Wildcard host patterns
//! collapse into a conservative trailing-domain suffix; keyword sources
//! ('self', 'unsafe-inline', ...) produce no token at all.

/// Normalize a directive value into match tokens.
///
/// Per source expression:
/// - contains `*`: strip one leading http:// or https:// scheme, split
///   on `*`, join the last two pieces back together, and dot-prefix the
///   result. `*.example.com` becomes `.example.com`, which substring-
///   matches any host under example.com — over-matching on purpose.
/// - contains `.`: emitted unchanged (looks like a host expression).
/// - otherwise: dropped (keyword source, scheme-only source).
///
/// Tokens keep first-seen order and carry no duplicates.
pub fn normalize_sources(directive_value: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for item in directive_value.split(' ') {
        let token = if item.contains('*') {
            Some(collapse_wildcard(item))
        } else if item.contains('.') {
            Some(item.to_string())
        } else {
            None
        };

        if let Some(token) = token {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }

    tokens
}

/// Collapse a wildcard pattern into a dot-prefixed suffix token.
///
/// Keeping only the last two `*`-split pieces is a deliberate heuristic
/// inherited from the corpus tooling, not hostname parsing: for a
/// multi-wildcard pattern like `a*b*c.com` the leading pieces are
/// simply discarded.
fn collapse_wildcard(item: &str) -> String {
    let stripped = item
        .strip_prefix("https://")
        .or_else(|| item.strip_prefix("http://"))
        .unwrap_or(item);

    let pieces: Vec<&str> = stripped.split('*').collect();
    let tail_start = pieces.len().saturating_sub(2);
    let joined: String = pieces[tail_start..].concat();

    if joined.starts_with('.') {
        joined
    } else {
        format!(".{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_host_becomes_suffix_token() {
        assert_eq!(normalize_sources("*.example.com"), vec![".example.com"]);
    }

    #[test]
    fn test_scheme_is_stripped_before_collapsing() {
        assert_eq!(normalize_sources("https://*.example.com"), vec![".example.com"]);
        assert_eq!(normalize_sources("http://*.example.com"), vec![".example.com"]);
    }

    #[test]
    fn test_keyword_sources_emit_nothing() {
        assert!(normalize_sources("'self' 'none' 'unsafe-inline' data:").is_empty());
    }

    #[test]
    fn test_plain_host_passes_through() {
        assert_eq!(
            normalize_sources("cdn.foo.com 'self'"),
            vec!["cdn.foo.com"]
        );
    }

    #[test]
    fn test_mixed_directive() {
        assert_eq!(
            normalize_sources("*.example.*.com 'self' cdn.foo.com 'unsafe-inline'"),
            vec![".example..com", "cdn.foo.com"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            normalize_sources("*.example.com cdn.example.com *.example.com"),
            vec![".example.com", "cdn.example.com"]
        );
    }

    #[test]
    fn test_consecutive_spaces_are_harmless() {
        // Empty segments contain neither '*' nor '.', so they drop out.
        assert_eq!(normalize_sources("a.com  b.com"), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_multi_wildcard_heuristic_is_literal() {
        // Documented heuristic: only the last two '*'-split pieces
        // survive. Not a hostname parser.
        assert_eq!(normalize_sources("a*b*c*d.com"), vec![".cd.com"]);
        assert_eq!(normalize_sources("*.example.*.com"), vec![".example..com"]);
    }

    #[test]
    fn test_bare_wildcard() {
        // "*" splits into two empty pieces; the token degenerates to ".".
        assert_eq!(normalize_sources("*"), vec!["."]);
    }
}
