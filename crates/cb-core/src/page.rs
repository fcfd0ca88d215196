//! CSP source selection
//!
//! A page can carry its policy in an HTTP response header or in a
//! `<meta http-equiv>` element (each with a Report-Only variant). The
//! meta tag wins when both are present. The result is advisory: absent
//! everywhere simply means "no CSP found", never an error.

use serde::Serialize;

const CSP_HEADER: &str = "content-security-policy";
const CSP_REPORT_ONLY_HEADER: &str = "content-security-policy-report-only";

/// Where a detected CSP came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CspSource {
    Meta,
    MetaReportOnly,
    HttpHeader,
}

impl CspSource {
    /// Human-readable label as shown in the popup toast.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Meta => "meta tag",
            Self::MetaReportOnly => "meta tag (report-only)",
            Self::HttpHeader => "HTTP header",
        }
    }
}

/// A CSP string together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedCsp {
    pub csp: String,
    pub source: CspSource,
}

/// Find a CSP (or Report-Only) header value in a response header list.
/// Header names match case-insensitively; the first hit wins.
pub fn find_csp_header<'a>(headers: &'a [(String, String)]) -> Option<&'a str> {
    headers
        .iter()
        .find(|(name, _)| {
            name.eq_ignore_ascii_case(CSP_HEADER) || name.eq_ignore_ascii_case(CSP_REPORT_ONLY_HEADER)
        })
        .map(|(_, value)| value.as_str())
}

/// Pick the effective CSP for a page from the available sources.
///
/// Meta-tag content takes precedence over the header value; the
/// enforcing meta tag takes precedence over the report-only one.
pub fn select_csp(
    meta: Option<&str>,
    meta_report_only: Option<&str>,
    header: Option<&str>,
) -> Option<DetectedCsp> {
    let detected = |csp: &str, source| DetectedCsp {
        csp: csp.to_string(),
        source,
    };

    match (nonempty(meta), nonempty(meta_report_only), nonempty(header)) {
        (Some(csp), _, _) => Some(detected(csp, CspSource::Meta)),
        (None, Some(csp), _) => Some(detected(csp, CspSource::MetaReportOnly)),
        (None, None, Some(csp)) => Some(detected(csp, CspSource::HttpHeader)),
        (None, None, None) => None,
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_name_match_is_case_insensitive() {
        let hs = headers(&[
            ("X-Frame-Options", "DENY"),
            ("Content-Security-Policy", "script-src 'self'"),
        ]);
        assert_eq!(find_csp_header(&hs), Some("script-src 'self'"));
    }

    #[test]
    fn test_report_only_header_is_accepted() {
        let hs = headers(&[("content-security-policy-report-only", "default-src *")]);
        assert_eq!(find_csp_header(&hs), Some("default-src *"));
    }

    #[test]
    fn test_no_csp_header() {
        let hs = headers(&[("Content-Type", "text/html")]);
        assert_eq!(find_csp_header(&hs), None);
    }

    #[test]
    fn test_meta_takes_precedence_over_header() {
        let detected = select_csp(
            Some("script-src meta.example.com"),
            None,
            Some("script-src header.example.com"),
        )
        .unwrap();
        assert_eq!(detected.source, CspSource::Meta);
        assert_eq!(detected.csp, "script-src meta.example.com");
    }

    #[test]
    fn test_report_only_meta_before_header() {
        let detected = select_csp(None, Some("default-src *"), Some("script-src 'self'")).unwrap();
        assert_eq!(detected.source, CspSource::MetaReportOnly);
    }

    #[test]
    fn test_header_fallback_and_absence() {
        let detected = select_csp(None, None, Some("script-src 'self'")).unwrap();
        assert_eq!(detected.source, CspSource::HttpHeader);
        assert_eq!(select_csp(None, None, None), None);
        assert_eq!(select_csp(Some(""), Some(""), None), None);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(CspSource::Meta.label(), "meta tag");
        assert_eq!(CspSource::HttpHeader.label(), "HTTP header");
    }
}
