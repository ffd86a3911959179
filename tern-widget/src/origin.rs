//! Parent origin resolution
//!
//! Cross-origin URL parsing failures are a normal condition in this
//! protocol, not application errors: anything unparseable resolves to
//! "no origin available" and the caller stays on the untrusted path.

/// Extract the origin (`scheme://host[:port]`) of a URL.
///
/// Opaque origins (e.g. `data:` URLs) and parse failures both yield `None`.
pub fn origin_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Resolve the trusted parent origin for a widget session.
///
/// Priority: the declared `parent_origin` query parameter, then the
/// referrer's origin. `None` means no information was available - outgoing
/// messages then target `*` and only same-window/`null`-origin handshakes
/// are accepted.
pub fn resolve_parent_origin(declared: Option<&str>, referrer: Option<&str>) -> Option<String> {
    declared
        .and_then(origin_of)
        .or_else(|| referrer.and_then(origin_of))
}
