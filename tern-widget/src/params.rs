//! Widget route query parameters

use url::form_urlencoded;

/// Parameters the widget route consumes from its query string
///
/// - `token`: widget access token, enables unauthenticated server-side
///   tenant resolution
/// - `parent_origin`: declared trusted host origin
/// - `cid`: correlation id passed through to all protocol messages
/// - `slug`: fallback tenant identifier when no token is present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetParams {
    pub token: Option<String>,
    pub parent_origin: Option<String>,
    pub correlation_id: Option<String>,
    pub slug: Option<String>,
}

impl WidgetParams {
    /// Parse from a raw query string (no leading '?')
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "token" => params.token = Some(value),
                "parent_origin" => params.parent_origin = Some(value),
                "cid" => params.correlation_id = Some(value),
                "slug" => params.slug = Some(value),
                _ => {}
            }
        }
        params
    }
}
