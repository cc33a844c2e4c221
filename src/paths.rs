//! Path normalization and joining.
//!
//! Routes arrive in framework syntax (`/users/:id`) and leave in OpenAPI
//! brace syntax (`/users/{id}`). Normalization is idempotent, so paths that
//! already use brace syntax pass through unchanged.

/// Convert framework path-parameter segments to OpenAPI brace syntax and
/// strip one trailing slash (unless the path is exactly `/`).
///
/// Each `/`-separated segment with a leading colon is rewritten: `:id`
/// becomes `{id}`. Other segments pass through untouched.
pub fn normalize_path(path: &str) -> String {
    let converted: Vec<String> = path
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                format!("{{{name}}}")
            } else {
                segment.to_string()
            }
        })
        .collect();

    let mut normalized = converted.join("/");
    if normalized != "/" && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Join a controller base path with a route path and normalize the result.
///
/// The base path loses one trailing slash. A route path of exactly `/` maps
/// to the base path verbatim (or `/` when the base is empty) without
/// normalization; any other route path gains a leading slash if missing and
/// is appended to the base, and the result is normalized.
pub fn join_paths(base_path: &str, path: &str) -> String {
    let base = base_path.strip_suffix('/').unwrap_or(base_path);

    if path == "/" {
        return if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        };
    }

    let full = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };
    normalize_path(&full)
}
