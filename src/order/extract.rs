use reqwest::Url;

/// Path component of `url` exactly as written, without query or fragment.
///
/// Input whose first segment ends in `:` is taken as an absolute URL and must
/// parse; its path is the text after the authority. Anything else, such as
/// `www.tiktok.com/@user/video/1`, is taken as a bare path.
fn url_path(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let without_query = &url[..end];

    let head = without_query.split('/').next().unwrap_or_default();
    if !head.ends_with(':') {
        return Some(without_query);
    }

    Url::parse(url).ok()?;
    let rest = &without_query[head.len()..];
    match rest.strip_prefix("//") {
        Some(authority_and_path) => Some(
            authority_and_path
                .find('/')
                .map_or("", |start| &authority_and_path[start..]),
        ),
        None => Some(rest),
    }
}

/// Extract a numeric video id from a post URL.
///
/// Returns the first purely numeric path segment, falling back to the last
/// non-empty segment when it contains at least one digit.
pub fn extract_video_id(url: &str) -> Option<String> {
    let path = url_path(url)?;

    if let Some(id) = path
        .split('/')
        .find(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Some(id.to_string());
    }

    let last = path.trim_end_matches('/').rsplit('/').next()?;
    if last.bytes().any(|b| b.is_ascii_digit()) {
        let last = last.split('?').next().unwrap_or(last);
        return Some(last.to_string());
    }

    None
}

/// Extract the `@username` path segment of an account URL, without the `@`.
pub fn extract_username(url: &str) -> Option<String> {
    let path = url_path(url)?;
    path.split('/')
        .find_map(|part| part.strip_prefix('@'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
