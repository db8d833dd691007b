use url::Url;

/// Public address of a stored object, when the bucket is exposed through a
/// public base URL.
pub fn object_url(base: Option<&Url>, key: Option<&str>) -> Option<String> {
    let base = base?;
    let key = key.map(str::trim).filter(|k| !k.is_empty())?;

    // Already absolute (seeded content may point at a CDN directly).
    if key.starts_with("http://") || key.starts_with("https://") {
        return Some(key.to_string());
    }

    let base = base.as_str().trim_end_matches('/');
    Some(format!("{base}/{}", key.trim_start_matches('/')))
}
