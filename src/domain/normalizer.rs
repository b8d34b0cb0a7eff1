use url::Url;

const WWW_PREFIX: &str = "www.";

/// Reduces a URL or bare domain to a lowercase host without scheme, path or `www.`.
///
/// Never fails: anything that does not parse as a URL with a host becomes `""`.
pub fn normalize_domain(url_or_domain: &str) -> String {
    let candidate = url_or_domain.trim().to_lowercase();
    if candidate.is_empty() {
        return String::new();
    }

    let candidate = match candidate.starts_with("http://") || candidate.starts_with("https://") {
        true => candidate,
        false => format!("https://{}", candidate),
    };

    let parsed_url = match Url::parse(&candidate) {
        Ok(parsed_url) => parsed_url,
        Err(_) => return String::new(),
    };

    let mut host = parsed_url.host_str().unwrap_or_default();
    while let Some(rest) = host.strip_prefix(WWW_PREFIX) {
        host = rest;
    }
    if host.is_empty() {
        return String::new();
    }

    match parsed_url.port() {
        Some(port) if port != 80 && port != 443 => format!("{}:{}", host, port),
        _ => host.to_string(),
    }
}

/// `https://<domain>` for anything that normalizes to a non-empty domain.
pub fn canonical_https(url_or_domain: &str) -> String {
    match normalize_domain(url_or_domain) {
        domain if domain.is_empty() => String::new(),
        domain => format!("https://{}", domain),
    }
}
