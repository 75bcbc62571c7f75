use url::Url;

/// How a raw `href` relates to the page it was found on
#[derive(Debug, Clone, PartialEq)]
pub enum HrefTarget {
    /// Empty, `#`, or a `javascript:` / `mailto:` / `tel:` link
    NotFollowable,
    /// Resolves to the page itself (possibly with a fragment)
    SamePage,
    /// Resolves to another page
    Page(Url),
}

/// Schemes that never lead to another page
const NON_PAGE_SCHEMES: [&str; 5] = ["javascript:", "mailto:", "tel:", "sms:", "data:"];

/// Classifies an href relative to the page at `base`
pub fn classify_href(href: &str, base: &Url) -> HrefTarget {
    let href = href.trim();
    if href.is_empty() || href == "#" {
        return HrefTarget::NotFollowable;
    }
    let lower = href.to_lowercase();
    if NON_PAGE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return HrefTarget::NotFollowable;
    }

    let resolved = match base.join(href) {
        Ok(url) => url,
        Err(e) => {
            ::log::debug!("Could not resolve href {} against {}: {}", href, base, e);
            return HrefTarget::NotFollowable;
        }
    };
    if !matches!(resolved.scheme(), "http" | "https") {
        return HrefTarget::NotFollowable;
    }

    if normalize_url(&resolved) == normalize_url(base) {
        HrefTarget::SamePage
    } else {
        HrefTarget::Page(resolved)
    }
}

/// Create a normalized version of the URL (fragment removed)
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

/// Whether `target` lives on a different host than `base`, ignoring scheme and port
pub fn is_external(target: &Url, base: &Url) -> bool {
    match (target.host_str(), base.host_str()) {
        (Some(t), Some(b)) => !strip_www(t).eq_ignore_ascii_case(strip_www(b)),
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Hostname allowlist deciding which pages count as the operator's own
#[derive(Debug, Clone, Default)]
pub struct InternalHosts {
    hosts: Vec<String>,
}

impl InternalHosts {
    pub fn new(hosts: &[String]) -> Self {
        Self {
            hosts: hosts
                .iter()
                .map(|h| strip_www(h.trim()).to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Whether the URL's host is listed, or is a subdomain of a listed host
    pub fn contains(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = strip_www(host).to_lowercase();
        self.hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
    }
}
