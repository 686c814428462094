// src/core/net.rs

// Blocking HTTPS GET through one shared ureq agent (rustls, redirects followed).

use std::{error::Error, sync::OnceLock, time::Duration};

use crate::config::consts::{MAX_REDIRECTS, NET_TIMEOUT_SECS};

static AGENT: OnceLock<ureq::Agent> = OnceLock::new();

fn agent() -> &'static ureq::Agent {
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(NET_TIMEOUT_SECS))
            .redirects(MAX_REDIRECTS)
            .user_agent(concat!("course_scout/", env!("CARGO_PKG_VERSION")))
            .build()
    })
}

/// GET `https://<host><path>` and return the body.
pub fn http_get(host: &str, path: &str) -> Result<String, Box<dyn Error>> {
    get_url(&format!("https://{host}{path}"))
}

/// GET an absolute URL. Redirects are followed; any final status
/// other than 2xx is an error that names the URL.
pub fn get_url(url: &str) -> Result<String, Box<dyn Error>> {
    match agent().get(url).call() {
        Ok(resp) => Ok(resp.into_string()?),
        Err(ureq::Error::Status(code, _)) => Err(format!("HTTP {code} for {url}").into()),
        Err(e) => Err(format!("{url}: {e}").into()),
    }
}

/// Percent-encode one path/query segment (keeps unreserved characters).
pub fn encode_segment(seg: &str) -> String {
    let mut out = String::with_capacity(seg.len());
    for b in seg.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
