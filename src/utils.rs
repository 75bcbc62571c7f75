use rand::Rng;
use std::time::Duration;

/// Random delay in `[min_ms, max_ms]` inserted before each navigation
pub fn jitter_delay(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

/// Trims an input URL and adds `https://` when the scheme is missing
pub fn normalize_input_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if url.contains("://") {
        Some(url.to_string())
    } else {
        Some(format!("https://{}", url.trim_start_matches('/')))
    }
}
