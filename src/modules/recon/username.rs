/// Result of checking one candidate username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Taken,
}

/// Profile URL for `username`. The word is appended as-is, without escaping.
pub fn profile_url(base_url: &str, username: &str) -> String {
    format!("{base_url}{username}")
}

/// A body carrying the "profile not found" marker means the name is free.
pub fn classify_body(body: &str, marker: &str) -> Availability {
    if body.contains(marker) {
        Availability::Available
    } else {
        Availability::Taken
    }
}
