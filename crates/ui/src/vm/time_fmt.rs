use chrono::{DateTime, Utc};

/// Caption shown under a generated artifact.
#[must_use]
pub fn generated_caption(value: DateTime<Utc>) -> String {
    format!("Generated {}", value.format("%Y-%m-%d %H:%M UTC"))
}
