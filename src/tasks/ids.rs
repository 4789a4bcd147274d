use rand::Rng;

/// Source of the clock and randomness used to name generated records.
///
/// Editing operations take this as a parameter so they stay deterministic
/// under test.
pub trait IdSource {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
    /// A small random suffix in `0..90`.
    fn suffix(&self) -> u32;
}

/// Wall clock plus thread-local randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIds;

impl IdSource for SystemIds {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn suffix(&self) -> u32 {
        rand::thread_rng().gen_range(0..90)
    }
}

/// Id for a record submitted from the form with a blank id.
pub fn form_id(ids: &dyn IdSource) -> String {
    format!("t{}", ids.now_millis())
}

/// Id for a bulk-imported line.
///
/// Only the last six digits of the clock are kept, so ids generated in the
/// same import can collide.
pub fn bulk_id(ids: &dyn IdSource) -> String {
    let millis = ids.now_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("t{tail}{}", ids.suffix())
}
