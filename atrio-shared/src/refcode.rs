/// Human-readable reference codes, e.g. `BK-000042`.
///
/// Codes are assigned by the back office at creation time from a per-entity
/// sequence and never reused.
pub fn reference_code(prefix: &str, sequence: u64) -> String {
    format!("{}-{:06}", prefix, sequence)
}
