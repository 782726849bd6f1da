//! Field selection - turns a `fields` query value into the list of fields to keep.

use tracing::debug;

/// Resolve a comma-separated field request against the fields a type exposes.
///
/// A missing or blank request selects every available field. Otherwise each
/// token is trimmed and matched case-sensitively against `available`; unknown
/// names and repeats are dropped. The identity field is appended when the
/// request did not name it, so the result always contains it.
///
/// The returned order is the order in which fields were first requested.
pub fn resolve_fields<'a>(
    requested: Option<&str>,
    identity: &'a str,
    available: &[&'a str],
) -> Vec<&'a str> {
    let mut resolved: Vec<&'a str> = Vec::new();

    match requested.map(str::trim).filter(|r| !r.is_empty()) {
        None => resolved.extend(available.iter().copied()),
        Some(request) => {
            for token in request.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                match available.iter().copied().find(|name| *name == token) {
                    Some(name) if !resolved.contains(&name) => resolved.push(name),
                    Some(_) => {}
                    None => debug!(field = %token, "dropping unknown field"),
                }
            }
        }
    }

    if !resolved.contains(&identity) {
        resolved.push(identity);
    }

    resolved
}
