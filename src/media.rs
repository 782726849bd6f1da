//! Media types - deciding whether a response carries hypermedia links.

use mime::Mime;

use crate::error::MediaTypeError;

/// Marker token identifying hypermedia-enabled media types.
pub const HATEOAS_MARKER: &str = "hateoas";

/// Media types the employee resources can be rendered as.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/vnd.codemaze.hateoas+json",
    "application/vnd.codemaze.hateoas+xml",
];

/// Returns true when the negotiated media type asks for links.
///
/// Matches [`HATEOAS_MARKER`] anywhere in the string, ignoring ASCII case.
pub fn should_link(media_type: &str) -> bool {
    media_type.to_ascii_lowercase().contains(HATEOAS_MARKER)
}

/// Pick the response media type from an `Accept` header value.
///
/// Media ranges are tried by descending `q` value (default 1), ties keeping
/// the order listed; `q=0` excludes the range. `*/*` and `type/*` pick the
/// first matching entry of `supported`. Parameters are dropped from the result.
///
/// # Errors
///
/// Returns `MediaTypeError::Missing` for an absent or blank header,
/// `Invalid` for a range that does not parse, and `Unsupported` when no
/// range matches.
pub fn negotiate(accept: Option<&str>, supported: &[&str]) -> Result<String, MediaTypeError> {
    let header = accept
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(MediaTypeError::Missing)?;

    let mut ranges = Vec::new();
    for raw in header.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        let range: Mime = raw.parse().map_err(|_| MediaTypeError::Invalid {
            value: raw.to_string(),
        })?;
        ranges.push(range);
    }

    let mut ranges: Vec<(f32, Mime)> = ranges
        .into_iter()
        .map(|range| (quality(&range), range))
        .filter(|(q, _)| *q > 0.0)
        .collect();
    // stable: equal weights keep header order
    ranges.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    ranges
        .iter()
        .map(|(_, range)| range)
        .find_map(|range| match_range(range, supported))
        .map(str::to_string)
        .ok_or_else(|| MediaTypeError::Unsupported {
            value: header.to_string(),
        })
}

fn quality(range: &Mime) -> f32 {
    range
        .get_param("q")
        .and_then(|q| q.as_str().parse::<f32>().ok())
        .unwrap_or(1.0)
}

fn match_range<'a>(range: &Mime, supported: &[&'a str]) -> Option<&'a str> {
    supported.iter().copied().find(|candidate| {
        let Ok(candidate) = candidate.parse::<Mime>() else {
            return false;
        };
        let type_matches = range.type_() == mime::STAR || range.type_() == candidate.type_();
        let subtype_matches =
            range.subtype() == mime::STAR || range.subtype() == candidate.subtype();
        let suffix_matches = range.subtype() == mime::STAR || range.suffix() == candidate.suffix();
        type_matches && subtype_matches && suffix_matches
    })
}
