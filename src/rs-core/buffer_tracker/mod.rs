use crate::utils::time_ranges::TimeRanges;

/// Returns the percentage, from `0` to `100`, of the content's duration covered by the
/// buffered range containing `position`.
///
/// Returns `0` when no buffered range contains `position`: the nearest one would not be
/// playable right away. Also returns `0` when the duration is unknown, infinite or null.
pub(crate) fn buffered_percentage(
    position: f64,
    buffered: &TimeRanges,
    duration: Option<f64>,
) -> f64 {
    let duration = match duration {
        Some(d) if d.is_finite() && d > 0. => d,
        _ => return 0.,
    };
    match buffered.range_for(position) {
        Some(range) => (range.len() * 100. / duration).clamp(0., 100.),
        None => 0.,
    }
}

/// Same as `buffered_percentage`, for a raw buffered report as sent by the
/// JavaScript-side: `[start0, end0, start1, end1, ...]`.
pub(crate) fn buffered_percentage_from_report(
    position: f64,
    report: &[f64],
    duration: Option<f64>,
) -> f64 {
    buffered_percentage(position, &TimeRanges::from_flat_report(report), duration)
}
