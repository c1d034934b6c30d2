/// Compute X (seconds) and Y (clicks/sec) bounds for the results chart
pub fn compute_chart_params(cps_coords: &[(f64, f64)], duration_secs: f64) -> (f64, f64) {
    let mut highest_rate: f64 = 0.0;
    for &(_, rate) in cps_coords {
        if rate > highest_rate {
            highest_rate = rate;
        }
    }

    let overall_duration = duration_secs.max(1.0);
    (overall_duration, highest_rate.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
