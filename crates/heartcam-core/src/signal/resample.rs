/// Linearly interpolate `(times, values)` onto a uniform grid at
/// `sampling_rate`, from the first to the last sample time.
///
/// `times` must be strictly increasing and the same length as `values`.
/// Inputs with fewer than two samples are returned unchanged.
pub fn resample_uniform(times: &[f64], values: &[f64], sampling_rate: f64) -> Vec<f64> {
    debug_assert_eq!(times.len(), values.len());
    let n = times.len().min(values.len());
    if n < 2 {
        return values[..n].to_vec();
    }

    let t0 = times[0];
    let span = times[n - 1] - t0;
    // Guard against 29.999999 -> 29 from accumulated tick arithmetic.
    let count = (span * sampling_rate + 1e-9).floor() as usize + 1;

    let mut out = Vec::with_capacity(count);
    let mut j = 0;
    for i in 0..count {
        let t = t0 + i as f64 / sampling_rate;
        while j + 2 < n && times[j + 1] < t {
            j += 1;
        }
        let (ta, tb) = (times[j], times[j + 1]);
        let frac = ((t - ta) / (tb - ta)).clamp(0.0, 1.0);
        out.push(values[j] + frac * (values[j + 1] - values[j]));
    }
    out
}
