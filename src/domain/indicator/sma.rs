//! Simple moving average over a trailing window.
//!
//! MA_k(i) = mean(values[i-k+1 ..= i]) for i >= k-1, undefined before that.
//! Each window is summed from scratch so results do not depend on the
//! accumulated rounding of a running sum.

pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < period {
                None
            } else {
                let window = &values[i + 1 - period..=i];
                Some(window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect()
}
