//! RSI (Relative Strength Index) over a trailing window of price changes.
//!
//! delta(t) = close[t] - close[t-1]; gain/loss are the positive/negative parts.
//! avg_gain(i) and avg_loss(i) are the simple means over the `period` deltas
//! ending at i, so RSI(i) is defined from i = period onwards.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100, including a flat window with no gains either.

pub const RSI_MAX: f64 = 100.0;

pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || closes.len() < 2 {
        return vec![None; closes.len()];
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for w in closes.windows(2) {
        let change = w[1] - w[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values = Vec::with_capacity(closes.len());
    values.push(None);

    for i in 1..closes.len() {
        if i < period {
            values.push(None);
            continue;
        }
        // gains[t - 1] holds delta(t)
        let window = i - period..i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
        values.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        RSI_MAX
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_single_close() {
        assert_eq!(calculate_rsi(&[100.0], 14), vec![None]);
    }

    #[test]
    fn rsi_warmup_period() {
        let closes: Vec<f64> = (1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0).collect();
        let rsi = calculate_rsi(&closes, 14);

        assert_eq!(rsi.len(), 15);
        for (i, v) in rsi.iter().enumerate().take(14) {
            assert!(v.is_none(), "index {} should be undefined", i);
        }
        assert!(rsi[14].is_some(), "index 14 should be defined");
    }

    #[test]
    fn rsi_all_gains_is_max() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);
        assert_eq!(rsi[14], Some(100.0));
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&closes, 14).pop().flatten().unwrap();
        assert!(rsi.abs() < f64::EPSILON, "RSI should be 0 when all losses");
    }

    #[test]
    fn rsi_flat_prices_use_zero_loss_policy() {
        let closes = vec![50.0; 20];
        let rsi = calculate_rsi(&closes, 14);
        for v in rsi.iter().skip(14) {
            assert_eq!(*v, Some(RSI_MAX));
        }
    }

    #[test]
    fn rsi_balanced_window_is_fifty() {
        // alternating +1 / -1 over an even window
        let closes: Vec<f64> = (0..5).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        let rsi = calculate_rsi(&closes, 4);
        let last = rsi[4].unwrap();
        assert!((last - 50.0).abs() < 1e-12);
    }

    #[test]
    fn rsi_uses_trailing_window_only() {
        // a large early loss drops out of the window after `period` deltas
        let mut closes = vec![200.0, 100.0];
        closes.extend((1..=4).map(|i| 100.0 + i as f64));
        let rsi = calculate_rsi(&closes, 3);
        assert!(rsi[3].unwrap() < 50.0);
        assert_eq!(rsi[5], Some(100.0));
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=40)
            .map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0)
            .collect();
        for v in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
        }
    }

    #[test]
    fn rsi_zero_period() {
        let rsi = calculate_rsi(&[100.0, 101.0], 0);
        assert_eq!(rsi, vec![None, None]);
    }
}
