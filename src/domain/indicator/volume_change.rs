//! Fractional change in volume against the previous bar.
//!
//! VolumeChange(i) = (volume[i] - volume[i-1]) / volume[i-1] for i >= 1.
//! A zero previous volume yields 0.0: there is no base to measure a change
//! against, and the value must stay finite for the feature matrix.

pub fn calculate_volume_change(volumes: &[f64]) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(volumes.len());
    if volumes.is_empty() {
        return values;
    }

    values.push(None);
    for w in volumes.windows(2) {
        let (prev, curr) = (w[0], w[1]);
        let change = if prev == 0.0 { 0.0 } else { (curr - prev) / prev };
        values.push(Some(change));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_change_empty() {
        assert!(calculate_volume_change(&[]).is_empty());
    }

    #[test]
    fn volume_change_first_is_undefined() {
        assert_eq!(calculate_volume_change(&[1000.0]), vec![None]);
    }

    #[test]
    fn volume_change_known_values() {
        let vc = calculate_volume_change(&[100.0, 150.0, 75.0]);
        assert_eq!(vc, vec![None, Some(0.5), Some(-0.5)]);
    }

    #[test]
    fn volume_change_zero_denominator() {
        let vc = calculate_volume_change(&[1000.0, 0.0, 500.0]);
        assert_eq!(vc, vec![None, Some(-1.0), Some(0.0)]);
    }

    #[test]
    fn volume_change_constant_volume_is_zero() {
        let vc = calculate_volume_change(&[1000.0; 4]);
        assert!(vc.iter().skip(1).all(|v| *v == Some(0.0)));
    }
}
