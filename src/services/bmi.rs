use crate::models::daily_record::Weight;

/// Height used when a weight is logged without one.
pub const DEFAULT_HEIGHT_M: f64 = 1.70;

/// `weight / height²`, rounded to two decimals.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    round2(weight_kg / (height_m * height_m))
}

/// Round to two decimals from the exact value of the double, so 7.674999…
/// (30.7 / 4) stays 7.67. Exact ties (multiples of 1/8) go up.
fn round2(value: f64) -> f64 {
    if (value * 8.0).fract() == 0.0 {
        return (value * 100.0).ceil() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Recompute the derived BMI in place. A client-supplied `bmi` is never kept.
pub fn apply(weight: &mut Weight) {
    match weight.weight_kg {
        Some(kg) if kg > 0.0 => {
            let height = *weight.height_m.get_or_insert(DEFAULT_HEIGHT_M);
            weight.bmi = Some(bmi(kg, height));
        }
        _ => weight.bmi = None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(kg: Option<f64>, height: Option<f64>, bmi: Option<f64>) -> Weight {
        Weight {
            weight_kg: kg,
            height_m: height,
            bmi,
            target_weight_kg: None,
        }
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        assert_eq!(bmi(70.0, 1.75), 22.86);
        assert_eq!(bmi(80.0, 2.0), 20.0);
        assert_eq!(bmi(55.5, 1.62), 21.15);
    }

    #[test]
    fn test_rounding_uses_exact_double_value() {
        // 30.7 / 4 is stored as 7.674999…, which must not round up.
        assert_eq!(bmi(30.7, 2.0), 7.67);
        // 80.5 / 4 is exactly 20.125.
        assert_eq!(bmi(80.5, 2.0), 20.13);
        assert_eq!(bmi(81.0, 2.0), 20.25);
    }

    #[test]
    fn test_rounding_matches_decimal_formatting_across_grid() {
        for kg in (300..=2000).step_by(7).map(|w| w as f64 / 10.0) {
            for cm in (150..=210).step_by(3) {
                let height = cm as f64 / 100.0;
                let raw = kg / (height * height);
                let got = bmi(kg, height);
                assert!((got - raw).abs() <= 0.005 + 1e-9, "{kg} / {height}: {got} vs {raw}");
                assert_eq!(got, format!("{got:.2}").parse::<f64>().unwrap());
            }
        }
    }

    #[test]
    fn test_zero_weight_has_no_bmi() {
        let mut w = weight(Some(0.0), None, Some(12.0));
        apply(&mut w);
        assert_eq!(w.bmi, None);
        assert_eq!(w.height_m, None);
    }

    #[test]
    fn test_missing_height_uses_default() {
        let mut w = weight(Some(70.0), None, None);
        apply(&mut w);
        assert_eq!(w.height_m, Some(DEFAULT_HEIGHT_M));
        assert_eq!(w.bmi, Some(bmi(70.0, 1.70)));
        assert_eq!(w.bmi, Some(24.22));
    }

    #[test]
    fn test_client_bmi_is_overwritten() {
        let mut w = weight(Some(70.0), Some(1.75), Some(99.9));
        apply(&mut w);
        assert_eq!(w.bmi, Some(22.86));
    }

    #[test]
    fn test_bmi_cleared_without_weight() {
        let mut w = weight(None, Some(1.80), Some(25.0));
        apply(&mut w);
        assert_eq!(w.bmi, None);
        assert_eq!(w.height_m, Some(1.80));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut once = weight(Some(92.3), Some(1.81), None);
        apply(&mut once);
        let mut twice = once.clone();
        apply(&mut twice);
        assert_eq!(once, twice);
    }
}
