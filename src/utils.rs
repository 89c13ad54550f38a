// src/utils.rs

/// Format large dollar amounts in a human-readable way
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000_000.0 {
        format!("{:.2}B", num / 1_000_000_000.0)
    } else if num >= 1_000_000.0 {
        format!("{:.2}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.2}K", num / 1_000.0)
    } else {
        format!("{:.2}", num)
    }
}

/// Format a price with decimal places appropriate to its magnitude.
/// Memecoin prices routinely sit below a millionth of a dollar.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${:.4}", price)
    } else if price >= 0.01 {
        format!("${:.6}", price)
    } else {
        format!("${:.8}", price)
    }
}

/// Percentage change from `old` to `new`. Zero when `old` is zero.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    (new - old) / old * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_scales_units() {
        assert_eq!(format_number(1_500_000_000.0), "1.50B");
        assert_eq!(format_number(2_340_000.0), "2.34M");
        assert_eq!(format_number(45_000.5), "45.00K");
        assert_eq!(format_number(999.99), "999.99");
    }

    #[test]
    fn format_price_precision_tracks_magnitude() {
        assert_eq!(format_price(12.3456), "$12.3456");
        assert_eq!(format_price(0.123456), "$0.123456");
        assert_eq!(format_price(0.00012345), "$0.00012345");
    }

    #[test]
    fn percentage_change_basic() {
        assert!((percentage_change(1.0, 1.12) - 12.0).abs() < 1e-9);
        assert!((percentage_change(2.0, 1.0) - (-50.0)).abs() < 1e-9);
        assert_eq!(percentage_change(0.0, 5.0), 0.0);
    }
}
