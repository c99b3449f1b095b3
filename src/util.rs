pub fn percentage(part: u32, total: u32) -> Option<f64> {
    match total {
        positive if positive > 0 => Some(part as f64 / total as f64 * 100.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), Some(50.0));
        assert_eq!(percentage(3, 3), Some(100.0));
        assert_eq!(percentage(0, 7), Some(0.0));
    }

    #[test]
    fn test_percentage_thirds() {
        let p = percentage(1, 3).unwrap();
        assert!((p - 33.333333333333336).abs() < 1e-10);
        assert_eq!(format!("{p:.1}"), "33.3");
    }

    #[test]
    fn test_percentage_empty_total() {
        assert_eq!(percentage(0, 0), None);
    }
}
