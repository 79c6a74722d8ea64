//! Resistance - Spell damage mitigation

/// Fraction of spell damage removed by a resistance percentage
///
/// Resistance is clamped to `[0, max_resistance]`.
pub fn resistance_mitigation(resistance: f64, max_resistance: f64) -> f64 {
    resistance.clamp(0.0, max_resistance.max(0.0)) / 100.0
}

/// Spell damage remaining after resistance
pub fn apply_resistance(damage: f64, resistance: f64, max_resistance: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * (1.0 - resistance_mitigation(resistance, max_resistance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_resistance() {
        let result = apply_resistance(100.0, 25.0, 75.0);
        assert!((result - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resistance_capped() {
        let result = apply_resistance(100.0, 150.0, 75.0);
        assert!((result - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_resistance_ignored() {
        let result = apply_resistance(100.0, -50.0, 75.0);
        assert!((result - 100.0).abs() < f64::EPSILON);
    }
}
