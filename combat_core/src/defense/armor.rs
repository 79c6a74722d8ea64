//! Armor - Physical damage reduction with diminishing returns

use crate::config::ArmorConstants;

/// Fraction of physical damage removed by armor
///
/// `reduction = armor / (armor + base + per_level * attacker_level)`, capped
/// at `max_reduction`. Higher level attackers punch through more armor.
pub fn armor_reduction(armor: f64, attacker_level: u32, constants: &ArmorConstants) -> f64 {
    if armor <= 0.0 {
        return 0.0;
    }
    let divisor = armor + constants.base_constant + constants.per_attacker_level * attacker_level as f64;
    if divisor <= 0.0 {
        return constants.max_reduction;
    }
    (armor / divisor).clamp(0.0, constants.max_reduction)
}

/// Physical damage remaining after armor
pub fn apply_armor(damage: f64, armor: f64, attacker_level: u32, constants: &ArmorConstants) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * (1.0 - armor_reduction(armor, attacker_level, constants))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_armor() {
        let constants = ArmorConstants::default();
        let result = apply_armor(100.0, 0.0, 10, &constants);
        assert!((result - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_known_value() {
        let constants = ArmorConstants::default();
        // 1250 / (1250 + 400 + 85 * 10) = 0.5
        let reduction = armor_reduction(1250.0, 10, &constants);
        assert!((reduction - 0.5).abs() < 1e-9);
        assert!((apply_armor(80.0, 1250.0, 10, &constants) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_reduction_capped() {
        let constants = ArmorConstants::default();
        let reduction = armor_reduction(1_000_000.0, 1, &constants);
        assert!((reduction - constants.max_reduction).abs() < f64::EPSILON);
    }

    #[test]
    fn test_higher_attacker_level_penetrates() {
        let constants = ArmorConstants::default();
        assert!(armor_reduction(500.0, 5, &constants) > armor_reduction(500.0, 30, &constants));
    }
}
