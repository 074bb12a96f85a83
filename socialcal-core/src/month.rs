//! The static twelve-month table behind the grid.

/// One column of the year grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthConfig {
    pub name: &'static str,
    /// Number of cells shown for the month. February always shows 29.
    pub days: u32,
}

impl MonthConfig {
    /// Day numbers laid out in this month's column.
    pub fn day_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.days
    }
}

pub const MONTHS: [MonthConfig; 12] = [
    MonthConfig { name: "January", days: 31 },
    MonthConfig { name: "February", days: 29 },
    MonthConfig { name: "March", days: 31 },
    MonthConfig { name: "April", days: 30 },
    MonthConfig { name: "May", days: 31 },
    MonthConfig { name: "June", days: 30 },
    MonthConfig { name: "July", days: 31 },
    MonthConfig { name: "August", days: 31 },
    MonthConfig { name: "September", days: 30 },
    MonthConfig { name: "October", days: 31 },
    MonthConfig { name: "November", days: 30 },
    MonthConfig { name: "December", days: 31 },
];

pub fn month_config(month_index: u32) -> Option<&'static MonthConfig> {
    MONTHS.get(month_index as usize)
}

/// Parse a month given as 1-12 or an English name (at least three letters).
/// Returns the 0-based month index.
pub fn parse_month(input: &str) -> Option<u32> {
    let input = input.trim();

    if let Ok(n) = input.parse::<u32>() {
        return (1..=12).contains(&n).then(|| n - 1);
    }

    if input.len() < 3 {
        return None;
    }

    let lower = input.to_lowercase();
    MONTHS
        .iter()
        .position(|m| m.name.to_lowercase().starts_with(&lower))
        .map(|i| i as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_february_always_has_29_cells() {
        let feb = month_config(1).unwrap();
        assert_eq!(feb.name, "February");
        assert_eq!(feb.days, 29);
        assert_eq!(feb.day_numbers().last(), Some(29));
    }

    #[test]
    fn test_year_grid_has_366_cells() {
        let total: u32 = MONTHS.iter().map(|m| m.days).sum();
        assert_eq!(total, 366);
    }

    #[test]
    fn test_month_config_out_of_range() {
        assert!(month_config(12).is_none());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("1"), Some(0));
        assert_eq!(parse_month("12"), Some(11));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("mar"), Some(2));
        assert_eq!(parse_month("September"), Some(8));
        assert_eq!(parse_month("ju"), None);
        assert_eq!(parse_month("jun"), Some(5));
        assert_eq!(parse_month("jul"), Some(6));
        assert_eq!(parse_month("smarch"), None);
    }
}
