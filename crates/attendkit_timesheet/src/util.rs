//! Stateless helper utilities used by the parser and the sheet builder.

use crate::conf::TUP_FILE_NAME_ILLEGAL;

////////////////////////////////////////////////////////////////////////////////
// #region CalendarArithmetic

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days of `month` (1-12) in `year`. Returns 0 for an invalid month.
pub fn calculate_days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TextUtils

/// Uppercase the first character and lowercase the rest (`gennaio` -> `Gennaio`).
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(chr_first) => chr_first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Replace path separators and other characters not allowed in file names.
pub fn sanitize_file_stem(stem: &str, replace_to: &str) -> String {
    stem.chars()
        .map(|chr| {
            if chr.is_control() || TUP_FILE_NAME_ILLEGAL.contains(&chr) {
                replace_to.to_string()
            } else {
                chr.to_string()
            }
        })
        .collect()
}

/// Suggested file name: `<FirstName>_<CapitalizedMonth><Year>.xlsx`.
///
/// The first name is sanitized so the result is always a single path component.
pub fn derive_file_name(first_name: &str, month_name: &str, year: i32) -> String {
    format!(
        "{}_{}{year}.xlsx",
        sanitize_file_stem(first_name, "_"),
        capitalize_first(month_name)
    )
}

/// Displayed length of a cell text, in characters.
pub fn calculate_text_width(text: &str) -> usize {
    text.chars().count()
}

/// Per-column width: widest text of the column plus `padding`.
///
/// Rows may be shorter than the widest row; missing cells count as empty.
pub fn plan_column_widths(grid_text: &[Vec<String>], padding: usize) -> Vec<usize> {
    let n_cols = grid_text.iter().map(Vec::len).max().unwrap_or(0);
    let mut l_width_by_col = vec![0usize; n_cols];
    for row in grid_text {
        for (n_idx_col, c_text) in row.iter().enumerate() {
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], calculate_text_width(c_text));
        }
    }
    l_width_by_col.into_iter().map(|n| n + padding).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_follows_gregorian_rules() {
        assert_eq!(calculate_days_in_month(2025, 1), 31);
        assert_eq!(calculate_days_in_month(2025, 4), 30);
        assert_eq!(calculate_days_in_month(2025, 2), 28);
        assert_eq!(calculate_days_in_month(2024, 2), 29);
        assert_eq!(calculate_days_in_month(1900, 2), 28);
        assert_eq!(calculate_days_in_month(2000, 2), 29);
        assert_eq!(calculate_days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("gennaio"), "Gennaio");
        assert_eq!(capitalize_first("GENNAIO"), "Gennaio");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_derive_file_name() {
        assert_eq!(
            derive_file_name("Mario", "marzo", 2025),
            "Mario_Marzo2025.xlsx"
        );
    }

    #[test]
    fn test_derive_file_name_never_escapes_directory() {
        assert_eq!(
            derive_file_name("../x", "marzo", 2025),
            ".._x_Marzo2025.xlsx"
        );
        assert_eq!(
            derive_file_name("a\\b:c", "aprile", 2025),
            "a_b_c_Aprile2025.xlsx"
        );
        assert_eq!(sanitize_file_stem("Anna Maria", "_"), "Anna Maria");
    }

    #[test]
    fn test_plan_column_widths_counts_chars_and_pads() {
        let grid = vec![
            vec!["Nome".to_string(), "Mario".to_string()],
            vec![],
            vec!["Lunedì, 05-01-2026".to_string()],
        ];
        assert_eq!(plan_column_widths(&grid, 2), vec![20, 7]);
    }
}
