//! Name matching helpers.

use deunicode::deunicode;

/// Case-insensitive comparison after replacing accented characters
/// (ąčęėįšųūž, é, ô, ...) in the stored name with ASCII approximations.
pub(crate) fn user_name_matches(stored: &str, query: &str) -> bool {
    eq_fold(&deunicode(stored), query)
}

/// Case-insensitive string comparison.
pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(user_name_matches("Timur Kalandarov", "timur kalandarov"));
        assert!(user_name_matches("Timur Kalandarov", "TIMUR KALANDAROV"));
        assert!(!user_name_matches("Timur Kalandarov", "Timur"));
    }

    #[test]
    fn matching_ignores_diacritics_in_stored_names() {
        assert!(user_name_matches("José", "JOSE"));
        assert!(user_name_matches("Žydrūnas Ilgauskas", "zydrunas ilgauskas"));
    }

    #[test]
    fn eq_fold_handles_non_ascii_case() {
        assert!(eq_fold("GSOC Platform", "gsoc platform"));
        assert!(!eq_fold("GSOC Platform", "platform"));
    }
}
