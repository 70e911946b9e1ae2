const INVISIBLE: [char; 2] = ['\u{feff}', '\u{200b}'];

/// Folds a header into `snake_case` so spelling variants resolve to one key.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(INVISIBLE, "").to_lowercase();
    cleaned
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Collapses inner whitespace; blank cells become `None`.
pub(crate) fn normalize_category(value: &str) -> Option<String> {
    let cleaned = value.replace(INVISIBLE, "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_fold_case_spacing_and_separators() {
        assert_eq!(normalize_header("\u{feff}Candidate ID"), "candidate_id");
        assert_eq!(normalize_header("  Hiring-Duration  Days "), "hiring_duration_days");
        assert_eq!(normalize_header("Año_Aplicacion"), "año_aplicacion");
        assert_eq!(normalize_header("process__state"), "process_state");
    }

    #[test]
    fn categories_collapse_whitespace_and_drop_blanks() {
        assert_eq!(
            normalize_category("  Offer   accepted "),
            Some("Offer accepted".to_string())
        );
        assert_eq!(normalize_category(" \u{200b} "), None);
    }
}
