//! Copy-name generation for duplicated items.

/// Pick a free name for a copy of `original` within a sibling scope.
///
/// The first copy is suffixed `" (Copy)"`; further copies count upward
/// (`" (Copy 2)"`, `" (Copy 3)"`, ...) until a name not in `taken` is
/// found.
pub(crate) fn duplicate_name(original: &str, taken: &[String]) -> String {
    let first = format!("{original} (Copy)");
    if !taken.iter().any(|name| name == &first) {
        return first;
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{original} (Copy {counter})");
        if !taken.iter().any(|name| name == &candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_copy_gets_the_plain_suffix() {
        let taken = vec!["Smoke".to_string()];
        assert_eq!(duplicate_name("Smoke", &taken), "Smoke (Copy)");
    }

    #[test]
    fn taken_copies_count_upward() {
        let taken = vec![
            "Smoke".to_string(),
            "Smoke (Copy)".to_string(),
            "Smoke (Copy 2)".to_string(),
        ];
        assert_eq!(duplicate_name("Smoke", &taken), "Smoke (Copy 3)");
    }

    #[test]
    fn gaps_in_the_numbering_are_reused() {
        let taken = vec!["Smoke (Copy)".to_string(), "Smoke (Copy 3)".to_string()];
        assert_eq!(duplicate_name("Smoke", &taken), "Smoke (Copy 2)");
    }
}
