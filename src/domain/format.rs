//! Display helpers for user fields.

/// Human label for a raw status value. Unrecognised values read as "Unknown".
pub fn status_label(status: &str) -> &'static str {
    match status {
        "active" => "Active",
        "inactive" => "Inactive",
        _ => "Unknown",
    }
}

/// Capitalises the first letter of every space-separated word and lower-cases the rest.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_known_and_unknown_statuses() {
        assert_eq!(status_label("active"), "Active");
        assert_eq!(status_label("inactive"), "Inactive");
        assert_eq!(status_label("banned"), "Unknown");
        assert_eq!(status_label(""), "Unknown");
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("jOHN doe"), "John Doe");
        assert_eq!(title_case("leanne  graham"), "Leanne  Graham");
        assert_eq!(title_case(""), "");
    }
}
