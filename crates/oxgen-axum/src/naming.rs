//! Identifier case transforms for emitted code.

use heck::{ToShoutySnakeCase, ToSnakeCase};

/// Uppercase the first character — spec names to exported type and group
/// identifiers.
pub fn caps(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first character — type names to local value names.
pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Spec names to Rust field, function, and module identifiers.
pub fn snake(word: &str) -> String {
    word.to_snake_case()
}

/// Spec names to static identifiers.
pub fn shouty_snake(word: &str) -> String {
    word.to_shouty_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps() {
        assert_eq!(caps("pets"), "Pets");
        assert_eq!(caps("addPet"), "AddPet");
        assert_eq!(caps("X"), "X");
        assert_eq!(caps(""), "");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Pet"), "pet");
        assert_eq!(lower_first("OrderItem"), "orderItem");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_snake() {
        assert_eq!(snake("petId"), "pet_id");
        assert_eq!(snake("shipDate"), "ship_date");
        assert_eq!(snake("Pet"), "pet");
    }

    #[test]
    fn test_shouty_snake() {
        assert_eq!(shouty_snake("orderQuantity"), "ORDER_QUANTITY");
    }
}
