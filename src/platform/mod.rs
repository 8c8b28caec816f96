//! Platform abstraction layer
//!
//! Maps browser `KeyboardEvent.key` names onto the game's logical buttons.

use crate::sim::Button;

/// Logical button for a `KeyboardEvent.key` value, if the key is bound.
pub fn button_for_key(key: &str) -> Option<Button> {
    match key {
        "a" | "A" | "ArrowLeft" => Some(Button::Left),
        "d" | "D" | "ArrowRight" => Some(Button::Right),
        " " | "ArrowUp" => Some(Button::Jump),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_keys() {
        assert_eq!(button_for_key("a"), Some(Button::Left));
        assert_eq!(button_for_key("A"), Some(Button::Left));
        assert_eq!(button_for_key("ArrowRight"), Some(Button::Right));
        assert_eq!(button_for_key(" "), Some(Button::Jump));
        assert_eq!(button_for_key("ArrowUp"), Some(Button::Jump));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(button_for_key("w"), None);
        assert_eq!(button_for_key("ArrowDown"), None);
        assert_eq!(button_for_key("Space"), None);
    }
}
