//! Hint masking

/// Pattern written for each hidden character
pub const MASK: &str = "* ";

/// Obscure a label, keeping its first and last characters.
///
/// `Pikachu` becomes `P * * * * * u`. Labels shorter than two characters
/// have nothing left to hide and yield `None`; no hint is sent for them.
pub fn mask_label(label: &str) -> Option<String> {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() < 2 {
        return None;
    }

    let first = chars[0];
    let last = chars[chars.len() - 1];
    Some(format!("{} {}{}", first, MASK.repeat(chars.len() - 2), last))
}

/// Full hint message announcing the pending action
pub fn hint_message(masked: &str, delay_seconds: u64) -> String {
    format!(
        "I think this might be {}. {} seconds until I try to catch it.",
        masked, delay_seconds
    )
}
