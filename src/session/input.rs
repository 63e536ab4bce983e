#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputChange {
    /// Typed length grew by `added` characters.
    Forward { added: usize },
    /// Typed length shrank.
    Deletion,
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeystrokeEvent {
    pub index: usize,
    /// `None` past the end of the practice text.
    pub expected: Option<char>,
    pub actual: char,
    pub correct: bool,
}

/// The typed value as characters, with anything past the end of the practice
/// text dropped.
pub fn clamp_to_text(value: &str, text_len: usize) -> Vec<char> {
    value.chars().take(text_len).collect()
}

pub fn classify(previous_len: usize, next_len: usize) -> InputChange {
    if next_len > previous_len {
        InputChange::Forward {
            added: next_len - previous_len,
        }
    } else if next_len < previous_len {
        InputChange::Deletion
    } else {
        InputChange::Unchanged
    }
}

/// One event per character appended beyond `from`, in typing order.
pub fn forward_keystrokes(target: &[char], typed: &[char], from: usize) -> Vec<KeystrokeEvent> {
    typed
        .iter()
        .enumerate()
        .skip(from)
        .map(|(index, &actual)| {
            let expected = target.get(index).copied();
            KeystrokeEvent {
                index,
                expected,
                actual,
                correct: expected == Some(actual),
            }
        })
        .collect()
}
