//! Count formatting for log summaries.

/// `"1 door"`, `"0 doors"`, `"3 sources"`.
///
/// Only regular nouns are handled; every noun used in output takes `-s`.
pub fn plural_count(count: usize, noun: &str) -> String {
    match count {
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    }
}
