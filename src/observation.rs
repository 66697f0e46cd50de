use std::fmt::Write;

/// One line of the observation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// The line as it was read.
    pub line: String,
    /// The line without whitespace, one symbol per character.
    pub symbols: Vec<char>,
}

impl Observation {
    pub fn parse(line: impl Into<String>) -> Self {
        let line = line.into();
        let symbols = line
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect();
        Self { line, symbols }
    }
}

/// Renders 0-indexed states as 1-indexed labels, e.g. `S1->S2->S2`.
pub fn render_path(path: &[usize]) -> String {
    let mut result = String::with_capacity(path.len() * 4);
    for (index, state) in path.iter().enumerate() {
        if index > 0 {
            result.push_str("->");
        }
        // Writing into a String cannot fail.
        let _ = write!(result, "S{}", state + 1);
    }
    result
}
