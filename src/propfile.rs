// Property File Parser
// Parses simple key=value property files

/// One `key = value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// 1-based line number in the source text.
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Parse property file text.
///
/// Keys keep their case. `#` starts a comment anywhere on a line. Blank lines
/// are skipped; lines without `=` and lines with an empty key are skipped
/// with a warning. Whitespace around keys and values is trimmed.
pub fn parse_properties(data: &str) -> Vec<Property> {
    let mut properties = Vec::new();

    for (index, raw_line) in data.lines().enumerate() {
        let line_no = index + 1;
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            log::warn!("Key without value at line {}", line_no);
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            log::warn!("Value without key at line {}", line_no);
            continue;
        }

        properties.push(Property {
            line: line_no,
            key: key.to_string(),
            value: value.trim().to_string(),
        });
    }

    properties
}
