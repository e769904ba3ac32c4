// ============================================================
// Layer 4 — ARFF Line Parser
// ============================================================
// Turns ARFF text, one line at a time, into a header (relation
// name + attribute names) and a list of raw records.
//
// File layout:
//
//   % comment
//   @RELATION KDDTrain
//   @ATTRIBUTE duration real
//   @ATTRIBUTE protocol_type {tcp,udp,icmp}
//   @DATA
//   0,tcp,...
//   0,"a,b",...
//
// The parser has two states: header and data. `@DATA` flips it
// from one to the other and it never flips back. Attribute types
// are ignored; only the name (second token) is kept.
//
// Records are split on commas outside double quotes. A double
// quote toggles the quoted state and stays in the field until the
// field is trimmed of whitespace and surrounding quotes.

const COMMENT: char = '%';
const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// One data line, tagged with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line:   usize,
    pub fields: Vec<String>,
}

/// Everything read from one ARFF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArff {
    pub relation:   Option<String>,
    pub attributes: Vec<String>,
    pub records:    Vec<Record>,
}

/// Incremental parser; feed it lines in file order.
#[derive(Debug, Default)]
pub struct ArffParser {
    in_data: bool,
    parsed:  ParsedArff,
}

impl ArffParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw line (line terminator optional).
    pub fn feed(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();

        if line.is_empty() || line.starts_with(COMMENT) {
            return;
        }

        if has_directive(line, "@DATA") {
            self.in_data = true;
            return;
        }

        if self.in_data {
            let fields = split_record(line);
            if !fields.is_empty() {
                self.parsed.records.push(Record { line: line_no, fields });
            }
            return;
        }

        if has_directive(line, "@ATTRIBUTE") {
            if let Some(name) = second_token(line) {
                self.parsed.attributes.push(name);
            }
        } else if has_directive(line, "@RELATION") {
            self.parsed.relation = second_token(line);
        }
    }

    /// True once `@DATA` has been seen
    pub fn in_data(&self) -> bool {
        self.in_data
    }

    pub fn finish(self) -> ParsedArff {
        self.parsed
    }
}

/// Parse a whole ARFF document held in memory.
#[cfg(test)]
pub fn parse_str(text: &str) -> ParsedArff {
    let mut parser = ArffParser::new();
    for (i, line) in text.lines().enumerate() {
        parser.feed(i + 1, line);
    }
    parser.finish()
}

/// Split one data line into trimmed fields, keeping commas inside
/// double-quoted values. A separator at the very end of the line
/// does not produce a trailing empty field.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields  = Vec::new();
    let mut current = String::new();
    let mut quoted  = false;

    for c in line.chars() {
        if c == QUOTE {
            quoted = !quoted;
        } else if c == SEPARATOR && !quoted {
            fields.push(clean_field(&current));
            current.clear();
            continue;
        }
        current.push(c);
    }

    if !current.is_empty() {
        fields.push(clean_field(&current));
    }

    fields
}

fn clean_field(raw: &str) -> String {
    strip_quotes(raw.trim()).to_string()
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

/// Case-insensitive prefix match on a directive keyword.
fn has_directive(line: &str, directive: &str) -> bool {
    line.get(..directive.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(directive))
}

/// Second whitespace-separated token with surrounding quotes removed.
fn second_token(line: &str) -> Option<String> {
    line.split_whitespace()
        .nth(1)
        .map(|t| strip_quotes(t).to_string())
}
