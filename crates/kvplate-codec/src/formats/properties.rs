//! Java-style `.properties` files
//!
//! Dotted keys nest into maps (`db.port=1` becomes `{db: {port: "1"}}`) and
//! every value is a string. Serialization walks the tree back into sorted
//! `key = value` lines.

use kvplate_core::{Mapping, Tree};

use crate::error::{CodecError, Result};

pub fn parse(input: &str) -> Result<Tree> {
    let mut root = Mapping::new();

    for (line_no, line) in logical_lines(input) {
        let (key, value) = split_entry(&line);
        insert_dotted(&mut root, &unescape(key), unescape(value), line_no)?;
    }

    Ok(Tree::Map(root))
}

pub fn serialize(tree: &Tree) -> Result<String> {
    let mut out = String::new();
    write_node(tree, "", &mut out)?;
    Ok(out)
}

/// Join continuation lines and drop comments and blanks
///
/// Yields the 1-based number of the line each entry starts on.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut entries = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim_start();

        let (start, mut text) = match pending.take() {
            Some((start, text)) => (start, text),
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        if ends_with_continuation(line) {
            text.push_str(&line[..line.len() - 1]);
            pending = Some((start, text));
        } else {
            text.push_str(line);
            entries.push((start, text));
        }
    }

    if let Some(entry) = pending {
        entries.push(entry);
    }
    entries
}

/// Odd number of trailing backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn insert_dotted(root: &mut Mapping, key: &str, value: String, line: usize) -> Result<()> {
    let segments: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let conflict = |upto: usize| CodecError::Properties {
        line,
        message: format!(
            "key '{}' is both a value and a table",
            segments[..upto].join(".")
        ),
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        if current.get(segment).is_none() {
            current.insert(*segment, Tree::empty_map());
        }
        current = match current.get_mut(segment) {
            Some(Tree::Map(child)) => child,
            _ => return Err(conflict(depth + 1)),
        };
    }

    if let Some(Tree::Map(_)) = current.get(last) {
        return Err(conflict(segments.len()));
    }
    current.insert(*last, Tree::String(value));
    Ok(())
}

fn write_node(node: &Tree, key: &str, out: &mut String) -> Result<()> {
    match node {
        Tree::Map(mapping) => {
            let entries = mapping
                .sorted_entries()
                .map_err(|k| CodecError::NonStringKey { key: k.describe() })?;
            for (child_key, child) in entries {
                let full = if key.is_empty() {
                    child_key.to_string()
                } else {
                    format!("{}.{}", key, child_key)
                };
                write_node(child, &full, out)?;
            }
        }
        leaf => {
            let value = match leaf {
                Tree::String(s) => s.clone(),
                Tree::Null => String::new(),
                Tree::Bool(b) => b.to_string(),
                Tree::Number(n) => n.to_string(),
                other => serde_json::to_string(other)?,
            };
            out.push_str(&escape(key, true));
            out.push_str(" = ");
            out.push_str(&escape(&value, false));
            out.push('\n');
        }
    }
    Ok(())
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let tree = parse("a=1\nb: 2\nc 3\nd = four five\n").unwrap();
        assert_eq!(tree.get("a"), Some(&Tree::from("1")));
        assert_eq!(tree.get("b"), Some(&Tree::from("2")));
        assert_eq!(tree.get("c"), Some(&Tree::from("3")));
        assert_eq!(tree.get("d"), Some(&Tree::from("four five")));
    }

    #[test]
    fn test_parse_nests_dotted_keys() {
        let tree = parse("db.host=localhost\ndb.port=5432\n").unwrap();
        assert_eq!(tree.get("db.host"), Some(&Tree::from("localhost")));
        assert_eq!(tree.get("db.port"), Some(&Tree::from("5432")));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let tree = parse("# comment\n! also comment\n\n   \nkey=value\n").unwrap();
        assert_eq!(tree.as_map().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let tree = parse("list = a, \\\n       b, \\\n       c\nnext = 1\n").unwrap();
        assert_eq!(tree.get("list"), Some(&Tree::from("a, b, c")));
        assert_eq!(tree.get("next"), Some(&Tree::from("1")));
    }

    #[test]
    fn test_parse_escapes() {
        let tree = parse("path = C:\\\\temp\nmsg = tab\\there\nuni = \\u00e9\nkey\\=with\\:sep = v\n")
            .unwrap();
        assert_eq!(tree.get("path"), Some(&Tree::from("C:\\temp")));
        assert_eq!(tree.get("msg"), Some(&Tree::from("tab\there")));
        assert_eq!(tree.get("uni"), Some(&Tree::from("é")));
        assert_eq!(tree.get("key=with:sep"), Some(&Tree::from("v")));
    }

    #[test]
    fn test_parse_value_table_conflict() {
        let err = parse("a = 1\na.b = 2\n").unwrap_err();
        match err {
            CodecError::Properties { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("'a'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(parse("a.b = 2\na = 1\n").is_err());
    }

    #[test]
    fn test_serialize_sorted_dotted_lines() {
        let tree = parse("z = last\ndb.port = 5432\ndb.host = localhost\n").unwrap();
        assert_eq!(
            serialize(&tree).unwrap(),
            "db.host = localhost\ndb.port = 5432\nz = last\n"
        );
    }

    #[test]
    fn test_serialize_escapes() {
        let tree = parse("msg = line\\nbreak\n").unwrap();
        assert_eq!(serialize(&tree).unwrap(), "msg = line\\nbreak\n");
    }

    #[test]
    fn test_serialize_non_string_leaves() {
        let tree = Tree::from(serde_json::json!({ "n": 1, "b": true, "l": [1, 2] }));
        assert_eq!(serialize(&tree).unwrap(), "b = true\nl = [1,2]\nn = 1\n");
    }

    #[test]
    fn test_empty_map_serializes_to_nothing() {
        assert_eq!(serialize(&Tree::empty_map()).unwrap(), "");
    }
}
