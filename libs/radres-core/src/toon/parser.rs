//! Line grammar parser for TOON documents.
//!
//! # Format
//! ```text
//! metadata:
//!   version: 1.0.0
//!
//! summary: |
//!   Free text joined
//!   into one line.
//!
//! cards[2]{id,category,front,back}:
//!   card_001,neuro,"Sign of X?","Answer, with comma"
//!   card_002,chest,Question,Answer
//! ```
//!
//! Parsing never fails: lines that fit no rule are skipped. Array items may
//! also arrive as `key: value` lines (one field per line), in which case a
//! record boundary is guessed from the key names.

use super::coerce::coerce;
use super::value::{Document, Mapping, Record, Scalar, Value};

/// Parse a TOON document.
pub fn parse(content: &str) -> Document {
    let mut parser = Parser::new();
    for line in content.lines() {
        parser.process_line(line);
    }
    parser.doc
}

/// Column layout declared by an array header.
struct ArraySchema {
    name: String,
    fields: Vec<String>,
}

struct ArrayHeader<'a> {
    name: &'a str,
    fields: Vec<String>,
}

/// Scan state for a single `parse` call.
struct Parser {
    doc: Document,
    section: Option<String>,
    schema: Option<ArraySchema>,
    /// Index of the record receiving `key: value` item lines.
    open_record: Option<usize>,
}

impl Parser {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            section: None,
            schema: None,
            open_record: None,
        }
    }

    fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        if let Some(header) = parse_array_header(trimmed) {
            self.open_array(header);
            return;
        }

        if is_fence_artifact(trimmed) {
            return;
        }

        if self.schema.is_some() {
            if !self.ends_array(line, trimmed) {
                self.handle_array_line(trimmed);
                return;
            }
            self.schema = None;
            self.open_record = None;
            self.section = None;
        }

        match trimmed.split_once(':') {
            Some((key, value)) => self.handle_key_value(key.trim(), value.trim()),
            None => self.handle_text(trimmed),
        }
    }

    fn open_array(&mut self, header: ArrayHeader<'_>) {
        let restated = matches!(
            (&self.schema, &self.section),
            (Some(schema), Some(section)) if schema.name == header.name && section == header.name
        );
        if restated {
            return;
        }

        if self.doc.records(header.name).is_none() {
            self.doc.insert(header.name, Vec::<Record>::new());
        }
        self.schema = Some(ArraySchema {
            name: header.name.to_string(),
            fields: header.fields,
        });
        self.section = Some(header.name.to_string());
        self.open_record = None;
    }

    /// A key-value line leaves the array when it opens a new section, or when
    /// it sits at column zero under a key the schema does not declare.
    fn ends_array(&self, line: &str, trimmed: &str) -> bool {
        let Some(schema) = &self.schema else {
            return false;
        };
        let Some((key, value)) = trimmed.split_once(':') else {
            return false;
        };
        let key = key.trim();
        if !is_key_shaped(key) || key == schema.name {
            return false;
        }

        let value = value.trim();
        if value.is_empty() || value == "|" {
            return true;
        }

        let unindented = !line.starts_with(char::is_whitespace);
        let normalized = normalize_key(key);
        unindented
            && !schema
                .fields
                .iter()
                .any(|field| field.to_lowercase() == normalized)
    }

    fn handle_array_line(&mut self, trimmed: &str) {
        let Some(schema) = &self.schema else {
            return;
        };
        let Some(Value::RecordList(records)) = self.doc.get_mut(&schema.name) else {
            return;
        };

        if let Some((key, value)) = split_kv_record(trimmed) {
            let boundary = is_boundary_key(&key.to_lowercase());
            let key = normalize_key(key);
            let index = match self.open_record {
                Some(index) if !(boundary && records[index].len() > 2) => index,
                _ => {
                    records.push(Record::new());
                    records.len() - 1
                }
            };
            records[index].insert(key, coerce(value));
            self.open_record = Some(index);
            return;
        }

        // Colon-free lines inside an open KV record are wrapped text; drop
        // them rather than closing the record.
        if self.open_record.is_some() && !trimmed.contains(':') {
            return;
        }
        self.open_record = None;

        let record: Record = schema
            .fields
            .iter()
            .zip(split_csv_line(trimmed))
            .map(|(field, value)| (field.clone(), coerce(&value)))
            .collect();
        records.push(record);
    }

    fn handle_key_value(&mut self, key: &str, value: &str) {
        if value.is_empty() || value == "|" {
            let initial = if value == "|" {
                Value::Scalar(Scalar::String(String::new()))
            } else {
                Value::Mapping(Mapping::new())
            };
            self.doc.insert(key, initial);
            self.section = Some(key.to_string());
            return;
        }

        if let Some(section) = self.section.as_deref() {
            if let Some(Value::Mapping(mapping)) = self.doc.get_mut(section) {
                mapping.insert(key.to_string(), Value::Scalar(coerce(value)));
                return;
            }
        }

        self.section = None;
        self.doc.insert(key, coerce(value));
    }

    fn handle_text(&mut self, trimmed: &str) {
        let Some(section) = self.section.as_deref() else {
            return;
        };
        let Some(value) = self.doc.get_mut(section) else {
            return;
        };

        // An empty mapping is still undecided; plain text settles it as a block.
        let pending = matches!(value, Value::Mapping(mapping) if mapping.is_empty());
        if pending {
            *value = Value::Scalar(Scalar::String(trimmed.to_string()));
            return;
        }

        if let Value::Scalar(Scalar::String(text)) = value {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(trimmed);
        }
    }
}

/// `name[count]{field,...}:` with optional whitespace between parts.
fn parse_array_header(trimmed: &str) -> Option<ArrayHeader<'_>> {
    let open = trimmed.find('[')?;
    let name = trimmed[..open].trim_end();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }

    let rest = &trimmed[open + 1..];
    let close = rest.find(']')?;
    if !rest[..close].trim().chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let rest = rest[close + 1..].trim_start().strip_prefix('{')?;
    let close = rest.find('}')?;
    let tail = rest[close + 1..].trim();
    if !(tail.is_empty() || tail == ":") {
        return None;
    }

    let fields = rest[..close].trim();
    let fields = if fields.is_empty() {
        Vec::new()
    } else {
        fields.split(',').map(|f| f.trim().to_string()).collect()
    };

    Some(ArrayHeader { name, fields })
}

/// Leftovers from generated output wrapped in fenced code blocks.
fn is_fence_artifact(trimmed: &str) -> bool {
    trimmed == "json" || trimmed == "toon" || trimmed.starts_with("```")
}

/// `key: value` item line; the value must be non-empty.
fn split_kv_record(trimmed: &str) -> Option<(&str, &str)> {
    let (key, value) = trimmed.split_once(':')?;
    let key = key.trim_end();
    let value = value.trim();
    if value.is_empty() || !is_key_shaped(key) {
        return None;
    }
    Some((key, value))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_key_shaped(key: &str) -> bool {
    key.chars().next().is_some_and(is_ident_char) && key.chars().all(|c| is_ident_char(c) || c == ' ')
}

/// Lowercase, whitespace runs collapsed to `_`.
fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Heuristic start of a new KV record.
fn is_boundary_key(key: &str) -> bool {
    key == "id" || key.contains("id_") || key == "title"
}

/// Split a CSV line, honoring double quotes and `""` escapes.
pub(crate) fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    values.push(current.trim().to_string());
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, Scalar)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn parse_csv_array() {
        let input = "\
categories[3]{id,name,color}:
  neuro,Neuroradiology,#3498db
  chest,Chest Imaging,#e74c3c
  msk,Musculoskeletal,#2ecc71
";
        let doc = parse(input);
        let records = doc.records("categories").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[1],
            record(&[
                ("id", Scalar::from("chest")),
                ("name", Scalar::from("Chest Imaging")),
                ("color", Scalar::from("#e74c3c")),
            ])
        );
    }

    #[test]
    fn parse_quoted_csv_fields() {
        let doc = parse("rows[1]{a,b,c}:\n  \"a,b\",c,3");
        assert_eq!(
            doc.records("rows").unwrap()[0],
            record(&[
                ("a", Scalar::from("a,b")),
                ("b", Scalar::from("c")),
                ("c", Scalar::Number(3.0)),
            ])
        );
    }

    #[test]
    fn doubled_quote_is_literal() {
        let values = split_csv_line(r#""He said ""hi""",plain,"""""#);
        assert_eq!(values, vec!["He said \"hi\"", "plain", "\""]);
    }

    #[test]
    fn short_and_long_rows_are_tolerated() {
        let doc = parse("rows[]{a,b,c}:\n  1,2\n  1,2,3,4");
        let records = doc.records("rows").unwrap();
        assert_eq!(
            records[0],
            record(&[("a", Scalar::Number(1.0)), ("b", Scalar::Number(2.0))])
        );
        assert_eq!(records[1].len(), 3);
        assert!(!records[1].contains_key("d"));
    }

    #[test]
    fn declared_count_is_advisory() {
        let doc = parse("cards[5]{id}:\n  a\n  b");
        assert_eq!(doc.records("cards").unwrap().len(), 2);
    }

    #[test]
    fn header_whitespace_tolerated() {
        let doc = parse("cards [ 2 ] { id , front }:\n  c1,Q");
        assert_eq!(
            doc.records("cards").unwrap()[0],
            record(&[("id", Scalar::from("c1")), ("front", Scalar::from("Q"))])
        );
    }

    #[test]
    fn restated_header_keeps_accumulating() {
        let input = "\
cards[1]{id,front}:
  c1,First

# Added on 2025-01-02
cards[1]{id,front}:
  c2,Second
";
        let doc = parse(input);
        let ids: Vec<_> = doc
            .records("cards")
            .unwrap()
            .iter()
            .map(|r| r["id"].to_string())
            .collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn reopened_list_appends_to_existing_records() {
        let input = "\
cards[1]{id}:
  c1
other[1]{x}:
  1
cards[1]{id}:
  c2
";
        let doc = parse(input);
        assert_eq!(doc.records("cards").unwrap().len(), 2);
        assert_eq!(doc.records("other").unwrap().len(), 1);
    }

    #[test]
    fn fence_artifacts_are_skipped() {
        let input = "```toon\ntoon\ncards[1]{id}:\n  c1\n```\njson";
        let doc = parse(input);
        assert_eq!(doc.records("cards").unwrap().len(), 1);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn kv_records_split_on_boundary_keys() {
        let input = "\
top_stories[2]{title,source,url,importance}:
  title: First story
  source: RSNA
  url: https://example.com/a
  importance: 90
  title: Second story
  source: ACR
  url: https://example.com/b
";
        let doc = parse(input);
        let records = doc.records("top_stories").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["url"], Scalar::from("https://example.com/a"));
        assert_eq!(records[0]["importance"], Scalar::Number(90.0));
        assert_eq!(records[1]["title"], Scalar::from("Second story"));
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn boundary_needs_more_than_two_fields() {
        // Two fields so far: `id` does not start a new record.
        let input = "articles[]{id,title}:\n  id: a1\n  title: T\n  id: a2";
        let doc = parse(input);
        let records = doc.records("articles").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], Scalar::from("a2"));
    }

    #[test]
    fn id_prefixed_keys_are_boundaries() {
        let input = "articles[]{card_id_x,a,b}:\n  card_id_x: 1\n  a: 2\n  b: 3\n  card_id_x: 4";
        let doc = parse(input);
        assert_eq!(doc.records("articles").unwrap().len(), 2);
    }

    #[test]
    fn boundary_keys_match_before_normalization() {
        let input = "articles[]{a,b,c}:\n  a: 1\n  b: 2\n  c: 3\n  ID X: 4\n  ID: 5";
        let doc = parse(input);
        let records = doc.records("articles").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id_x"], Scalar::Number(4.0));
        assert_eq!(records[1], record(&[("id", Scalar::Number(5.0))]));
    }

    #[test]
    fn kv_keys_are_normalized() {
        let input = "stories[]{ai_summary}:\n  AI  Summary: text here";
        let doc = parse(input);
        assert_eq!(
            doc.records("stories").unwrap()[0],
            record(&[("ai_summary", Scalar::from("text here"))])
        );
    }

    #[test]
    fn colon_free_line_inside_kv_record_is_ignored() {
        let input = "\
stories[]{title,body}:
  title: One
  body: Start of text
  wrapped continuation
  title: Two
";
        let doc = parse(input);
        let records = doc.records("stories").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], Scalar::from("Two"));
        assert_eq!(records[0]["body"], Scalar::from("Start of text"));
    }

    #[test]
    fn csv_line_with_colon_closes_kv_record() {
        let input = "\
stories[]{title,source,url}:
  title: One
  Two,ACR,https://example.com
";
        let doc = parse(input);
        let records = doc.records("stories").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["url"], Scalar::from("https://example.com"));
    }

    #[test]
    fn heterogeneous_records_are_kept() {
        let input = "rows[]{a,b}:\n  1,2\n  x: 5\n  y: 6";
        let doc = parse(input);
        let records = doc.records("rows").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            record(&[("x", Scalar::Number(5.0)), ("y", Scalar::Number(6.0))])
        );
    }

    #[test]
    fn section_opener_ends_array() {
        let input = "\
articles[]{id,title}:
  a1,First
digest:
  date: 2025-01-01
";
        let doc = parse(input);
        assert_eq!(doc.records("articles").unwrap().len(), 1);
        assert_eq!(
            doc.mapping("digest").unwrap()["date"],
            Value::Scalar(Scalar::from("2025-01-01"))
        );
    }

    #[test]
    fn unindented_undeclared_key_ends_array() {
        let input = "rows[]{a}:\n  1\nversion: 2\n  stray";
        let doc = parse(input);
        assert_eq!(doc.records("rows").unwrap().len(), 1);
        assert_eq!(doc.get("version"), Some(&Value::Scalar(Scalar::Number(2.0))));
    }

    #[test]
    fn unindented_declared_key_stays_in_array() {
        let input = "stories[]{title,source}:\ntitle: One\nsource: RSNA";
        let doc = parse(input);
        assert_eq!(
            doc.records("stories").unwrap()[0],
            record(&[("title", Scalar::from("One")), ("source", Scalar::from("RSNA"))])
        );
    }

    #[test]
    fn nested_mapping_and_top_level_scalars() {
        let input = "\
digest:
  date: 2025-01-01
  total_articles: 12
  ok: TRUE
";
        let doc = parse(input);
        let digest = doc.mapping("digest").unwrap();
        assert_eq!(digest.len(), 3);
        assert_eq!(digest["total_articles"], Value::Scalar(Scalar::Number(12.0)));
        assert_eq!(digest["ok"], Value::Scalar(Scalar::Bool(true)));
    }

    #[test]
    fn scalar_after_non_mapping_section_is_top_level() {
        let doc = parse("name: radres\nversion: 1");
        assert_eq!(doc.text("name"), Some("radres"));
        assert_eq!(doc.get("version"), Some(&Value::Scalar(Scalar::Number(1.0))));
    }

    #[test]
    fn empty_section_followed_by_text_becomes_block() {
        let input = "summary:\n  First sentence.\n  Second sentence.";
        let doc = parse(input);
        assert_eq!(doc.text("summary"), Some("First sentence. Second sentence."));
    }

    #[test]
    fn pipe_forces_text_block() {
        let input = "summary: |\n  line one\n\n  line two";
        let doc = parse(input);
        assert_eq!(doc.text("summary"), Some("line one line two"));
    }

    #[test]
    fn text_after_filled_mapping_is_ignored() {
        let input = "digest:\n  date: 2025-01-01\n  stray words";
        let doc = parse(input);
        assert_eq!(doc.mapping("digest").unwrap().len(), 1);
    }

    #[test]
    fn empty_section_stays_empty_mapping() {
        let doc = parse("metadata:");
        assert_eq!(doc.mapping("metadata").map(|m| m.len()), Some(0));
    }

    #[test]
    fn empty_brace_header_yields_empty_list() {
        let doc = parse("cards[0]{}:");
        assert_eq!(doc.records("cards").map(|r| r.len()), Some(0));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let input = "just words\n[broken{header\n: no key\ncards[x]{id}:";
        let doc = parse(input);
        assert_eq!(doc.get("cards"), None);
        assert_eq!(doc.text(""), Some("no key"));
    }

    #[test]
    fn parses_are_independent() {
        let first = parse("rows[]{a,b,c}:\n  a: 1");
        let second = parse("rows[]{a,b,c}:\n  b: 2");
        assert_eq!(first.records("rows").unwrap()[0].len(), 1);
        assert_eq!(second.records("rows").unwrap()[0].len(), 1);
        assert!(second.records("rows").unwrap()[0].contains_key("b"));
    }

    #[test]
    fn parse_digest_document() {
        let input = "\
digest:
  date: 2025-03-01
  curator_model: some/model
  total_articles: 2

summary:
  AI triage tools gained ground.
  New contrast guidance was released.

top_stories[1]{title,source,url,category,importance,ai_summary}:
  Contrast update,ACR,https://acr.org/x,abdomen,95,\"Changes practice, notably.\"

articles[]{id,title,source,category,relevance_score}:
  id_1,Contrast update,ACR,abdomen,95
  id_2,Stroke imaging,RSNA,neuro,80
";
        let doc = parse(input);
        assert_eq!(doc.mapping("digest").unwrap().len(), 3);
        assert_eq!(
            doc.text("summary"),
            Some("AI triage tools gained ground. New contrast guidance was released.")
        );
        let top = doc.records("top_stories").unwrap();
        assert_eq!(top[0]["ai_summary"], Scalar::from("Changes practice, notably."));
        assert_eq!(top[0]["importance"], Scalar::Number(95.0));
        assert_eq!(doc.records("articles").unwrap().len(), 2);
    }
}
