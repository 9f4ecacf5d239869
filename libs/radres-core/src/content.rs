//! Typed views over parsed documents: card batches, feed configuration and
//! curated digests.

use crate::error::{DocumentError, Result};
use crate::toon::{Document, Mapping, Record, Scalar, Value};
use crate::types::CardContent;
use serde::Serialize;

pub const CARDS_SECTION: &str = "cards";
pub const RSS_SOURCES_SECTION: &str = "rss_sources";

/// Canonical column order of a card batch.
pub const CARD_FIELDS: [&str; 7] = [
    "id",
    "category",
    "difficulty",
    "front",
    "back",
    "source",
    "tags",
];

/// Field rendered as text; missing and null read as empty.
fn text_field(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Scalar::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

fn required_field(record: &Record, section: &str, index: usize, field: &str) -> Result<String> {
    let value = text_field(record, field);
    if value.is_empty() {
        return Err(DocumentError::MissingField {
            section: section.to_string(),
            index,
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn number_field(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(Scalar::as_f64)
}

fn section_records<'a>(doc: &'a Document, section: &str) -> Result<&'a [Record]> {
    doc.records(section)
        .ok_or_else(|| DocumentError::MissingSection(section.to_string()))
}

impl CardContent {
    /// Read a card from a `cards` record. Only `id` is required.
    pub fn from_record(record: &Record, index: usize) -> Result<Self> {
        Ok(Self {
            id: required_field(record, CARDS_SECTION, index, "id")?,
            category: text_field(record, "category"),
            difficulty: text_field(record, "difficulty"),
            front: text_field(record, "front"),
            back: text_field(record, "back"),
            source: text_field(record, "source"),
            tags: text_field(record, "tags"),
        })
    }

    /// Record in canonical column order.
    pub fn to_record(&self) -> Record {
        let values = [
            &self.id,
            &self.category,
            &self.difficulty,
            &self.front,
            &self.back,
            &self.source,
            &self.tags,
        ];
        CARD_FIELDS
            .iter()
            .zip(values)
            .map(|(field, value)| (field.to_string(), Scalar::from(value.as_str())))
            .collect()
    }
}

/// Cards of a batch document. Records without an id are skipped.
pub fn cards_from_document(doc: &Document) -> Result<Vec<CardContent>> {
    let records = section_records(doc, CARDS_SECTION)?;
    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| CardContent::from_record(record, index).ok())
        .collect())
}

pub fn cards_to_document(cards: &[CardContent]) -> Document {
    let mut doc = Document::new();
    doc.insert(
        CARDS_SECTION,
        cards.iter().map(CardContent::to_record).collect::<Vec<_>>(),
    );
    doc
}

/// A news feed listed in the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RssSource {
    pub name: String,
    pub url: String,
    pub category: String,
}

impl RssSource {
    pub fn from_record(record: &Record, index: usize) -> Result<Self> {
        Ok(Self {
            name: required_field(record, RSS_SOURCES_SECTION, index, "name")?,
            url: required_field(record, RSS_SOURCES_SECTION, index, "url")?,
            category: text_field(record, "category"),
        })
    }
}

/// Feed sources of a configuration document; every listed source must carry
/// a name and url.
pub fn rss_sources_from_document(doc: &Document) -> Result<Vec<RssSource>> {
    section_records(doc, RSS_SOURCES_SECTION)?
        .iter()
        .enumerate()
        .map(|(index, record)| RssSource::from_record(record, index))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    pub title: String,
    pub source: String,
    pub url: String,
    pub category: String,
    pub importance: Option<f64>,
    pub ai_summary: String,
}

impl From<&Record> for Story {
    fn from(record: &Record) -> Self {
        Self {
            title: text_field(record, "title"),
            source: text_field(record, "source"),
            url: text_field(record, "url"),
            category: text_field(record, "category"),
            importance: number_field(record, "importance"),
            ai_summary: text_field(record, "ai_summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source: String,
    pub category: String,
    pub relevance_score: Option<f64>,
}

impl From<&Record> for Article {
    fn from(record: &Record) -> Self {
        Self {
            id: text_field(record, "id"),
            title: text_field(record, "title"),
            source: text_field(record, "source"),
            category: text_field(record, "category"),
            relevance_score: number_field(record, "relevance_score"),
        }
    }
}

/// Daily curated digest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Digest {
    pub date: String,
    pub generated_at: String,
    pub curator_model: String,
    pub total_articles: Option<f64>,
    pub summary: String,
    pub top_stories: Vec<Story>,
    pub articles: Vec<Article>,
}

impl Digest {
    /// Requires the `digest` mapping; every other part is optional.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let meta = doc
            .mapping("digest")
            .ok_or_else(|| DocumentError::MissingSection("digest".to_string()))?;

        let meta_text = |key: &str| -> String {
            meta_scalar(meta, key)
                .filter(|value| !value.is_null())
                .map(Scalar::to_string)
                .unwrap_or_default()
        };

        Ok(Self {
            date: meta_text("date"),
            generated_at: meta_text("generated_at"),
            curator_model: meta_text("curator_model"),
            total_articles: meta_scalar(meta, "total_articles").and_then(Scalar::as_f64),
            summary: doc.text("summary").unwrap_or_default().to_string(),
            top_stories: doc
                .records("top_stories")
                .unwrap_or_default()
                .iter()
                .map(Story::from)
                .collect(),
            articles: doc
                .records("articles")
                .unwrap_or_default()
                .iter()
                .map(Article::from)
                .collect(),
        })
    }
}

fn meta_scalar<'a>(meta: &'a Mapping, key: &str) -> Option<&'a Scalar> {
    meta.get(key).and_then(Value::as_scalar)
}
