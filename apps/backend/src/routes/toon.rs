//! TOON conversion endpoints

use axum::Json;
use radres_core::toon::{parse, strip_code_fence, stringify, Document};

/// POST /api/toon/parse
///
/// Accepts raw (possibly fenced) TOON text and returns the document as JSON.
pub async fn parse_document(body: String) -> Json<Document> {
    Json(parse(strip_code_fence(&body)))
}

/// POST /api/toon/stringify
pub async fn stringify_document(Json(doc): Json<Document>) -> String {
    stringify(&doc)
}
