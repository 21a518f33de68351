use anyhow::{bail, Context, Result};
use search_core::{DocId, Document, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const STOP_WORDS_ENV: &str = "SEARCH_STOP_WORDS";

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Status(DocumentStatus),
    MinRating(i32),
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Debug, Serialize)]
pub struct IdsResponse {
    pub document_count: usize,
    pub ids: Vec<DocId>,
}

/// Stop-words from the command line, else from `SEARCH_STOP_WORDS`, else none.
pub fn resolve_stop_words(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var(STOP_WORDS_ENV).ok()).unwrap_or_default()
}

/// `.json` / `.jsonl` files under `input`, in file name order.
pub fn collect_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("{} is neither a file nor a directory", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let path = entry.with_context(|| format!("walking {}", input.display()))?.into_path();
        if path.is_file() && matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
            files.push(path);
        }
    }
    Ok(files)
}

pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let files = collect_files(input)?;
    let mut docs = Vec::new();
    for file in &files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(file, &mut docs)?;
        } else {
            read_json(file, &mut docs)?;
        }
    }
    tracing::info!(files = files.len(), documents = docs.len(), "loaded documents");
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}", file.display(), n + 1))?;
        if line.trim().is_empty() { continue; }
        let doc = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("decoding document in {}", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("decoding document in {}", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping non-document JSON"),
    }
    Ok(())
}

pub fn build_server(stop_words: &str, docs: &[InputDoc]) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(stop_words).context("building search server")?;
    for doc in docs {
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("adding document {}", doc.id))?;
    }
    tracing::info!(documents = server.document_count(), terms = server.index().len(), "index ready");
    Ok(server)
}

pub fn run_find(server: &SearchServer, query: &str, filter: Option<Filter>) -> Result<SearchResponse> {
    let start = Instant::now();
    let results = match filter {
        None => server.find_top_documents(query)?,
        Some(Filter::Status(status)) => server.find_top_documents_with_status(query, status)?,
        Some(Filter::MinRating(min)) => server.find_top_documents_by(query, |_, _, rating| rating >= min)?,
    };
    Ok(SearchResponse { query: query.to_string(), took_s: start.elapsed().as_secs_f64(), results })
}

pub fn run_match(server: &SearchServer, query: &str, id: DocId) -> Result<MatchResponse> {
    let (words, status) = server.match_document(query, id)?;
    Ok(MatchResponse { id, words, status })
}

pub fn run_ids(server: &SearchServer) -> Result<IdsResponse> {
    let document_count = server.document_count();
    let ids = (0..document_count as i64)
        .map(|i| server.document_id(i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IdsResponse { document_count, ids })
}
