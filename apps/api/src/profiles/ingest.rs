use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::profiles::repository::ProfileStore;
use crate::screening::candidate::{
    CandidateRecord, ATTR_EDUCATION, ATTR_LOCATION, ATTR_ROLE, ATTR_SKILLS, ATTR_YEARS_EXPERIENCE,
};

/// A spreadsheet-style value: recruiters' exports carry years as numbers or text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

/// One structured profile row as submitted for ingestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub years_experience: Option<FieldValue>,
    pub achievements: Option<String>,
    pub education: Option<String>,
    pub certifications: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub profiles: Vec<ProfileInput>,
    /// Clear the stored collection before loading.
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Serialize)]
pub struct IngestFailure {
    pub position: usize,
    pub name: Option<String>,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedProfile {
    pub identifier: String,
    pub display_name: Option<String>,
}

/// An uploaded file, read out of the multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub processed: usize,
    pub profiles: Vec<UploadedProfile>,
    pub failures: Vec<IngestFailure>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub processed: usize,
    pub removed: u64,
    pub identifiers: Vec<String>,
    pub failures: Vec<IngestFailure>,
}

/// Loads a batch of structured profiles. A failing row is reported and skipped.
pub async fn ingest_profiles(
    store: &dyn ProfileStore,
    request: IngestRequest,
) -> Result<IngestResponse, AppError> {
    let removed = if request.replace {
        let removed = store.clear().await?;
        info!(removed, "Cleared existing candidate profiles");
        removed
    } else {
        0
    };

    let mut identifiers = Vec::new();
    let mut failures = Vec::new();

    for (position, input) in request.profiles.into_iter().enumerate() {
        let name = input.name.clone();
        let record = match build_record(input) {
            Some(record) => record,
            None => {
                failures.push(IngestFailure {
                    position,
                    name,
                    error: "profile has no populated fields".to_string(),
                });
                continue;
            }
        };

        match store.upsert(&record).await {
            Ok(_) => identifiers.push(record.identifier),
            Err(e) => {
                warn!(position, error = %e, "Failed to store candidate profile");
                failures.push(IngestFailure {
                    position,
                    name,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        processed = identifiers.len(),
        failed = failures.len(),
        "Candidate profiles ingested"
    );

    Ok(IngestResponse {
        processed: identifiers.len(),
        removed,
        identifiers,
        failures,
    })
}

/// Builds the stored record for one profile row.
/// Returns `None` when the row carries no data at all.
pub fn build_record(input: ProfileInput) -> Option<CandidateRecord> {
    let name = non_blank(input.name);
    let fields: [(&str, &str, Option<String>); 7] = [
        (ATTR_ROLE, "Role", non_blank(input.role)),
        (ATTR_LOCATION, "Location", non_blank(input.location)),
        (ATTR_SKILLS, "Skills", non_blank(input.skills)),
        (
            ATTR_YEARS_EXPERIENCE,
            "Years of Experience",
            non_blank(input.years_experience.map(FieldValue::into_text)),
        ),
        ("achievements", "Achievements", non_blank(input.achievements)),
        (ATTR_EDUCATION, "Education", non_blank(input.education)),
        ("certifications", "Certifications", non_blank(input.certifications)),
    ];

    if name.is_none() && fields.iter().all(|(_, _, v)| v.is_none()) {
        return None;
    }

    let slug = name
        .as_deref()
        .map(|n| n.to_lowercase().replace(' ', "_"))
        .unwrap_or_else(|| "unnamed".to_string());
    let mut record = CandidateRecord::new(format!("profile_{slug}_{}", short_id()));

    let mut lines = Vec::new();
    if let Some(name) = &name {
        lines.push(format!("Name: {name}"));
    }
    for (key, label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{label}: {value}"));
            record.attributes.insert(key.to_string(), value);
        }
    }

    record.display_name = name;
    record.raw_text = lines.join("\n");
    Some(record)
}

/// Builds a record from an uploaded résumé. Only the file name and the extracted
/// text are known; no structured attributes are guessed.
pub fn record_from_pdf(file_name: &str, text: &str) -> Result<CandidateRecord, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "'{file_name}' contains no extractable text"
        )));
    }

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("resume");
    let identifier = format!("pdf_{}_{}", file_name.replace(' ', "_"), short_id());

    let mut record = CandidateRecord::new(identifier).with_name(stem);
    record.raw_text = text.to_string();
    Ok(record)
}

/// Stores uploaded résumés one by one. A file that cannot be read or stored
/// is reported and skipped.
pub async fn ingest_uploads(store: &dyn ProfileStore, files: Vec<UploadedFile>) -> UploadResponse {
    let mut profiles = Vec::new();
    let mut failures = Vec::new();

    for (position, file) in files.into_iter().enumerate() {
        let file_name = file.file_name.clone();
        match store_upload(store, file).await {
            Ok(record) => {
                info!(identifier = %record.identifier, "Stored uploaded résumé");
                profiles.push(UploadedProfile {
                    identifier: record.identifier,
                    display_name: record.display_name,
                });
            }
            Err(e) => {
                warn!(position, file = %file_name, error = %e, "Failed to ingest uploaded résumé");
                failures.push(IngestFailure {
                    position,
                    name: Some(file_name),
                    error: e.to_string(),
                });
            }
        }
    }

    UploadResponse {
        processed: profiles.len(),
        profiles,
        failures,
    }
}

async fn store_upload(
    store: &dyn ProfileStore,
    file: UploadedFile,
) -> Result<CandidateRecord, AppError> {
    let text = extract_upload_text(file.file_name.clone(), file.bytes).await?;
    let record = record_from_pdf(&file.file_name, &text)?;
    store.upsert(&record).await?;
    Ok(record)
}

/// Plain-text résumés (`.txt`) are read as UTF-8; everything else goes through the PDF extractor.
pub async fn extract_upload_text(file_name: String, bytes: Vec<u8>) -> Result<String, AppError> {
    let is_text = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    if is_text {
        return String::from_utf8(bytes).map_err(|_| {
            AppError::UnprocessableEntity(format!("'{file_name}' is not valid UTF-8 text"))
        });
    }
    extract_pdf_text(file_name, bytes).await
}

/// Extracts text from PDF bytes on the blocking pool.
pub async fn extract_pdf_text(file_name: String, bytes: Vec<u8>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AppError::UnprocessableEntity(format!("could not read '{file_name}' as PDF: {e}"))
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
}

/// First eight hex digits of a fresh v4 uuid.
fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
