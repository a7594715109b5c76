use crate::error::InsiderError;
use crate::models::AnalysisJob;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Which job-creation envelope the upload endpoint returns.
///
/// Two incompatible shapes have been observed for the same endpoint: the
/// nested `sastCreated` envelope and a flat map of per-file upload results
/// keyed by filename. `Auto` probes the nested shape first and falls back to
/// the flat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitSchema {
    #[default]
    Auto,
    SastCreated,
    UploadMap,
}

#[derive(Deserialize)]
struct SastExecution {
    #[serde(rename = "sastCreated")]
    sast_created: AnalysisJob,
}

#[derive(Deserialize)]
struct UploadEntry {
    #[serde(rename = "ID", alias = "id")]
    id: UploadId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UploadId {
    Number(i64),
    Text(String),
}

impl UploadId {
    fn value(&self) -> Result<i64, InsiderError> {
        match self {
            UploadId::Number(id) => Ok(*id),
            UploadId::Text(raw) => raw.parse().map_err(|_| {
                InsiderError::MalformedSubmitResponse(format!("upload id is not numeric: {raw}"))
            }),
        }
    }
}

/// Decode the body of a successful submission into the canonical job shape.
pub fn decode_submit_response(
    body: &[u8],
    schema: SubmitSchema,
) -> Result<AnalysisJob, InsiderError> {
    match schema {
        SubmitSchema::SastCreated => decode_nested(body),
        SubmitSchema::UploadMap => decode_upload_map(body),
        SubmitSchema::Auto => decode_nested(body).or_else(|_| decode_upload_map(body)),
    }
}

fn decode_nested(body: &[u8]) -> Result<AnalysisJob, InsiderError> {
    let envelope: SastExecution = serde_json::from_slice(body)
        .map_err(|e| InsiderError::MalformedSubmitResponse(e.to_string()))?;
    Ok(envelope.sast_created)
}

/// Single-file uploads only: the first map entry carries the job id, and an
/// empty map is malformed. Multi-file responses are unsupported.
fn decode_upload_map(body: &[u8]) -> Result<AnalysisJob, InsiderError> {
    let entries: BTreeMap<String, UploadEntry> = serde_json::from_slice(body)
        .map_err(|e| InsiderError::MalformedSubmitResponse(e.to_string()))?;

    let entry = entries
        .into_values()
        .next()
        .ok_or_else(|| InsiderError::MalformedSubmitResponse("empty upload response".to_string()))?;

    Ok(AnalysisJob {
        id: entry.id.value()?,
        ..Default::default()
    })
}
