use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{FmsError, Result};

/// Wall-clock limit on the credential check. Other calls rely on the
/// transport's own behavior.
const CREDENTIAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote scripting endpoint fronting the spreadsheet. The
/// application never owns the store; it issues one request per action and
/// re-derives all state from full-sheet snapshots.
pub struct LedgerClient {
    agent: ureq::Agent,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct FetchResponse {
    success: bool,
    #[serde(default)]
    data: Vec<Vec<Value>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The credential check returns a user object with at least a role string.
#[derive(Debug, Deserialize)]
pub struct RemoteUser {
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct CredentialResponse {
    success: bool,
    #[serde(default)]
    user: Option<RemoteUser>,
    #[serde(default)]
    error: Option<String>,
}

impl LedgerClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a full snapshot of the named sheet as a 2-D array of cell text.
    /// Row 0 is the first physical row; the header block is the caller's
    /// concern.
    pub fn fetch_sheet(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let body = self
            .agent
            .get(&self.endpoint)
            .query("action", "fetchSheet")
            .query("sheet", sheet)
            .call()?
            .into_string()?;
        let parsed: FetchResponse = serde_json::from_str(strip_callback(&body))?;
        if !parsed.success {
            return Err(remote_error(parsed.error));
        }
        Ok(parsed
            .data
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    /// Append one full row in the fixed column layout. The backend answers
    /// opaquely, so only transport failures are observable; success is
    /// assumed once the request is delivered.
    pub fn append_row(&self, sheet: &str, values: &[String]) -> Result<()> {
        let _ = self.agent.post(&self.endpoint).send_json(json!({
            "action": "writeData",
            "sheet": sheet,
            "values": values,
        }))?;
        Ok(())
    }

    /// Sparse update of one row addressed by its 1-based physical row
    /// number. Only the named fields are overwritten.
    pub fn update_payment(&self, sheet: &str, row: u32, fields: &[(&str, String)]) -> Result<()> {
        let field_map: serde_json::Map<String, Value> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();
        let body = self
            .agent
            .post(&self.endpoint)
            .send_json(json!({
                "action": "updatePayment",
                "sheet": sheet,
                "row": row,
                "fields": field_map,
            }))?
            .into_string()?;
        check_update(&body)
    }

    /// Stamp the tally-processed date on one row.
    pub fn update_tally_entry(&self, sheet: &str, row: u32, date: &str) -> Result<()> {
        let body = self
            .agent
            .post(&self.endpoint)
            .send_json(json!({
                "action": "updateTallyEntry",
                "sheet": sheet,
                "row": row,
                "tallyDate": date,
            }))?
            .into_string()?;
        check_update(&body)
    }

    /// Upload a file as base64 and return its public URL.
    pub fn upload_file(&self, path: &Path, folder: &str) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());
        let body = self
            .agent
            .post(&self.endpoint)
            .send_json(json!({
                "action": "uploadFile",
                "filename": filename,
                "mimeType": mime_for(&filename),
                "folder": folder,
                "data": STANDARD.encode(&bytes),
            }))?
            .into_string()?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;
        if !parsed.success {
            return Err(remote_error(parsed.error));
        }
        parsed
            .url
            .ok_or_else(|| FmsError::Remote("upload succeeded but no URL was returned".to_string()))
    }

    /// Check a credential pair. This is the only call with an explicit
    /// wall-clock timeout.
    pub fn check_credentials(&self, identifier: &str, secret: &str) -> Result<RemoteUser> {
        let body = self
            .agent
            .post(&self.endpoint)
            .timeout(CREDENTIAL_TIMEOUT)
            .send_json(json!({
                "action": "checkCredentials",
                "identifier": identifier,
                "secret": secret,
            }))?
            .into_string()?;
        let parsed: CredentialResponse = serde_json::from_str(&body)?;
        if !parsed.success {
            return Err(FmsError::Auth(
                parsed.error.unwrap_or_else(|| "invalid credentials".to_string()),
            ));
        }
        parsed
            .user
            .ok_or_else(|| FmsError::Auth("credential check returned no user".to_string()))
    }
}

fn check_update(body: &str) -> Result<()> {
    let parsed: UpdateResponse = serde_json::from_str(body)?;
    if !parsed.success {
        return Err(remote_error(parsed.error));
    }
    Ok(())
}

fn remote_error(reason: Option<String>) -> FmsError {
    FmsError::Remote(reason.unwrap_or_else(|| "no reason given".to_string()))
}

/// Some read paths still wrap the response body in a bracketed callback
/// (`name({...});`), a legacy cross-origin workaround. Strip the wrapping
/// when present; anything else passes through untouched.
pub fn strip_callback(body: &str) -> &str {
    let trimmed = body.trim().trim_end_matches(';').trim_end();
    let open = match trimmed.find('(') {
        Some(i) => i,
        None => return body,
    };
    let name = &trimmed[..open];
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
    {
        return body;
    }
    match trimmed.strip_suffix(')') {
        Some(inner) => &inner[open + 1..],
        None => body,
    }
}

/// Render one JSON cell as text. The sheet hands back a mix of strings,
/// numbers and nulls; views only ever see text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            Some(f) => format!("{f}"),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn mime_for(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_callback_unwraps_legacy_bodies() {
        assert_eq!(
            strip_callback("handleData({\"success\":true});"),
            "{\"success\":true}"
        );
        assert_eq!(strip_callback("cb([1,2,3])"), "[1,2,3]");
    }

    #[test]
    fn test_strip_callback_passes_plain_json_through() {
        assert_eq!(strip_callback("{\"success\":true}"), "{\"success\":true}");
        assert_eq!(strip_callback("[\"a\",\"b\"]"), "[\"a\",\"b\"]");
        assert_eq!(strip_callback(""), "");
    }

    #[test]
    fn test_strip_callback_ignores_parens_inside_json() {
        // The leading segment is not a bare identifier, so no stripping.
        let body = "{\"note\":\"(see above)\"}";
        assert_eq!(strip_callback(body), body);
    }

    #[test]
    fn test_cell_text_normalizes_cell_values() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&serde_json::json!("REQ-001")), "REQ-001");
        assert_eq!(cell_text(&serde_json::json!(50000)), "50000");
        assert_eq!(cell_text(&serde_json::json!(1234.5)), "1234.5");
        assert_eq!(cell_text(&serde_json::json!(true)), "true");
    }

    #[test]
    fn test_mime_for_common_extensions() {
        assert_eq!(mime_for("invoice.pdf"), "application/pdf");
        assert_eq!(mime_for("scan.JPG"), "image/jpeg");
        assert_eq!(mime_for("proof"), "application/octet-stream");
    }
}
