use serde::{Deserialize, Serialize};

use crate::utils::format_file_size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Document {
    pub id: String,
    pub client_id: String,
    pub case_id: Option<String>,
    /// Stored name under `/uploads`
    pub filename: String,
    pub original_filename: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub file_size: u64,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub uploaded_at: Option<String>,
}

impl Document {
    pub fn size_display(&self) -> String {
        format_file_size(self.file_size)
    }

    pub fn category_display(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => "Sin categoría",
        }
    }
}

/// Body returned by `POST /documents/upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    pub document: Document,
    /// Path relative to the backend origin, e.g. `/uploads/<uuid>.pdf`
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_response() {
        let json = r#"{
            "message": "Document uploaded successfully",
            "document": {
                "id": "d-1",
                "client_id": "c-1",
                "case_id": null,
                "filename": "5f0c.pdf",
                "original_filename": "contrato.pdf",
                "file_path": "/app/backend/uploads/5f0c.pdf",
                "file_size": 2048,
                "content_type": "application/pdf",
                "description": "Contrato firmado",
                "category": "",
                "uploaded_at": "2025-06-01T10:00:00+00:00"
            },
            "file_url": "/uploads/5f0c.pdf"
        }"#;

        let resp: UploadResponse = serde_json::from_str(json).expect("Failed to parse upload response");
        assert_eq!(resp.file_url, "/uploads/5f0c.pdf");
        assert_eq!(resp.document.size_display(), "2 KB");
        assert_eq!(resp.document.category_display(), "Sin categoría");
    }
}
