use std::fs;
use std::io;
use std::path::Path;

use utoipa::openapi::OpenApi;

/// Path prefix where the Swagger UI is mounted.
pub const DOCS_PATH: &str = "/api-docs";

/// Route pattern for the Swagger UI service, covering everything under
/// [`DOCS_PATH`].
pub const DOCS_MOUNT: &str = "/api-docs/{_:.*}";

/// URL at which the raw OpenAPI document is republished for the UI.
pub const DOCS_SPEC_URL: &str = "/api-docs/openapi.json";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read OpenAPI document: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse OpenAPI document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// # OpenAPI Document Loader
///
/// Reads the API description from disk once, during startup, before the
/// server begins accepting connections. The parsed document backs the
/// Swagger UI mounted at [`DOCS_PATH`].
///
/// A missing or malformed document is not fatal: the caller logs the error
/// and leaves the documentation route unmounted for the lifetime of the
/// process, so the docs prefix falls through to the not-found responder.
pub fn load_document(path: &Path) -> Result<OpenApi, DocumentError> {
    let raw = fs::read_to_string(path)?;
    let document = serde_json::from_str(&raw)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_DOCUMENT: &str = r#"{
        "openapi": "3.1.0",
        "info": { "title": "AI Dev Team API", "version": "1.0.0" },
        "paths": {}
    }"#;

    #[test]
    fn test_load_valid_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL_DOCUMENT.as_bytes()).unwrap();

        let document = load_document(file.path()).expect("document should load");

        assert_eq!(document.info.title, "AI Dev Team API");
        assert_eq!(document.info.version, "1.0.0");
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let result = load_document(Path::new("/nonexistent/openapi.json"));

        assert!(matches!(result, Err(DocumentError::Read(_))));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"openapi: definitely not json").unwrap();

        let result = load_document(file.path());

        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }
}
