//! Google Cloud Storage bucket over the JSON API.
//!
//! Authenticates with a bearer access token (in CI, the token minted by the
//! workflow's auth step). No retries: transient failures surface to the
//! orchestrator, which aborts the run and leaves the previous listing
//! authoritative.

use std::io::Read;

use crate::blob::BlobStore;
use crate::error::{io_err, StoreError};

const API_BASE: &str = "https://storage.googleapis.com/storage/v1";
const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";

/// A GCS bucket reached over HTTPS.
pub struct GcsBucket {
    project_id: String,
    bucket: String,
    token: String,
    agent: ureq::Agent,
}

impl GcsBucket {
    pub fn new(
        project_id: impl Into<String>,
        bucket: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            bucket: bucket.into(),
            token: token.into(),
            agent: ureq::Agent::new(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{API_BASE}/b/{}/o/{}",
            self.bucket,
            urlencoding::encode(key)
        )
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("x-goog-user-project", &self.project_id)
    }

    fn http_err(key: &str, source: ureq::Error) -> StoreError {
        StoreError::Http {
            key: key.to_owned(),
            source: Box::new(source),
        }
    }
}

impl BlobStore for GcsBucket {
    fn verify(&self) -> Result<(), StoreError> {
        let url = format!("{API_BASE}/b/{}", self.bucket);
        match self.request("GET", &url).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(StoreError::Auth {
                bucket: self.bucket.clone(),
                message: format!("bucket metadata request returned HTTP {code}"),
            }),
            Err(err) => Err(StoreError::Auth {
                bucket: self.bucket.clone(),
                message: err.to_string(),
            }),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let url = format!("{}?alt=media", self.object_url(key));
        let response = match self.request("GET", &url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(err) => return Err(Self::http_err(key, err)),
        };
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| io_err(key, e))?;
        Ok(Some(bytes))
    }

    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StoreError> {
        let url = format!(
            "{UPLOAD_BASE}/b/{}/o?uploadType=media&name={}",
            self.bucket,
            urlencoding::encode(key)
        );
        self.request("POST", &url)
            .set("Content-Type", content_type)
            .send_bytes(bytes)
            .map_err(|e| Self::http_err(key, e))?;
        log::debug!("uploaded {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.request("DELETE", &self.object_url(key)).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => Err(StoreError::MissingObject {
                key: key.to_owned(),
            }),
            Err(err) => Err(Self::http_err(key, err)),
        }
    }
}
