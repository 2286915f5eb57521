use axum::response::Response;
use http_body_util::BodyExt;
use sha2::{Digest, Sha256};

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Calculate SHA-256 checksum of data and return as lowercase hex string
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Key the uploader derives for an image payload
pub fn expected_image_key(data: &[u8], ext: &str) -> String {
    let sha256 = calculate_sha256(data);
    format!("images/{}/{}/{sha256}.{ext}", &sha256[0..2], &sha256[2..4])
}
