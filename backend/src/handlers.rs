use std::io::Write;

use axum::extract::Multipart;
use axum::Json;
use cloud::{normalize, NormalizedBuffers};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{BackendError, Result};

/// Receives a PLY upload, normalizes it into the unit cube and returns
/// the flat position/color buffers the viewer renders from.
#[axum::debug_handler]
pub async fn upload_cloud(mut multipart: Multipart) -> Result<Json<NormalizedBuffers>> {
    // The upload form may carry other fields; only the name matters, not
    // the position.
    let mut field = loop {
        match multipart.next_field().await? {
            Some(field) if field.name() == Some("file") => break field,
            Some(_) => continue,
            None => return Err(BackendError::BadRequest("No file uploaded".into())),
        }
    };

    let filename = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_default();
    if !filename.ends_with(".ply") {
        return Err(BackendError::BadRequest("Invalid file type".into()));
    }

    // Spool the upload to disk; the guard removes the file on every exit
    // path, including decode and normalization failures.
    let mut temp_file = NamedTempFile::with_suffix(".ply")?;
    let mut total_size = 0;
    while let Some(chunk) = field.chunk().await? {
        total_size += chunk.len();
        temp_file.write_all(&chunk)?;
    }
    info!("received upload '{}': {} bytes", filename, total_size);

    let data = std::fs::read(temp_file.path())?;
    let points = ply_source::decode(&data)?;
    info!("decoded {} points from '{}'", points.len(), filename);

    let buffers = normalize(&points)?;
    Ok(Json(buffers))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::routes::api_routes;

    const BOUNDARY: &str = "upload-test-boundary";

    const PLY: &str = "ply\n\
        format ascii 1.0\n\
        element vertex 2\n\
        property float x\n\
        property float y\n\
        property float z\n\
        property uchar red\n\
        property uchar green\n\
        property uchar blue\n\
        end_header\n\
        0 0 0 255 0 0\n\
        2 0 0 0 255 0\n";

    fn text_part(body: &mut Vec<u8>, name: &str, value: &str) {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    fn file_part(body: &mut Vec<u8>, name: &str, filename: &str, data: &str) {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\r\n{data}\r\n"
            )
            .as_bytes(),
        );
    }

    fn upload(mut body: Vec<u8>) -> Request<Body> {
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn finds_the_file_field_behind_other_fields() {
        let mut body = Vec::new();
        text_part(&mut body, "comment", "uploaded from the viewer");
        file_part(&mut body, "file", "cloud.ply", PLY);

        let response = api_routes().oneshot(upload(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["position"],
            serde_json::json!([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
        );
        assert_eq!(
            json["color"],
            serde_json::json!([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
        );
    }

    #[tokio::test]
    async fn rejects_uploads_without_a_file_field() {
        let mut body = Vec::new();
        text_part(&mut body, "comment", "no cloud here");

        let response = api_routes().oneshot(upload(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_non_ply_filenames() {
        let mut body = Vec::new();
        file_part(&mut body, "file", "cloud.obj", PLY);

        let response = api_routes().oneshot(upload(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

