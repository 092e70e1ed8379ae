//! Item image storage

use std::path::Path;
use uuid::Uuid;

use crate::error::Result;

/// Save uploaded image bytes under a generated filename.
///
/// Only the extension of the client-supplied filename is kept, and only when
/// it is plain ASCII alphanumeric, so path components in the upload name
/// never reach the filesystem. Returns the public `/uploads/...` path stored
/// on the item.
pub async fn save_image(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<String> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let filename = format!("item-{}{}", Uuid::new_v4(), ext);
    tokio::fs::write(dir.join(&filename), bytes).await?;

    Ok(format!("/uploads/{}", filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_image_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = save_image(dir.path(), "photo.PNG", b"fake image bytes")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/item-"));
        assert!(url.ends_with(".png"));

        let filename = url.strip_prefix("/uploads/").unwrap();
        let stored = tokio::fs::read(dir.path().join(filename)).await.unwrap();
        assert_eq!(stored, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_traversal_components_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let url = save_image(dir.path(), "../../etc/passwd", b"x")
            .await
            .unwrap();

        let filename = url.strip_prefix("/uploads/").unwrap();
        assert!(!filename.contains('/'));
        assert!(!filename.contains(".."));
        assert!(dir.path().join(filename).exists());
    }

    #[tokio::test]
    async fn test_unique_names_for_same_upload() {
        let dir = tempfile::tempdir().unwrap();
        let a = save_image(dir.path(), "a.jpg", b"1").await.unwrap();
        let b = save_image(dir.path(), "a.jpg", b"2").await.unwrap();
        assert_ne!(a, b);
    }
}
