//! Add flow: turn an image file into a new wardrobe item

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use eyre::{Context, Result};
use std::fs;
use std::path::Path;

use super::Item;

/// Image MIME type for a file, judged by extension
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Read an image file into a `data:<mime>;base64,...` URL
pub fn encode_image(path: &Path) -> Result<String> {
    let Some(mime) = mime_type(path) else {
        eyre::bail!("Select a valid image.");
    };
    let bytes = fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Validate the add form and build the item.
///
/// Checks run in form order: image, then category, then image type.
pub fn build_item(id: i64, image_path: &Path, category: &str, note: Option<&str>) -> Result<Item> {
    if !image_path.is_file() {
        eyre::bail!("Please choose an image file.");
    }
    let category = category.trim();
    if category.is_empty() {
        eyre::bail!("Please choose a category.");
    }

    let image = encode_image(image_path)?;
    log::debug!(
        "Encoded {} into {} bytes",
        image_path.display(),
        image.len()
    );

    Ok(Item {
        id,
        category: category.to_string(),
        image,
        note: note.unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type(Path::new("a.svg")), Some("image/svg+xml"));
        assert_eq!(mime_type(Path::new("a.txt")), None);
        assert_eq!(mime_type(Path::new("noext")), None);
    }

    #[test]
    fn test_build_item_encodes_data_url() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shirt.png");
        fs::write(&path, b"hi").unwrap();

        let item = build_item(42, &path, " Shirt ", Some("blue")).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.category, "Shirt");
        assert_eq!(item.image, "data:image/png;base64,aGk=");
        assert_eq!(item.note, "blue");
    }

    #[test]
    fn test_build_item_note_defaults_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shoe.jpg");
        fs::write(&path, b"x").unwrap();

        let item = build_item(1, &path, "Shoes", None).unwrap();
        assert_eq!(item.note, "");
    }

    #[test]
    fn test_build_item_missing_file() {
        let err = build_item(1, &PathBuf::from("/nonexistent/shirt.png"), "Shirt", None).unwrap_err();
        assert_eq!(err.to_string(), "Please choose an image file.");
    }

    #[test]
    fn test_build_item_missing_category() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shirt.png");
        fs::write(&path, b"x").unwrap();

        let err = build_item(1, &path, "  ", None).unwrap_err();
        assert_eq!(err.to_string(), "Please choose a category.");
    }

    #[test]
    fn test_build_item_rejects_non_image() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, b"x").unwrap();

        let err = build_item(1, &path, "Shirt", None).unwrap_err();
        assert_eq!(err.to_string(), "Select a valid image.");
    }
}
