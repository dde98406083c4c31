use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A user-submitted file before it has passed validation. The content is
/// optional: drag-drop shells hand over full bytes, while simulation-only
/// callers may register metadata alone.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub content: Option<Vec<u8>>,
}

impl CandidateFile {
    pub fn new(name: String, size: u64, mime_type: String) -> Self {
        Self {
            name,
            size,
            mime_type,
            content: None,
        }
    }

    pub fn with_content(name: String, mime_type: String, content: Vec<u8>) -> Self {
        Self {
            name,
            size: content.len() as u64,
            mime_type,
            content: Some(content),
        }
    }

    /// Inline data URL for previewable types, `None` for everything else.
    pub fn preview(&self) -> Option<String> {
        if !self.mime_type.starts_with("image/") {
            return None;
        }
        let content = self.content.as_ref()?;
        Some(format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(content)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_data_url_preview_for_images() {
        let candidate =
            CandidateFile::with_content("photo.jpg".to_string(), "image/jpeg".to_string(), vec![
                0xFF, 0xD8, 0xFF,
            ]);
        let preview = candidate.preview().expect("image preview");
        assert!(preview.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn no_preview_for_non_image_types() {
        let candidate = CandidateFile::with_content(
            "report.pdf".to_string(),
            "application/pdf".to_string(),
            vec![1, 2, 3],
        );
        assert!(candidate.preview().is_none());
    }

    #[test]
    fn no_preview_without_content() {
        let candidate = CandidateFile::new("photo.png".to_string(), 1024, "image/png".to_string());
        assert!(candidate.preview().is_none());
    }
}
