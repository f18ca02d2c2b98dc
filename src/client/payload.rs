//! Multipart payload representation
//!
//! Submissions are assembled into an inspectable part list before being
//! handed to the HTTP layer, so payload construction can be verified without
//! a live server.

use bytes::Bytes;

/// One part of a multipart submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    /// String entry
    Text {
        /// Part name
        name: String,
        /// Part value
        value: String,
    },
    /// Binary file entry
    File {
        /// Part name
        name: String,
        /// Original filename
        filename: String,
        /// MIME type
        content_type: String,
        /// File bytes
        data: Bytes,
    },
}

impl PayloadPart {
    /// Name of this part
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Ordered multipart body for one submission
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    parts: Vec<PayloadPart>,
}

impl FormPayload {
    /// Empty payload
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string entry
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(PayloadPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Append a binary file entry
    pub fn file(
        &mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) {
        self.parts.push(PayloadPart::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        });
    }

    /// Parts in append order
    #[must_use]
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    /// First string entry under `name`, if any
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            PayloadPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All file entries under `name`, in append order
    #[must_use]
    pub fn files_named(&self, name: &str) -> Vec<&PayloadPart> {
        self.parts
            .iter()
            .filter(|part| matches!(part, PayloadPart::File { name: n, .. } if n == name))
            .collect()
    }

    /// Convert into a reqwest multipart form
    ///
    /// Parts with an unparseable MIME type keep reqwest's default content
    /// type for byte parts.
    #[must_use]
    pub fn into_multipart(self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            match part {
                PayloadPart::Text { name, value } => {
                    form = form.text(name, value);
                }
                PayloadPart::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let fallback = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(filename.clone());
                    let file_part = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(filename)
                        .mime_str(&content_type)
                        .unwrap_or(fallback);
                    form = form.part(name, file_part);
                }
            }
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_preserved() {
        let mut payload = FormPayload::new();
        payload.text("firstName", "Omar");
        payload.file("image", "me.png", "image/png", b"png".to_vec());
        payload.text("address", "12 Main Street");

        let names: Vec<&str> = payload.parts().iter().map(PayloadPart::name).collect();
        assert_eq!(names, vec!["firstName", "image", "address"]);
    }

    #[test]
    fn test_text_value_lookup() {
        let mut payload = FormPayload::new();
        payload.text("productId", "42");
        assert_eq!(payload.text_value("productId"), Some("42"));
        assert!(payload.text_value("missing").is_none());
    }

    #[test]
    fn test_files_named() {
        let mut payload = FormPayload::new();
        payload.file("images", "a.png", "image/png", b"a".to_vec());
        payload.file("images", "b.png", "image/png", b"b".to_vec());
        payload.text("productId", "42");

        assert_eq!(payload.files_named("images").len(), 2);
        assert!(payload.files_named("image").is_empty());
    }
}
