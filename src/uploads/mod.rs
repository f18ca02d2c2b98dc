//! Client-side image staging for batch upload
//!
//! Selected images are held in memory, can be removed by index, and have no
//! network effect until the batch is explicitly submitted.

use bytes::Bytes;

/// One selected image pending upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// Original filename
    pub filename: String,
    /// MIME type reported at selection time
    pub content_type: String,
    /// Raw image bytes
    pub data: Bytes,
}

impl PendingImage {
    /// Create a pending image from its parts
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size of the image in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Ordered list of images staged for one product
#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    images: Vec<PendingImage>,
}

impl ImageBatch {
    /// Create an empty batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one image
    pub fn push(&mut self, image: PendingImage) {
        self.images.push(image);
    }

    /// Append a selected file list, preserving selection order
    pub fn extend(&mut self, images: impl IntoIterator<Item = PendingImage>) {
        self.images.extend(images);
    }

    /// Remove the image at `index`, preserving the relative order of the
    /// rest; returns `None` when the index is out of range
    pub fn remove(&mut self, index: usize) -> Option<PendingImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Number of staged images
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the batch is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Drop all staged images
    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Drop the first `count` staged images, keeping later additions
    ///
    /// Used after a snapshot of the batch was uploaded: anything staged
    /// since the snapshot stays pending.
    pub fn discard_first(&mut self, count: usize) {
        self.images.drain(..count.min(self.images.len()));
    }

    /// Iterate staged images in selection order
    pub fn iter(&self) -> std::slice::Iter<'_, PendingImage> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a ImageBatch {
    type Item = &'a PendingImage;
    type IntoIter = std::slice::Iter<'a, PendingImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> PendingImage {
        PendingImage::new(name, "image/png", b"png bytes".to_vec())
    }

    #[test]
    fn test_push_and_len() {
        let mut batch = ImageBatch::new();
        assert!(batch.is_empty());

        batch.push(image("a.png"));
        batch.push(image("b.png"));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_remove_middle_preserves_order() {
        let mut batch = ImageBatch::new();
        batch.extend([image("first.png"), image("second.png"), image("third.png")]);

        let removed = batch.remove(1).expect("index in range");
        assert_eq!(removed.filename, "second.png");

        let remaining: Vec<&str> = batch.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(remaining, vec!["first.png", "third.png"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut batch = ImageBatch::new();
        batch.push(image("only.png"));

        assert!(batch.remove(3).is_none());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_discard_first_keeps_later_additions() {
        let mut batch = ImageBatch::new();
        batch.extend([image("a.png"), image("b.png")]);
        batch.push(image("late.png"));

        batch.discard_first(2);
        let remaining: Vec<&str> = batch.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(remaining, vec!["late.png"]);

        // Count beyond the staged length drains everything without panicking
        batch.discard_first(10);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut batch = ImageBatch::new();
        batch.extend([image("a.png"), image("b.png")]);
        batch.clear();
        assert!(batch.is_empty());
    }
}
