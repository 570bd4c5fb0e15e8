/// Input area state: the text being typed and an image picked but not yet sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    input: String,
    staged_image: Option<String>,
}

impl Composer {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn staged_image(&self) -> Option<&str> {
        self.staged_image.as_deref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Stages an image; a blank reference clears the selection.
    pub fn stage_image(&mut self, image_ref: impl Into<String>) {
        let image_ref = image_ref.into();
        self.staged_image = if image_ref.trim().is_empty() {
            None
        } else {
            Some(image_ref)
        };
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn clear_staged_image(&mut self) {
        self.staged_image = None;
    }

    /// True when a send would not be rejected for missing input.
    pub fn can_send(&self) -> bool {
        self.staged_image.is_some() || !self.input.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_send() {
        let mut composer = Composer::default();
        assert!(!composer.can_send());

        composer.set_input("   ");
        assert!(!composer.can_send());

        composer.stage_image("file://img1.jpg");
        assert!(composer.can_send());

        composer.stage_image(" ");
        assert!(composer.staged_image().is_none());
    }
}
