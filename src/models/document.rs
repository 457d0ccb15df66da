use std::ops::Range;

/// 目标文档的原始文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    content: String,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    /// Byte range strictly between the first `start` marker and the first `end`
    /// marker that follows it. `None` when either marker is missing.
    pub fn managed_region(&self, start: &str, end: &str) -> Option<Range<usize>> {
        let region_start = self.content.find(start)? + start.len();
        let region_end = region_start + self.content[region_start..].find(end)?;
        Some(region_start..region_end)
    }

    /// Replaces the managed region, leaving both markers and everything outside
    /// them untouched.
    pub fn replace_region(&mut self, region: Range<usize>, body: &str) {
        self.content.replace_range(region, body);
    }

    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "<!-- S -->";
    const END: &str = "<!-- E -->";

    #[test]
    fn test_managed_region_found() {
        let doc = Document::new("head\n<!-- S -->old<!-- E -->\ntail");
        let region = doc.managed_region(START, END).unwrap();
        assert_eq!(&doc.content()[region], "old");
    }

    #[test]
    fn test_managed_region_missing_marker() {
        assert!(Document::new("no markers here").managed_region(START, END).is_none());
        assert!(Document::new("<!-- S --> only start").managed_region(START, END).is_none());
        assert!(Document::new("only end <!-- E -->").managed_region(START, END).is_none());
    }

    #[test]
    fn test_end_marker_before_start_is_ignored() {
        let doc = Document::new("<!-- E -->\n<!-- S -->body");
        assert!(doc.managed_region(START, END).is_none());

        let doc = Document::new("<!-- E -->\n<!-- S -->body<!-- E -->");
        let region = doc.managed_region(START, END).unwrap();
        assert_eq!(&doc.content()[region], "body");
    }

    #[test]
    fn test_replace_region_keeps_outside() {
        let mut doc = Document::new("a<!-- S -->old<!-- E -->b");
        let region = doc.managed_region(START, END).unwrap();
        doc.replace_region(region, "new");
        assert_eq!(doc.content(), "a<!-- S -->new<!-- E -->b");
    }
}
