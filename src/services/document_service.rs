use crate::errors::Result;
use crate::models::document::Document;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCUMENT: &str = "# Stock Tracker\n\n\n";

/// How the rendered report is written into the target document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Replace the text between the markers, appending a marked section when absent
    MarkedRegion,
    /// Replace the whole file with the report
    Overwrite,
}

/// 文档更新服务，只替换标记之间的内容
pub struct DocumentService {
    path: PathBuf,
    policy: UpdatePolicy,
    start_marker: String,
    end_marker: String,
}

impl DocumentService {
    pub fn new(path: impl Into<PathBuf>, policy: UpdatePolicy, start_marker: &str, end_marker: &str) -> Self {
        Self {
            path: path.into(),
            policy,
            start_marker: start_marker.to_string(),
            end_marker: end_marker.to_string(),
        }
    }

    /// 获取目标文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Computes the final document text from the existing one, if any.
    pub fn apply(&self, existing: Option<&str>, rendered: &str) -> String {
        if self.policy == UpdatePolicy::Overwrite {
            return rendered.to_string();
        }

        let mut document = Document::new(existing.unwrap_or(DEFAULT_DOCUMENT));

        match document.managed_region(&self.start_marker, &self.end_marker) {
            Some(region) => {
                debug!("Replacing managed region {:?}", region);
                document.replace_region(region, &format!("\n{}\n", rendered));
            }
            None => {
                debug!("Markers not found, appending a new section");
                document.append(&format!(
                    "\n\n{}\n{}\n{}",
                    self.start_marker, rendered, self.end_marker
                ));
            }
        }

        document.into_content()
    }

    /// 读取目标文件，应用更新后整体写回
    pub fn update(&self, rendered: &str) -> Result<()> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, starting from default document", self.path.display());
                None
            }
            Err(e) => return Err(e.into()),
        };

        let content = self.apply(existing.as_deref(), rendered);

        // 确保目录存在
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, content)?;
        info!("Wrote {}", self.path.display());
        Ok(())
    }
}
