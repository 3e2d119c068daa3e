use crate::domain::ports::DocumentSink;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Saves documents into a local directory, standing in for the browser download.
#[derive(Debug, Clone)]
pub struct LocalDownloads {
    base_path: String,
}

impl LocalDownloads {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl DocumentSink for LocalDownloads {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(filename);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 同名檔案直接覆蓋
        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }
}
