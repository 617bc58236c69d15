//! On-disk layout for collections.

use std::path::{Path, PathBuf};

/// Get the SQLite database path for a collection.
pub fn get_db_path(db_dir: &Path, collection: &str) -> PathBuf {
    db_dir.join(format!("{}.sqlite", collection))
}

/// Get the persisted embedding settings path for a collection.
pub fn get_embedding_config_path(db_dir: &Path, collection: &str) -> PathBuf {
    db_dir.join(format!("{}.embedding.yaml", collection))
}

/// Get the directory holding workspace prompt overrides.
pub fn get_prompts_dir(newsrag_dir: &Path) -> PathBuf {
    newsrag_dir.join("prompts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        let db_dir = Path::new("/data/db");
        assert_eq!(
            get_db_path(db_dir, "financial_news"),
            PathBuf::from("/data/db/financial_news.sqlite")
        );
        assert_eq!(
            get_embedding_config_path(db_dir, "financial_news"),
            PathBuf::from("/data/db/financial_news.embedding.yaml")
        );
    }

    #[test]
    fn test_prompts_dir() {
        assert_eq!(
            get_prompts_dir(Path::new("/ws/.newsrag")),
            PathBuf::from("/ws/.newsrag/prompts")
        );
    }
}
