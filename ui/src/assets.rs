use gpui::{Application, AssetSource, SharedString};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// Serves event images (and any other relative asset path) from the data
/// directory the chart was loaded from.
#[derive(Clone)]
pub struct DataAssets {
    root: PathBuf,
}

impl DataAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetSource for DataAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        let resolved = self.resolve(path);
        match fs::read(&resolved) {
            Ok(bytes) => Ok(Some(Cow::Owned(bytes))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %resolved.display(), "asset not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let resolved = self.resolve(path);
        let entries = match fs::read_dir(&resolved) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            files.push(entry.path().to_string_lossy().into_owned().into());
        }
        Ok(files)
    }
}

pub fn application_with_assets(root: impl Into<PathBuf>) -> Application {
    Application::new().with_assets(DataAssets::new(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn loads_relative_paths_from_root() {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let root = std::env::temp_dir().join(format!("odds-chart-assets-{nonce}"));
        fs::create_dir_all(root.join("img")).unwrap();
        fs::write(root.join("img/debate.png"), b"png").unwrap();

        let assets = DataAssets::new(&root);
        let loaded = assets.load("img/debate.png").unwrap();
        let missing = assets.load("img/none.png").unwrap();
        let listed = assets.list("img").unwrap();
        fs::remove_dir_all(&root).ok();

        assert_eq!(loaded.as_deref(), Some(&b"png"[..]));
        assert!(missing.is_none());
        assert_eq!(listed.len(), 1);
    }
}
