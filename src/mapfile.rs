use eyre::WrapErr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// MapFiles reads map files from the paths given on the command line.
/// A directory is walked recursively and contributes every `.yaml`/`.yml` file under it, in file
/// name order. A file named directly is read whatever its extension.
pub struct MapFiles {
    pending: std::vec::IntoIter<PathBuf>,
}

impl MapFiles {
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> eyre::Result<MapFiles> {
        let mut files = Vec::new();

        for path in paths {
            let path = path.as_ref();
            if !path.is_dir() {
                files.push(path.to_path_buf());
                continue;
            }

            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.wrap_err_with(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_map_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        Ok(MapFiles {
            pending: files.into_iter(),
        })
    }
}

fn is_map_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read map files one at a time and return their contents plus the file name
impl Iterator for MapFiles {
    type Item = eyre::Result<(String, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.pending.next()?;
        let name = path.display().to_string();
        Some(
            std::fs::read(&path)
                .wrap_err_with(|| format!("failed to read map file {}", name))
                .map(|content| (name, content)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_directories_for_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.yaml"), "rows: [\"SG\"]").unwrap();
        fs::write(nested.join("a.yml"), "rows: [\"S.G\"]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loaded: Vec<_> = MapFiles::new(&[dir.path()])
            .unwrap()
            .collect::<eyre::Result<_>>()
            .unwrap();

        let names: Vec<_> = loaded.iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("b.yaml"));
        assert!(names[1].ends_with("a.yml"));
        assert_eq!(loaded[0].1, b"rows: [\"SG\"]");
    }

    #[test]
    fn missing_file_is_an_error_item() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");

        let mut files = MapFiles::new(&[&missing]).unwrap();
        let err = files.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
        assert!(files.next().is_none());
    }
}
