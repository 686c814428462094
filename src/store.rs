// src/store.rs
//
// Department cache: `.store/<term>/<dept>.json`, one JSON array of outlines.
// Holds only what the fetch layer admitted (enrollable undergraduate outlines).

use std::{error::Error, fs, io, path::PathBuf};

use crate::config::consts::STORE_DIR;
use crate::config::Term;
use crate::outline::Outline;

#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Self { root: PathBuf::from(STORE_DIR) }
    }
}

impl Store {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn department_path(&self, term: &Term, dept: &str) -> PathBuf {
        self.root
            .join(term.store_key())
            .join(format!("{}.json", dept.to_ascii_lowercase()))
    }

    /// `Ok(None)` when nothing is cached for `dept`.
    pub fn load_department(&self, term: &Term, dept: &str) -> Result<Option<Vec<Outline>>, Box<dyn Error>> {
        let path = self.department_path(term, dept);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("{}: {e}", path.display()).into()),
        };
        let outlines: Vec<Outline> = serde_json::from_str(&text)
            .map_err(|e| format!("{}: corrupt cache ({e}); delete it or pass --refresh", path.display()))?;
        logf!("cache hit: {}", path.display());
        Ok(Some(outlines))
    }

    pub fn save_department(&self, term: &Term, dept: &str, outlines: &[Outline]) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.department_path(term, dept);

        // Ensure parent directories exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(outlines)?;
        fs::write(&path, json)?;
        logf!("cache written: {}", path.display());
        Ok(path)
    }
}
