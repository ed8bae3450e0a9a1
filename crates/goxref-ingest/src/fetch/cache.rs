//! On-disk download cache
//!
//! One file per URL, named by the SHA-256 digest of the URL. Downloads are
//! written next to their final location with a `.part` suffix and renamed
//! once complete, so an interrupted download never shows up as a hit.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use goxref_common::checksum::digest_str;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PARTIAL_SUFFIX: &str = "part";

/// Download cache rooted at a directory
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    max_age: Option<Duration>,
}

impl DiskCache {
    /// Open (creating if needed) a cache directory
    pub fn new(dir: impl Into<PathBuf>, max_age_days: Option<i64>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            max_age: max_age_days.map(Duration::days),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the entry for `url`, whether or not it exists
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(digest_str(url))
    }

    /// Path of a fresh entry for `url`, if one exists
    pub fn lookup(&self, url: &str) -> Result<Option<PathBuf>> {
        let path = self.path_for(url);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if let Some(max_age) = self.max_age {
            let modified: DateTime<Utc> = metadata.modified()?.into();
            let age = Utc::now() - modified;
            if age > max_age {
                debug!(url, age_days = age.num_days(), "Cache entry expired");
                return Ok(None);
            }
        }

        Ok(Some(path))
    }

    /// Copy `body` into the cache under `url` and return the entry's path
    pub fn store(&self, url: &str, body: &mut dyn Read) -> Result<PathBuf> {
        let path = self.path_for(url);
        let partial = path.with_extension(PARTIAL_SUFFIX);

        let written = {
            let mut file = File::create(&partial)?;
            match io::copy(body, &mut file) {
                Ok(written) => written,
                Err(e) => {
                    let _ = fs::remove_file(&partial);
                    return Err(e.into());
                },
            }
        };

        fs::rename(&partial, &path)?;
        info!(url, bytes = written, path = %path.display(), "Cached download");

        Ok(path)
    }

    /// Remove every entry, returning how many files were deleted
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        info!(removed, dir = %self.dir.display(), "Cleared download cache");
        Ok(removed)
    }
}
