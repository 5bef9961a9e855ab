//! Directory-backed key-value store.
//!
//! Each key maps to a `<key>.json` file inside a capability-scoped
//! directory. Writes go through a temporary file and rename so the target
//! file is never partially written; a crash mid-write leaves the previous
//! value intact.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use super::kv::{KeyValueStore, KeyValueStoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value store persisting each key as a JSON file in one directory.
///
/// The directory handle is capability-scoped (`cap-std`), so the store
/// can never escape the directory it was opened on.
#[derive(Debug)]
pub struct DirKeyValueStore {
    dir: Dir,
}

impl DirKeyValueStore {
    /// Opens a store rooted at `path` using ambient authority.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be
    /// opened.
    pub fn open_ambient(path: impl AsRef<Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path.as_ref(), cap_std::ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wraps an already-opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn file_name(key: &str) -> Result<String, KeyValueStoreError> {
        let name = format!("{key}.json");
        let path = Utf8Path::new(&name);
        let mut components = path.components();
        let (Some(Utf8Component::Normal(_)), None) = (components.next(), components.next())
        else {
            return Err(KeyValueStoreError::invalid_key(
                key,
                "key must map to a single file name",
            ));
        };
        Ok(name)
    }

    fn write_atomic(&self, key: &str, name: &str, contents: &str) -> Result<(), KeyValueStoreError> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(".{}.tmp.{}.{}.{}", name, std::process::id(), nanos, counter);

        self.write_temp_file(key, &tmp_name, contents)?;

        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, name) {
            // Best-effort cleanup; the stale temp file is harmless.
            drop(self.dir.remove_file(&tmp_name));
            return Err(KeyValueStoreError::backend(key, err.to_string()));
        }
        self.sync_directory();
        Ok(())
    }

    fn write_temp_file(
        &self,
        key: &str,
        tmp_name: &str,
        contents: &str,
    ) -> Result<(), KeyValueStoreError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self
            .dir
            .open_with(tmp_name, &options)
            .map_err(|err| KeyValueStoreError::backend(key, err.to_string()))?;

        let outcome = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(err) = outcome {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
            return Err(KeyValueStoreError::backend(key, err.to_string()));
        }
        Ok(())
    }

    fn sync_directory(&self) {
        // Best-effort; a missed directory sync only risks the rename on
        // power loss, not corruption.
        if self.dir.open(".").and_then(|dir| dir.sync_all()).is_err() {
            // Ignore sync failures.
        }
    }
}

impl KeyValueStore for DirKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let name = Self::file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::backend(key, err.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let name = Self::file_name(key)?;
        self.write_atomic(key, &name, value)
    }

    fn delete(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let name = Self::file_name(key)?;
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStoreError::backend(key, err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DirKeyValueStore, KeyValueStore, KeyValueStoreError};

    fn store() -> (tempfile::TempDir, DirKeyValueStore) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir_store = DirKeyValueStore::open_ambient(tmp.path()).expect("open store dir");
        (tmp, dir_store)
    }

    #[test]
    fn values_survive_reopening_the_directory() {
        let (tmp, first) = store();
        first
            .write("cart", r#"[{"dishId":1}]"#)
            .expect("write succeeds");
        drop(first);

        let reopened = DirKeyValueStore::open_ambient(tmp.path()).expect("reopen store dir");
        assert_eq!(
            reopened.read("cart").expect("read succeeds"),
            Some(r#"[{"dishId":1}]"#.to_owned())
        );
    }

    #[test]
    fn writes_replace_previous_values() {
        let (_tmp, dir_store) = store();
        dir_store.write("cart", "[]").expect("write succeeds");
        dir_store.write("cart", "[1]").expect("write succeeds");
        assert_eq!(
            dir_store.read("cart").expect("read succeeds"),
            Some("[1]".to_owned())
        );
    }

    #[test]
    fn absent_keys_read_as_none_and_delete_quietly() {
        let (_tmp, dir_store) = store();
        assert_eq!(dir_store.read("appliedPromo").expect("read succeeds"), None);
        dir_store.delete("appliedPromo").expect("delete succeeds");
    }

    #[test]
    fn keys_with_path_separators_are_rejected() {
        let (_tmp, dir_store) = store();
        let error = dir_store
            .read("../escape")
            .expect_err("separator rejected");
        assert!(matches!(error, KeyValueStoreError::InvalidKey { .. }));
    }

    #[test]
    fn no_temp_files_remain_after_a_write() {
        let (tmp, dir_store) = store();
        dir_store.write("cart", "[]").expect("write succeeds");

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "stale temp files: {leftovers:?}");
    }
}
