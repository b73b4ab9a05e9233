use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// A JSON file that is always read whole and written whole.
///
/// Every access holds an exclusive lock for its full read-modify-write cycle,
/// so two mutations through the same `Document` never interleave. Writes go to
/// a sibling `.tmp` file first and are renamed into place.
pub struct Document<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Clone for Document<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: self.lock.clone(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> Document<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Open the document at `path`, creating it (and its directory) with
    /// `T::default()` if it doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let doc = Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
            _marker: std::marker::PhantomData,
        };
        if !doc.path.exists() {
            tracing::info!("Creating {}", doc.path.display());
            write_json(&doc.path, &T::default())?;
        }
        Ok(doc)
    }

    /// Read the current contents.
    pub fn load(&self) -> Result<T> {
        let _guard = self.lock.lock().expect("document lock poisoned");
        read_json(&self.path)
    }

    /// Read, apply `f`, and write back if `f` succeeds.
    ///
    /// A failing `f` leaves the file untouched.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        let _guard = self.lock.lock().expect("document lock poisoned");
        let mut data = read_json(&self.path)?;
        let out = f(&mut data)?;
        write_json(&self.path, &data)?;
        Ok(out)
    }

    /// Overwrite the whole document.
    pub fn replace(&self, data: &T) -> Result<()> {
        let _guard = self.lock.lock().expect("document lock poisoned");
        write_json(&self.path, data)
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&contents)?)
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension("json.tmp");
    let mut file = std::fs::File::create(&temp)?;
    let content = serde_json::to_string_pretty(data)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    std::fs::rename(&temp, path)?;
    Ok(())
}
