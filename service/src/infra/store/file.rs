//! JSON-file backed [`Store`] area.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use common::operations::{By, Delete, Insert, Select};
use tokio::{fs, sync::Mutex};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::infra::Store;
use crate::infra::store::{self, Error, Key};

/// Contents of a [`File`]: raw key-value pairs.
type Contents = BTreeMap<String, String>;

/// Storage area persisted as a JSON object in a file on disk.
///
/// Used as the durable area. A missing file reads as an empty area, and
/// every write replaces the whole file. Clones share the same write lock.
#[derive(Clone, Debug)]
pub struct File {
    /// Path to the JSON file.
    path: Arc<PathBuf>,

    /// Lock serializing read-modify-write cycles of this process.
    lock: Arc<Mutex<()>>,
}

impl File {
    /// Creates a new [`File`] area at the provided `path`.
    ///
    /// Nothing is touched on disk until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path of this [`File`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current [`Contents`] of this [`File`].
    async fn read(&self) -> Result<Contents, Traced<Error>> {
        match fs::read(self.path.as_path()).await {
            Ok(bytes) if bytes.is_empty() => Ok(Contents::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(tracerr::from_and_wrap!(=> Error)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Contents::new())
            }
            Err(e) => Err(tracerr::new!(Error::Io(e))),
        }
    }

    /// Replaces the [`Contents`] of this [`File`].
    async fn write(
        &self,
        contents: &Contents,
    ) -> Result<(), Traced<Error>> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty())
        {
            fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;
        }

        let bytes = serde_json::to_vec_pretty(contents)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::rename(&tmp, self.path.as_path())
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl store::Store<Insert<(Key, String)>> for File {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert((key, value)): Insert<(Key, String)>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut contents = self.read().await.map_err(tracerr::wrap!())?;
        drop(contents.insert(key.as_str().to_owned(), value));
        self.write(&contents).await.map_err(tracerr::wrap!())?;

        log::trace!("`{key}` written to `{}`", self.path.display());
        Ok(())
    }
}

impl store::Store<Select<By<Option<String>, Key>>> for File {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        Ok(self
            .read()
            .await
            .map_err(tracerr::wrap!())?
            .remove(key.as_str()))
    }
}

impl store::Store<Delete<Key>> for File {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut contents = self.read().await.map_err(tracerr::wrap!())?;
        if contents.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.write(&contents).await.map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::env;

    use common::operations::{By, Delete, Insert, Select};

    use crate::infra::store::{Key, Store as _};

    use super::File;

    fn temp_file() -> File {
        File::new(
            env::temp_dir()
                .join(format!("lifeops-{}", uuid::Uuid::new_v4()))
                .join("storage.json"),
        )
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let file = temp_file();

        assert_eq!(
            file.execute(Select(By::new(Key::AuthToken))).await.unwrap(),
            None,
        );
        file.execute(Delete(Key::AuthToken)).await.unwrap();
        assert!(!file.path().exists());
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let file = temp_file();

        file.execute(Insert((Key::AuthToken, "T1".to_owned())))
            .await
            .unwrap();
        file.execute(Insert((Key::RememberMe, "true".to_owned())))
            .await
            .unwrap();

        let reopened = File::new(file.path());
        assert_eq!(
            reopened
                .execute(Select(By::new(Key::AuthToken)))
                .await
                .unwrap()
                .as_deref(),
            Some("T1"),
        );

        reopened.execute(Delete(Key::AuthToken)).await.unwrap();
        assert_eq!(
            file.execute(Select(By::new(Key::AuthToken))).await.unwrap(),
            None,
        );
        assert_eq!(
            file.execute(Select(By::new(Key::RememberMe)))
                .await
                .unwrap()
                .as_deref(),
            Some("true"),
        );
    }

    #[tokio::test]
    async fn rejects_malformed_contents() {
        let file = temp_file();
        std::fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        std::fs::write(file.path(), "not json").unwrap();

        assert!(file.execute(Select(By::new(Key::AuthToken))).await.is_err());
    }
}
