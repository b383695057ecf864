//! In-memory [`Store`] area.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Delete, Insert, Select};
use tokio::sync::RwLock;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Store;
use crate::infra::store::{self, Key};

/// In-memory storage area living as long as the process does.
///
/// Used as the session-scoped area. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<HashMap<Key, String>>>);

impl store::Store<Insert<(Key, String)>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Insert((key, value)): Insert<(Key, String)>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.write().await.insert(key, value));
        Ok(())
    }
}

impl store::Store<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.read().await.get(by.as_inner()).cloned())
    }
}

impl store::Store<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.write().await.remove(&key));
        Ok(())
    }
}
