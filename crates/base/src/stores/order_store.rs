use crate::entities::Order;
use crate::errors::{OrderBotError, OrderBotResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const JSON_INDENT: &[u8] = b"    ";

/// Whole-collection persistence for orders: every write replaces the stored sequence.
pub trait OrderStore {
    /// Prepares the backing storage so that `load` succeeds on an empty store.
    fn init(&self) -> OrderBotResult<()>;
    fn load(&self) -> OrderBotResult<Vec<Order>>;
    fn save(&self, orders: &[Order]) -> OrderBotResult<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: io::Error) -> OrderBotError {
        OrderBotError::StorageUnavailable {
            path: self.path.clone(),
            source,
        }
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Replaces the store file with a single rename of a fully written sibling file.
    fn write_atomically(&self, content: &[u8]) -> io::Result<()> {
        let mut file = NamedTempFile::new_in(self.directory())?;
        file.write_all(content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }

    fn to_pretty_json(orders: &[Order]) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buffer,
            PrettyFormatter::with_indent(JSON_INDENT),
        );

        orders
            .serialize(&mut serializer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(buffer)
    }
}

impl OrderStore for JsonFileOrderStore {
    fn init(&self) -> OrderBotResult<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
            }
        }

        log::info!("creating an empty order store at {:?}", self.path);
        self.save(&[])
    }

    fn load(&self) -> OrderBotResult<Vec<Order>> {
        let content = fs::read(&self.path).map_err(|e| self.unavailable(e))?;

        let orders: Vec<Order> =
            serde_json::from_slice(&content).map_err(|source| OrderBotError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("loaded {} orders from {:?}", orders.len(), self.path);
        Ok(orders)
    }

    fn save(&self, orders: &[Order]) -> OrderBotResult<()> {
        let content = Self::to_pretty_json(orders).map_err(|e| self.unavailable(e))?;
        self.write_atomically(&content).map_err(|e| self.unavailable(e))?;

        log::debug!("saved {} orders to {:?}", orders.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn order(id: &str, user: &str) -> Order {
        Order {
            order_id: id.to_string(),
            user: user.to_string(),
            product: String::from("Widget"),
            quantity: 3,
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn save__one_order__writes_four_space_indented_json() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));

        store.save(&[order("A1", "alice")]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "[\n    {\n        \"order_id\": \"A1\",\n        \"user\": \"alice\",\n        \"product\": \"Widget\",\n        \"quantity\": 3\n    }\n]"
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn init__missing_file_in_missing_dir__creates_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("data").join("orders.json"));

        store.init().unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    #[allow(non_snake_case)]
    fn init__existing_file__leaves_content_untouched() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));
        store.save(&[order("A1", "alice")]).unwrap();

        store.init().unwrap();

        assert_eq!(store.load().unwrap(), vec![order("A1", "alice")]);
    }

    #[test]
    #[allow(non_snake_case)]
    fn load__malformed_json__corrupt_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));
        fs::write(store.path(), "[{\"order_id\": \"A1\"").unwrap();

        assert!(matches!(
            store.load(),
            Err(OrderBotError::CorruptStore { .. })
        ));
    }

    #[test]
    #[allow(non_snake_case)]
    fn load__record_with_wrong_field_type__corrupt_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));
        fs::write(
            store.path(),
            r#"[{"order_id": "A1", "user": "alice", "product": "Widget", "quantity": "three"}]"#,
        )
        .unwrap();

        assert!(matches!(
            store.load(),
            Err(OrderBotError::CorruptStore { .. })
        ));
    }

    #[test]
    #[allow(non_snake_case)]
    fn load__invalid_utf8__corrupt_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));
        fs::write(store.path(), b"[\xff\xfe]").unwrap();

        assert!(matches!(
            store.load(),
            Err(OrderBotError::CorruptStore { .. })
        ));
    }

    #[test]
    #[allow(non_snake_case)]
    fn save__existing_store__replaced_without_leftover_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));
        store.save(&[order("A1", "alice"), order("A2", "bob")]).unwrap();

        store.save(&[order("A2", "bob")]).unwrap();

        assert_eq!(store.load().unwrap(), vec![order("A2", "bob")]);
        let file_names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect::<Vec<_>>();
        assert_eq!(file_names, vec![std::ffi::OsString::from("orders.json")]);
    }

    #[test]
    #[allow(non_snake_case)]
    fn save__missing_directory__storage_unavailable_and_nothing_created() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("missing").join("orders.json"));

        assert!(matches!(
            store.save(&[order("A1", "alice")]),
            Err(OrderBotError::StorageUnavailable { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    #[allow(non_snake_case)]
    fn load__missing_file__storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path().join("orders.json"));

        assert!(matches!(
            store.load(),
            Err(OrderBotError::StorageUnavailable { .. })
        ));
    }

    #[test]
    #[allow(non_snake_case)]
    fn save__path_is_a_directory__storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOrderStore::new(dir.path());

        assert!(matches!(
            store.save(&[]),
            Err(OrderBotError::StorageUnavailable { .. })
        ));
    }
}
