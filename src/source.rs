use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::Mutex,
};

use once_cell::sync::Lazy;

use crate::{
    error::{TableError, UcdResult},
    table::Table,
};

/// Somewhere the raw bytes of a table can be read from. The whole buffer is
/// fetched before any decoding happens.
pub trait FetchBytes {
    fn fetch_bytes(&self) -> UcdResult<Vec<u8>>;
}

impl FetchBytes for Path {
    fn fetch_bytes(&self) -> UcdResult<Vec<u8>> {
        let mut bytes = Vec::new();

        File::open(self)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(TableError::from)?;

        log::debug!("read {} bytes from {}", bytes.len(), self.display());

        Ok(bytes)
    }
}

impl FetchBytes for PathBuf {
    fn fetch_bytes(&self) -> UcdResult<Vec<u8>> {
        self.as_path().fetch_bytes()
    }
}

impl FetchBytes for [u8] {
    fn fetch_bytes(&self) -> UcdResult<Vec<u8>> {
        Ok(self.to_vec())
    }
}

pub fn load<S: FetchBytes + ?Sized>(source: &S) -> UcdResult<Table> {
    Table::load(source.fetch_bytes()?)
}

/// Tables loaded so far, one per file. They live for the rest of the process.
static LOADED_TABLES: Lazy<Mutex<HashMap<PathBuf, &'static Table>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Loads the table at `path` the first time it is asked for and hands out the
/// same instance afterwards
pub fn load_cached(path: &Path) -> UcdResult<&'static Table> {
    let key = path.canonicalize().map_err(TableError::from)?;

    let mut tables = LOADED_TABLES
        .lock()
        .map_err(|_| anyhow::anyhow!("table cache poisoned"))?;

    if let Some(&table) = tables.get(&key) {
        return Ok(table);
    }

    let table: &'static Table = Box::leak(Box::new(load(key.as_path())?));
    tables.insert(key, table);

    Ok(table)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::{range::Class, testing::TableBuilder};

    fn sample_table() -> Vec<u8> {
        let mut builder = TableBuilder::new();
        let name = builder.root_name("FROM A FILE");
        builder.age("1.1").range(0, Class::Character, 0, name);
        builder.build()
    }

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ucdnames-{}-{}", std::process::id(), name));
        File::create(&path).unwrap().write_all(bytes).unwrap();
        path
    }

    #[test]
    fn load_from_bytes() {
        let bytes = sample_table();
        let table = load(bytes.as_slice()).unwrap();
        assert_eq!(table.name_of(0x41).unwrap(), "FROM A FILE");
    }

    #[test]
    fn load_from_file() {
        let path = temp_file("load.bin", &sample_table());
        let table = load(&path).unwrap();
        assert_eq!(table.name_of(0x41).unwrap(), "FROM A FILE");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("ucdnames-this-file-does-not-exist.bin");
        let err = load(path.as_path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::IoError(..))
        ));
    }

    #[test]
    fn cached_table_is_loaded_once() {
        let path = temp_file("cached.bin", &sample_table());

        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(std::ptr::eq(first, second));

        std::fs::remove_file(path).unwrap();
    }
}
