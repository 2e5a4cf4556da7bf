use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::{Budget, Ledger};
use crate::errors::{Result, TrackerError};
use crate::storage::StateStore;

const LEDGER_FILE: &str = "expenses.json";
const BUDGET_FILE: &str = "budget.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence. Keeps two independent entries under
/// one application directory: the expense array and the budget object.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    root: PathBuf,
}

impl JsonStateStore {
    /// Opens (and creates if needed) the store rooted at `root`, or at the
    /// platform data directory when no override is given.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE)
    }

    pub fn budget_path(&self) -> PathBuf {
        self.root.join(BUDGET_FILE)
    }

    fn load_entry<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save_entry<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl StateStore for JsonStateStore {
    fn load_ledger(&self) -> Result<Option<Ledger>> {
        self.load_entry(&self.ledger_path())
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        self.save_entry(ledger, &self.ledger_path())
    }

    fn load_budget(&self) -> Result<Option<Budget>> {
        self.load_entry(&self.budget_path())
    }

    fn save_budget(&self, budget: &Budget) -> Result<()> {
        self.save_entry(budget, &self.budget_path())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("spendtrack"))
        .ok_or_else(|| TrackerError::Storage("no data directory available".into()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ExpenseRecord};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStateStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStateStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        ledger.prepend(ExpenseRecord::new(
            250.0,
            Category::FoodAndDrinks,
            "Canteen",
            date,
        ));
        ledger.prepend(ExpenseRecord::new(
            60.0,
            Category::Custom("Printing".into()),
            "lab report, \"draft\"",
            date,
        ));
        ledger
    }

    #[test]
    fn absent_entries_load_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.load_ledger().unwrap().is_none());
        assert!(store.load_budget().unwrap().is_none());
    }

    #[test]
    fn ledger_roundtrip_preserves_records_field_for_field() {
        let (store, _guard) = store_with_temp_dir();
        let ledger = sample_ledger();
        store.save_ledger(&ledger).expect("save ledger");
        let loaded = store.load_ledger().expect("load ledger").expect("present");
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn budget_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.save_budget(&Budget::new(8000.0)).expect("save budget");
        let loaded = store.load_budget().unwrap().unwrap();
        assert_eq!(loaded.monthly_limit, 8000.0);
    }

    #[test]
    fn malformed_entry_surfaces_an_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.ledger_path(), "{not json").unwrap();
        assert!(store.load_ledger().is_err());
    }

    #[test]
    fn saves_replace_the_whole_value_atomically() {
        let (store, _guard) = store_with_temp_dir();
        store.save_ledger(&sample_ledger()).unwrap();
        let mut smaller = Ledger::new();
        smaller.prepend(ExpenseRecord::new(
            1.0,
            Category::Other,
            "",
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        ));
        store.save_ledger(&smaller).unwrap();
        let loaded = store.load_ledger().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!store.ledger_path().with_extension("json.tmp").exists());
    }
}
