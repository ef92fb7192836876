use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{from_reader, from_value, Value};

use crate::errors::LedgerError;

const CONFIG_FILE: &str = "config.json";

/// A directory holding the ledger's `config.json`.
pub trait Vault {
    fn path(&self) -> &PathBuf;

    fn read_vault_values<T: DeserializeOwned>(&self, name: &str) -> Result<T, LedgerError>;
}

pub trait VaultReadable: DeserializeOwned {
    const KEY: &'static str;

    fn from_vault<V: Vault>(vault: &V) -> Result<Self, LedgerError> {
        vault.read_vault_values(Self::KEY)
    }
}

pub struct VaultImpl {
    pub path: PathBuf,
}

impl VaultImpl {
    fn read_config(&self) -> Result<Value, LedgerError> {
        let path = self.path.join(CONFIG_FILE);
        let file = match File::open(&path) {
            Ok(file) => file,
            // No configuration file means every value falls back to its default
            Err(why) if why.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file");
                return Ok(Value::Null);
            }
            Err(why) => {
                return Err(LedgerError::Vault(format!(
                    "Could not open {}: {}",
                    path.display(),
                    why
                )))
            }
        };

        from_reader(file).map_err(|why| {
            LedgerError::Vault(format!("Could not parse {}: {}", path.display(), why))
        })
    }
}

impl Vault for VaultImpl {
    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_vault_values<T: DeserializeOwned>(&self, name: &str) -> Result<T, LedgerError> {
        let config = self.read_config()?;
        let value = config.get(name).cloned().unwrap_or(Value::Null);
        tracing::debug!(key = name, present = !value.is_null(), "reading vault value");

        from_value(value)
            .map_err(|why| LedgerError::Vault(format!("Could not decode '{}': {}", name, why)))
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use rust_decimal_macros::dec;
    use tempfile::{tempdir, TempDir};

    use super::{Vault, VaultImpl, VaultReadable, CONFIG_FILE};
    use crate::errors::LedgerError;
    use crate::interest_rate::InterestRateVaultValue;
    use crate::timezone::{TimeZone, TimeZonesVaultValue};

    fn vault_with_config(content: &str) -> (TempDir, VaultImpl) {
        let directory = tempdir().unwrap();
        let mut file = File::create(directory.path().join(CONFIG_FILE)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let vault = VaultImpl {
            path: directory.path().to_path_buf(),
        };
        (directory, vault)
    }

    #[test]
    fn read_vault_values__nominal() {
        let (_directory, vault) = vault_with_config(
            r#"{
"interest_rate": "0.02",
"timezones": [{"name": "MSK", "offset_hours": 3, "offset_minutes": 15}]
}"#,
        );

        assert_eq!(
            InterestRateVaultValue::from_vault(&vault).unwrap(),
            InterestRateVaultValue(Some(dec!(0.02)))
        );
        assert_eq!(
            TimeZonesVaultValue::from_vault(&vault).unwrap(),
            Some(vec![TimeZone::new("MSK", 3, 15).unwrap()])
        );
    }

    #[test]
    fn read_vault_values__missing_key() {
        let (_directory, vault) = vault_with_config("{}");
        assert_eq!(TimeZonesVaultValue::from_vault(&vault).unwrap(), None);
    }

    #[test]
    fn read_vault_values__missing_file() {
        let directory = tempdir().unwrap();
        let vault = VaultImpl {
            path: directory.path().to_path_buf(),
        };
        assert_eq!(vault.path(), &directory.path().to_path_buf());
        assert_eq!(
            InterestRateVaultValue::from_vault(&vault).unwrap(),
            InterestRateVaultValue(None)
        );
    }

    #[test]
    fn read_vault_values__invalid_json() {
        let (_directory, vault) = vault_with_config("{ not json");
        assert!(matches!(
            TimeZonesVaultValue::from_vault(&vault),
            Err(LedgerError::Vault(_))
        ));
    }

    #[test]
    fn read_vault_values__invalid_timezone() {
        let (_directory, vault) =
            vault_with_config(r#"{"timezones": [{"name": " ", "offset_hours": 1}]}"#);
        assert!(matches!(
            TimeZonesVaultValue::from_vault(&vault),
            Err(LedgerError::Vault(_))
        ));
    }
}
