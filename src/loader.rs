//! Item loading from files and strings.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;

/// Load a JSON array of items from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read,
/// or `LoadError::InvalidJson` if it isn't a JSON array of `T`.
pub fn load_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_items_str(&content)
}

/// Load a JSON array of items from a string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't a JSON array of `T`.
pub fn load_items_str<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeDto;

    #[test]
    fn load_items_str_parses_array() {
        let items: Vec<EmployeeDto> = load_items_str(
            r#"[{"id":"6f9619ff-8b86-d011-b42d-00cf4fc964ff","name":"Ann","age":30,"position":"Dev"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn load_items_str_rejects_object() {
        let result = load_items_str::<EmployeeDto>(r#"{"name":"Ann"}"#);
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_items_missing_file() {
        let result = load_items::<EmployeeDto>(Path::new("/nonexistent/items.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }
}
