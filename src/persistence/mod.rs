use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::Result;

const APP_NAME: &str = "field-state";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json_to<T: Serialize>(data: &T, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    log::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

/// Missing files load as `T::default()`.
pub fn load_json_from<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> Result<T> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default_from<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json_from::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<()> {
    save_json_to(data, &get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    load_json_or_default_from(&get_data_file_path(filename))
}

pub fn delete_data_file(file_path: &Path) -> Result<()> {
    if file_path.exists() {
        fs::remove_file(file_path)?;
        log::debug!("Deleted: {}", file_path.display());
    }
    Ok(())
}
