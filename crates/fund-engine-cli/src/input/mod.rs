pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed request from `--input <file>` or piped stdin, in that order.
/// `Ok(None)` means neither was supplied and the caller should fall back to flags.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    stdin::read_stdin()
}
