// Document path utilities.
// Maps the products/{product}/repos/{id} collection hierarchy onto the filesystem.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything but ASCII alphanumerics, `-` and `_` is escaped, `%` and `.` included.
const NAME_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Stands in for the empty name; a lone `%` is never produced by escaping.
const EMPTY_NAME: &str = "%";

/// File extension of repository documents.
pub const DOCUMENT_EXT: &str = "json";

/// Directory holding every product collection.
pub fn products_dir(root: &Path) -> PathBuf {
    root.join("products")
}

/// Path to a product's document directory.
pub fn product_dir(root: &Path, product: &str) -> PathBuf {
    products_dir(root).join(encode_name(product))
}

/// Path to a product's `repos` collection.
pub fn repos_dir(root: &Path, product: &str) -> PathBuf {
    product_dir(root, product).join("repos")
}

/// Path to a single repository document.
pub fn repo_path(root: &Path, product: &str, id: &str) -> PathBuf {
    repos_dir(root, product).join(format!("{}.{}", encode_name(id), DOCUMENT_EXT))
}

/// Escape a product or id into a single path component.
/// Distinct names always give distinct components.
pub fn encode_name(name: &str) -> String {
    if name.is_empty() {
        return EMPTY_NAME.to_string();
    }
    utf8_percent_encode(name, NAME_ESCAPES).to_string()
}

/// Reverse [`encode_name`]. `None` for components this store did not write.
pub fn decode_name(component: &str) -> Option<String> {
    if component == EMPTY_NAME {
        return Some(String::new());
    }

    let name = percent_decode_str(component).decode_utf8().ok()?.into_owned();
    (encode_name(&name) == component).then_some(name)
}
