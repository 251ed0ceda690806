//! CSV export of scraped products.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::types::Product;

/// CSV header, also the column order of [`Product`].
pub const CSV_HEADER: [&str; 4] = ["title", "link", "price", "size"];

/// Suffix appended to the query to name its export.
pub const EXPORT_SUFFIX: &str = "_grailed_products.csv";

/// Longest file name, in bytes, most filesystems accept.
const MAX_FILE_NAME_BYTES: usize = 255;

/// File name for a query's export: `{query}_grailed_products.csv`.
///
/// Characters that are not valid in a file name (path separators included)
/// are replaced, so the result always names a file directly inside the
/// export directory. Long queries are shortened on a char boundary so the
/// suffix is always kept.
pub fn export_file_name(query: &str) -> String {
    let options = sanitize_filename::Options {
        truncate: false,
        replacement: "_",
        ..Default::default()
    };
    let mut name = sanitize_filename::sanitize_with_options(query, options);

    let max_stem = MAX_FILE_NAME_BYTES - EXPORT_SUFFIX.len();
    if name.len() > max_stem {
        let mut cut = max_stem;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }

    name.push_str(EXPORT_SUFFIX);
    name
}

/// Write `products` to `dir/file_name`, replacing any existing file.
///
/// Creates `dir` if needed and returns the absolute path written. The write
/// is not atomic.
pub fn export_products(dir: &Path, file_name: &str, products: &[Product]) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    let path = dir.join(file_name);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;

    writer.write_record(CSV_HEADER)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush().map_err(|source| io_error(&path, source))?;

    let absolute = fs::canonicalize(&path).map_err(|source| io_error(&path, source))?;
    info!(path = %absolute.display(), rows = products.len(), "Exported products");

    Ok(absolute)
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}
