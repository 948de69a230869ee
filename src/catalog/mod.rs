mod parser;
mod types;

pub use parser::parse_lot_definitions;
pub use types::{LotDataError, LotDefinition};

use once_cell::sync::Lazy;

// Lot definitions compiled into the binary
pub static BUILTIN_LOTS: Lazy<Vec<LotDefinition>> = Lazy::new(|| {
    let content = include_str!("../../data/lots.json");
    parse_lot_definitions(content).unwrap_or_else(|e| {
        tracing::error!("Built-in lot data is invalid: {}", e);
        Vec::new()
    })
});

/// Load lot definitions from a file on disk
pub fn load_lot_file(path: &std::path::Path) -> Result<Vec<LotDefinition>, LotDataError> {
    let content = std::fs::read_to_string(path).map_err(|source| LotDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_lot_definitions(&content)
}
