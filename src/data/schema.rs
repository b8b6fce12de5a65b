use thiserror::Error;

use super::model::SalesTable;

pub const PRODUCT: &str = "Produto";
pub const YEAR_MONTH: &str = "Ano-Mês";
pub const BRANCH: &str = "Filial";
pub const QUANTITY: &str = "Quantidade de Vendas";

/// Columns every upload must carry, by exact name.
pub const REQUIRED_COLUMNS: [&str; 4] = [PRODUCT, YEAR_MONTH, BRANCH, QUANTITY];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "The file must contain the columns: {}; missing: {}",
    REQUIRED_COLUMNS.join(", "),
    .missing.join(", ")
)]
pub struct SchemaError {
    /// Required columns absent from the upload, in `REQUIRED_COLUMNS` order.
    pub missing: Vec<String>,
}

/// Subset test of [`REQUIRED_COLUMNS`] against the table header.
pub fn validate(table: &SalesTable) -> Result<(), SchemaError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}
