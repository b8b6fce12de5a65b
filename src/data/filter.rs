use super::model::{CellValue, SalesTable};
use super::schema::{BRANCH, PRODUCT};

// ---------------------------------------------------------------------------
// Selectable values and the chosen (product, branch) pair
// ---------------------------------------------------------------------------

/// Sorted, duplicate-free options for the two selection controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChoices {
    pub products: Vec<CellValue>,
    pub branches: Vec<CellValue>,
}

/// One product and one branch, compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product: CellValue,
    pub branch: CellValue,
}

impl FilterChoices {
    /// Collect the options from a validated table.
    pub fn from_table(table: &SalesTable) -> Self {
        FilterChoices {
            products: table.unique_values(PRODUCT).into_iter().collect(),
            branches: table.unique_values(BRANCH).into_iter().collect(),
        }
    }

    /// Resolve the stored choices against the current options.
    ///
    /// A stored value survives when it is still offered; otherwise the first
    /// sorted option is used.  `None` when either list is empty.
    pub fn resolve(
        &self,
        product: Option<&CellValue>,
        branch: Option<&CellValue>,
    ) -> Option<Selection> {
        Some(Selection {
            product: pick(&self.products, product)?,
            branch: pick(&self.branches, branch)?,
        })
    }
}

fn pick(options: &[CellValue], stored: Option<&CellValue>) -> Option<CellValue> {
    stored
        .filter(|v| options.contains(v))
        .or_else(|| options.first())
        .cloned()
}

/// Indices of rows matching both halves of `selection`, in table order.
pub fn matching_rows(table: &SalesTable, selection: &Selection) -> Vec<usize> {
    let (Some(p_idx), Some(b_idx)) = (table.column_index(PRODUCT), table.column_index(BRANCH))
    else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row[p_idx] == selection.product && row[b_idx] == selection.branch)
        .map(|(i, _)| i)
        .collect()
}
