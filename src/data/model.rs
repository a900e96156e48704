use std::fmt;

/// Name of the independent-variable column after header trimming.
pub const KEY_COLUMN: &str = "Size";

// ---------------------------------------------------------------------------
// Column – one named column of the timing table
// ---------------------------------------------------------------------------

/// A single column of the source table. `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed timing table. Columns keep their source order and every column
/// holds exactly `rows` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from columns of equal length.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let rows = columns.first().map_or(0, |c| c.values.len());
        debug_assert!(columns.iter().all(|c| c.values.len() == rows));
        Dataset { columns, rows }
    }

    /// Strip leading/trailing whitespace from every column name.
    pub fn normalize_headers(self) -> Self {
        let columns = self
            .columns
            .into_iter()
            .map(|c| Column {
                name: c.name.trim().to_string(),
                values: c.values,
            })
            .collect();
        Dataset {
            columns,
            rows: self.rows,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look a column up by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The x-axis column, if present.
    pub fn key_column(&self) -> Option<&Column> {
        self.column(KEY_COLUMN)
    }

    /// Every column other than the key column, in source order.
    pub fn series_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.name != KEY_COLUMN)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows × {} columns {:?}",
            self.rows,
            self.columns.len(),
            self.column_names()
        )
    }
}
