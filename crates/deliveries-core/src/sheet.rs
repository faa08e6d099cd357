use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DeliveryError, Result};
use crate::io::atomic_write;
use crate::row::canonical_header;
use crate::store::SheetStore;

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

/// On-disk shape of the sheet: a header row plus raw string records,
/// mirroring the remote-spreadsheet layout (header at row 1, data from
/// row 2) so the row/column numbering contract is exercised for real.
#[derive(Debug, Serialize, Deserialize)]
struct SheetFile {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// LocalSheet
// ---------------------------------------------------------------------------

/// File-backed `SheetStore`. Every mutation rewrites the file atomically;
/// each `write_cell` is an independent, fully-applied-or-reported update.
#[derive(Debug, Clone)]
pub struct LocalSheet {
    path: PathBuf,
}

impl LocalSheet {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Seed a new sheet file with the canonical header. Errors if the file
    /// already exists.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            return Err(DeliveryError::AlreadyInitialized(
                path.display().to_string(),
            ));
        }
        let sheet = Self { path };
        sheet.write(&SheetFile {
            header: canonical_header(),
            rows: Vec::new(),
        })?;
        Ok(sheet)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SheetFile> {
        if !self.path.exists() {
            return Err(DeliveryError::NotInitialized);
        }
        let data = std::fs::read_to_string(&self.path)?;
        let file: SheetFile = serde_yaml::from_str(&data)?;
        Ok(file)
    }

    fn write(&self, file: &SheetFile) -> Result<()> {
        let data = serde_yaml::to_string(file)?;
        atomic_write(&self.path, data.as_bytes())
    }
}

impl SheetStore for LocalSheet {
    fn load(&self) -> Result<Vec<Vec<String>>> {
        let sheet = self.read()?;
        if sheet.header != canonical_header() {
            return Err(DeliveryError::HeaderMismatch {
                expected: canonical_header(),
                found: sheet.header,
            });
        }
        let width = sheet.header.len();
        let rows = sheet
            .rows
            .into_iter()
            .map(|mut record| {
                record.resize(width, String::new());
                record
            })
            .collect();
        Ok(rows)
    }

    fn write_cell(&mut self, row_number: u32, column_index: u32, value: &str) -> Result<()> {
        if row_number < 2 {
            return Err(DeliveryError::InvalidRow(row_number));
        }
        if column_index < 1 {
            return Err(DeliveryError::InvalidColumn(column_index));
        }

        let mut sheet = self.read()?;
        let row = (row_number - 2) as usize;
        let col = (column_index - 1) as usize;
        if col >= sheet.header.len() {
            return Err(DeliveryError::InvalidColumn(column_index));
        }
        let record = sheet
            .rows
            .get_mut(row)
            .ok_or(DeliveryError::InvalidRow(row_number))?;
        if record.len() < sheet.header.len() {
            record.resize(sheet.header.len(), String::new());
        }
        record[col] = value.to_string();

        self.write(&sheet)
    }

    fn append_row(&mut self, values: &[String]) -> Result<()> {
        let mut sheet = self.read()?;
        let mut record = values.to_vec();
        record.resize(sheet.header.len(), String::new());
        sheet.rows.push(record);
        self.write(&sheet)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
