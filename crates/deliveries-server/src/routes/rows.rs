use axum::extract::State;
use axum::Json;
use std::str::FromStr;

use deliveries_core::date;
use deliveries_core::row::{sheet_row_number, DeliveryRow, Snapshot, HEADER};
use deliveries_core::store::{commit_plan, SheetStore};
use deliveries_core::sync::diff_and_plan;
use deliveries_core::types::{Frequency, Priority, Status};
use deliveries_core::{sheet::LocalSheet, DeliveryError};

use crate::error::AppError;
use crate::state::AppState;

/// Widget hints for the editable grid: checkbox for Done, fixed-choice
/// selectors for Frequency/Status/Priority, free text for Notes.
fn widget_hints() -> serde_json::Value {
    serde_json::json!({
        "Due": { "widget": "date" },
        "Frequency": {
            "widget": "select",
            "choices": Frequency::all().iter().map(|f| f.as_str()).collect::<Vec<_>>(),
        },
        "Done": { "widget": "checkbox" },
        "Status": {
            "widget": "select",
            "choices": Status::all().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        },
        "Priority": {
            "widget": "select",
            "choices": Priority::all().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        },
        "Notes": { "widget": "text" },
    })
}

// ---------------------------------------------------------------------------
// GET /api/rows
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct RowView {
    row_number: u32,
    #[serde(flatten)]
    row: DeliveryRow,
}

/// GET /api/rows — the current snapshot plus widget hints and any due-date
/// parse warnings.
pub async fn list_rows(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let sheet = app.sheet.clone();
    let snapshot = tokio::task::spawn_blocking(move || {
        let store = LocalSheet::open(sheet);
        let records = store.load()?;
        Ok::<_, DeliveryError>(Snapshot::from_records(&records))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let rows: Vec<RowView> = snapshot
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| RowView {
            row_number: sheet_row_number(i),
            row,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "header": HEADER,
        "rows": rows,
        "warnings": snapshot.warnings,
        "widgets": widget_hints(),
    })))
}

// ---------------------------------------------------------------------------
// PUT /api/rows
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
pub struct EditedSnapshotBody {
    pub rows: Vec<DeliveryRow>,
}

/// PUT /api/rows — submit the edited snapshot. The original is reloaded
/// from the store, diffed, and the resulting write ops are committed one
/// by one. Per-op failures are reported, not fatal. Fires a single reload
/// event if anything landed.
pub async fn submit_rows(
    State(app): State<AppState>,
    Json(body): Json<EditedSnapshotBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sheet = app.sheet.clone();
    let (plan, outcome) = tokio::task::spawn_blocking(move || {
        let mut store = LocalSheet::open(sheet);
        let records = store.load()?;
        let original = Snapshot::from_records(&records);
        let plan = diff_and_plan(&original.rows, &body.rows);
        let outcome = commit_plan(&mut store, &plan);
        Ok::<_, DeliveryError>((plan, outcome))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if outcome.reload {
        app.request_reload();
    }

    Ok(Json(serde_json::json!({
        "ops": plan.ops,
        "warnings": plan.warnings,
        "reports": outcome.reports,
        "failed": outcome.failed(),
        "reload": outcome.reload,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/rows
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize, Default)]
pub struct AddRowBody {
    pub due: Option<String>,
    pub frequency: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// POST /api/rows — append a new delivery. Input vocabulary is validated
/// (the grid widgets are fixed-choice); due dates are stored in canonical
/// ISO form.
pub async fn append_row(
    State(app): State<AppState>,
    Json(body): Json<AddRowBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let row = build_row(&body)?;

    let sheet = app.sheet.clone();
    let cells = row.to_cells();
    let row_number = tokio::task::spawn_blocking(move || {
        let mut store = LocalSheet::open(sheet);
        let existing = store.load()?.len();
        store.append_row(&cells)?;
        Ok::<_, DeliveryError>(sheet_row_number(existing))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    app.request_reload();

    Ok(Json(serde_json::json!({
        "row_number": row_number,
        "row": row,
    })))
}

fn build_row(body: &AddRowBody) -> Result<DeliveryRow, AppError> {
    let due = match body.due.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(date::parse_due(text)?),
        _ => None,
    };
    let frequency = match body.frequency.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => Frequency::from_str(label)?.as_str().to_string(),
        _ => String::new(),
    };
    let status = match body.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Status::from_str(s)?,
        _ => Status::NotStarted,
    };
    let priority = match body.priority.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => Priority::from_str(p)?,
        _ => Priority::Medium,
    };

    Ok(DeliveryRow {
        due,
        due_text: due.map(date::format_due).unwrap_or_default(),
        frequency,
        done: false,
        status: status.to_string(),
        priority: priority.to_string(),
        notes: body.notes.clone().unwrap_or_default(),
    })
}
