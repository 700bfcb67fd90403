use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub card_id: Option<String>,
    pub closing_day: u32,
    pub due_day: Option<u32>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleData {
    pub purchased_on: String,
    pub card: CardData,
    pub reference_month: String,
    pub months_ahead: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitData {
    pub total: String,
    pub count: u32,
    pub base_amount: String,
    pub final_amount: String,
    pub final_adjustment: String,
    pub amounts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentRow {
    pub sequence: u32,
    pub amount: String,
    pub reference_month: String,
    pub due_on: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub total: String,
    pub count: u32,
    pub purchased_on: String,
    pub card: CardData,
    pub first_reference_month: Option<String>,
    pub last_due_on: Option<String>,
    pub installments: Vec<InstallmentRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceTotalData {
    pub source: String,
    pub card_id: String,
    pub reference_month: String,
    pub total: String,
    pub record_count: usize,
    pub records_read: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRow {
    pub card_id: String,
    pub reference_month: String,
    pub total: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListData {
    pub source: String,
    pub records_read: usize,
    pub unassigned_count: usize,
    pub unassigned_total: String,
    pub rows: Vec<InvoiceRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCheckData {
    pub status: String,
    pub due_on: Option<String>,
    pub evaluated_at: String,
    pub days_until_due: Option<i64>,
    pub bucket: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub paid: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub normal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub row: usize,
    pub card_id: Option<String>,
    pub reference_month: String,
    pub amount: String,
    pub status: String,
    pub due_on: Option<String>,
    pub days_until_due: Option<i64>,
    pub bucket: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusListData {
    pub source: String,
    pub evaluated_at: String,
    pub records_read: usize,
    pub counts: StatusCounts,
    pub rows: Vec<StatusRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardRow {
    pub card_id: String,
    pub closing_day: u32,
    pub due_day: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardListData {
    pub profiles_path: String,
    pub profiles_found: bool,
    pub cards: Vec<CardRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub row: usize,
    pub field: String,
    pub code: String,
    pub description: String,
}

impl RecordIssue {
    pub fn new(row: usize, field: &str, code: &str, description: &str) -> Self {
        Self {
            row,
            field: field.to_string(),
            code: code.to_string(),
            description: description.to_string(),
        }
    }
}
