use crate::util::{lenient_f64, lenient_text, normalize_name, non_empty};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tabled::Tabled;

/// Backend record id. Mongo-style string ids and numeric ids both occur;
/// comparison is strict, so `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    fn from_value(v: Value) -> Option<RecordId> {
        match v {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => RecordId::Int(i),
                None => RecordId::Text(n.to_string()),
            }),
            Value::String(s) => Some(RecordId::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        RecordId::Int(v)
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        RecordId::Text(v.to_string())
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.and_then(RecordId::from_value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContributionStatus {
    Completed,
    Pending,
    Failed,
}

impl ContributionStatus {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => Some(ContributionStatus::Completed),
            "pending" => Some(ContributionStatus::Pending),
            "failed" => Some(ContributionStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentType {
    Online,
    Cash,
}

impl PaymentType {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Some(PaymentType::Online),
            "cash" => Some(PaymentType::Cash),
            _ => None,
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<ContributionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref()
        .and_then(Value::as_str)
        .and_then(ContributionStatus::parse))
}

fn lenient_payment_type<'de, D>(deserializer: D) -> Result<Option<PaymentType>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(Value::as_str).and_then(PaymentType::parse))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub donor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub donor_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tower_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub flat_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub number_of_coupons: Option<f64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub campaign_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<ContributionStatus>,
    #[serde(default, rename = "type", deserialize_with = "lenient_payment_type")]
    pub payment_type: Option<PaymentType>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sponsorship_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub festival_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub vendor_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub expense_head: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub festival_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub outstanding_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount_paid: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub goal: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub campaign_id: Option<RecordId>,
}

/// Identity of a donor: normalized name plus tower and flat.
///
/// Kept as a tuple of parts rather than a joined string so that names
/// containing `-` cannot collide with other tower/flat combinations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonorKey {
    pub name: String,
    pub tower: String,
    pub flat: String,
}

impl DonorKey {
    /// `None` when any of name, tower or flat is missing or blank.
    pub fn from_contribution(c: &Contribution) -> Option<DonorKey> {
        let name = non_empty(&c.donor_name)?;
        let tower = non_empty(&c.tower_number)?;
        let flat = non_empty(&c.flat_number)?;
        Some(DonorKey {
            name: normalize_name(name),
            tower: tower.to_string(),
            flat: flat.to_string(),
        })
    }
}

impl fmt::Display for DonorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.tower, self.flat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    #[serde(skip)]
    pub key: DonorKey,
    pub name: String,
    pub tower_number: String,
    pub flat_number: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub total_contributed: f64,
    pub contribution_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub raised: f64,
    pub progress: f64,
    pub donor_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    pub rank: usize,
    pub label: String,
    pub total: f64,
    pub percentage: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingPayment {
    #[serde(flatten)]
    pub expense: Expense,
    pub vendor_name: String,
    pub outstanding: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingReport {
    pub payments: Vec<OutstandingPayment>,
    pub total_outstanding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_contributions: f64,
    pub total_sponsorships: f64,
    pub total_raised: f64,
}

/// Count and amount for one bucket of a dashboard breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub label: String,
    pub count: usize,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub totals: Totals,
    pub contribution_count: usize,
    pub donor_count: usize,
    pub sponsor_count: usize,
    pub total_coupons: f64,
    pub total_expenses: f64,
    pub total_outstanding: f64,
    pub net_balance: f64,
    pub by_status: Vec<Tally>,
    pub by_type: Vec<Tally>,
    pub top_donors: Vec<Donor>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DonorRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Donor")]
    #[tabled(rename = "Donor")]
    pub name: String,
    #[serde(rename = "Tower")]
    #[tabled(rename = "Tower")]
    pub tower: String,
    #[serde(rename = "Flat")]
    #[tabled(rename = "Flat")]
    pub flat: String,
    #[serde(rename = "Email")]
    #[tabled(rename = "Email")]
    pub email: String,
    #[serde(rename = "Mobile")]
    #[tabled(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "TotalContributed")]
    #[tabled(rename = "TotalContributed")]
    pub total_contributed: String,
    #[serde(rename = "Contributions")]
    #[tabled(rename = "Contributions")]
    pub contributions: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CampaignProgressRow {
    #[serde(rename = "Campaign")]
    #[tabled(rename = "Campaign")]
    pub campaign: String,
    #[serde(rename = "Goal")]
    #[tabled(rename = "Goal")]
    pub goal: String,
    #[serde(rename = "Raised")]
    #[tabled(rename = "Raised")]
    pub raised: String,
    #[serde(rename = "ProgressPct")]
    #[tabled(rename = "ProgressPct")]
    pub progress: String,
    #[serde(rename = "Donors")]
    #[tabled(rename = "Donors")]
    pub donors: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BreakdownRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "ExpenseHead")]
    #[tabled(rename = "ExpenseHead")]
    pub expense_head: String,
    #[serde(rename = "TotalCost")]
    #[tabled(rename = "TotalCost")]
    pub total_cost: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share: String,
    #[serde(rename = "Color")]
    #[tabled(rename = "Color")]
    pub color: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct OutstandingRow {
    #[serde(rename = "Expense")]
    #[tabled(rename = "Expense")]
    pub expense: String,
    #[serde(rename = "Vendor")]
    #[tabled(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "ExpenseHead")]
    #[tabled(rename = "ExpenseHead")]
    pub expense_head: String,
    #[serde(rename = "TotalCost")]
    #[tabled(rename = "TotalCost")]
    pub total_cost: String,
    #[serde(rename = "AmountPaid")]
    #[tabled(rename = "AmountPaid")]
    pub amount_paid: String,
    #[serde(rename = "Outstanding")]
    #[tabled(rename = "Outstanding")]
    pub outstanding: String,
}

/// Every list the backend hands over, as loaded for one reporting run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub contributions: Vec<Contribution>,
    pub sponsors: Vec<Sponsor>,
    pub expenses: Vec<Expense>,
    pub vendors: Vec<Vendor>,
    pub campaigns: Vec<Campaign>,
    pub festivals: Vec<Festival>,
}
