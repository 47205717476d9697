//! Report selection and CSV export.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use deskerp_core::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Sales,
    Inventory,
    Financial,
    Customer,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Sales,
        ReportKind::Inventory,
        ReportKind::Financial,
        ReportKind::Customer,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Sales => "sales",
            ReportKind::Inventory => "inventory",
            ReportKind::Financial => "financial",
            ReportKind::Customer => "customer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Sales => "Sales Report",
            ReportKind::Inventory => "Inventory Report",
            ReportKind::Financial => "Financial Report",
            ReportKind::Customer => "Customer Report",
        }
    }
}

impl FromStr for ReportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown report type: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Week,
        ReportPeriod::Month,
        ReportPeriod::Quarter,
        ReportPeriod::Year,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Quarter => "quarter",
            ReportPeriod::Year => "year",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportPeriod::Week => "This Week",
            ReportPeriod::Month => "This Month",
            ReportPeriod::Quarter => "This Quarter",
            ReportPeriod::Year => "This Year",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.slug() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown report period: {s}")))
    }
}

/// Report type + time period picked on the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSelection {
    pub kind: ReportKind,
    pub period: ReportPeriod,
}

impl ReportSelection {
    pub fn new(kind: ReportKind, period: ReportPeriod) -> Self {
        Self { kind, period }
    }
}

/// Tabular data that can be written into an export's data section.
pub trait ReportSource {
    fn columns(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

/// A generated CSV document, ready for the UI shell to offer as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

impl CsvExport {
    /// Build the export for `selection`.
    ///
    /// Layout: a metadata header row, one metadata row (slugs + ISO date), a
    /// blank line, then `source`'s columns and rows.
    pub fn build(
        selection: ReportSelection,
        generated_on: NaiveDate,
        source: &dyn ReportSource,
    ) -> Self {
        let mut lines = vec![
            "Report Type,Period,Generated Date".to_string(),
            format!(
                "{},{},{}",
                selection.kind.slug(),
                selection.period.slug(),
                generated_on.format("%Y-%m-%d")
            ),
            String::new(),
        ];

        lines.push(join_row(source.columns().iter().copied()));
        let rows = source.rows();
        let row_count = rows.len();
        for row in rows {
            lines.push(join_row(row.iter().map(String::as_str)));
        }

        tracing::info!(
            report = selection.kind.slug(),
            period = selection.period.slug(),
            rows = row_count,
            "report exported"
        );

        Self {
            file_name: format!(
                "{}_report_{}.csv",
                selection.kind.slug(),
                selection.period.slug()
            ),
            content: lines.join("\n") + "\n",
        }
    }
}

fn join_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(escape_field).collect::<Vec<_>>().join(",")
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl ReportSource for Fixed {
        fn columns(&self) -> Vec<&'static str> {
            vec!["Name", "Note"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            vec![
                vec!["Desk Lamp".to_string(), "plain".to_string()],
                vec!["Chair, Office".to_string(), "says \"hi\"".to_string()],
            ]
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn file_name_uses_slugs() {
        let export = CsvExport::build(ReportSelection::default(), date(), &Fixed);
        assert_eq!(export.file_name, "sales_report_month.csv");

        let selection = ReportSelection::new(ReportKind::Financial, ReportPeriod::Quarter);
        let export = CsvExport::build(selection, date(), &Fixed);
        assert_eq!(export.file_name, "financial_report_quarter.csv");
    }

    #[test]
    fn content_has_metadata_then_data() {
        let selection = ReportSelection::new(ReportKind::Inventory, ReportPeriod::Week);
        let export = CsvExport::build(selection, date(), &Fixed);
        let lines: Vec<&str> = export.content.lines().collect();

        assert_eq!(lines[0], "Report Type,Period,Generated Date");
        assert_eq!(lines[1], "inventory,week,2024-01-16");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Name,Note");
        assert_eq!(lines[4], "Desk Lamp,plain");
        assert_eq!(lines[5], "\"Chair, Office\",\"says \"\"hi\"\"\"");
    }

    #[test]
    fn slugs_parse() {
        assert_eq!("customer".parse::<ReportKind>().unwrap(), ReportKind::Customer);
        assert_eq!("year".parse::<ReportPeriod>().unwrap(), ReportPeriod::Year);
        assert!("Sales".parse::<ReportKind>().is_err());
        assert!("decade".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn titles_match_dropdowns() {
        assert_eq!(ReportKind::Sales.title(), "Sales Report");
        assert_eq!(ReportPeriod::Quarter.title(), "This Quarter");
    }
}
