use crate::models::{Event, HistoryRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in CSV output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A record with a fixed, ordered set of exportable fields
///
/// `columns` doubles as the CSV header and as the labels of report lines.
/// `values` must yield exactly one value per column, in the same order.
pub trait ReportRecord {
    fn columns() -> &'static [&'static str];
    fn values(&self) -> Vec<String>;
}

impl ReportRecord for HistoryRecord {
    fn columns() -> &'static [&'static str] {
        &[
            "Volunteer Name",
            "Participation Status",
            "Event Name",
            "Event Description",
            "Location",
            "Required Skills",
            "Urgency",
            "Event Date",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.volunteer_name.clone(),
            self.participation_status.clone(),
            self.event_name.clone(),
            self.event_description.clone(),
            self.location.clone(),
            self.required_skills.join(", "),
            self.urgency.clone(),
            self.event_date.format("%Y-%m-%d").to_string(),
        ]
    }
}

impl ReportRecord for Event {
    fn columns() -> &'static [&'static str] {
        &[
            "Event ID",
            "Event Name",
            "Description",
            "Location",
            "Required Skills",
            "Urgency",
            "Event Date",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            self.location.clone(),
            self.required_skills.join(", "),
            self.urgency.label().to_string(),
            self.event_date.format("%Y-%m-%d").to_string(),
        ]
    }
}

/// Serialize records to CSV
///
/// The first line is the header. Every field is wrapped in double quotes and
/// embedded quotes are doubled, so the output parses back with any RFC 4180
/// reader.
pub fn to_csv<R: ReportRecord>(records: &[R]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::columns())?;
    for record in records {
        writer.write_record(record.values())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Vertical layout of the paginated report, in page units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub title: String,
    pub page_height: u32,
    pub top_margin: u32,
    pub line_height: u32,
    pub record_gap: u32,
    pub page_break_at: u32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title: "Volunteer History Report".to_string(),
            page_height: 297,
            top_margin: 20,
            line_height: 10,
            record_gap: 10,
            page_break_at: 270,
        }
    }
}

/// One page of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub number: usize,
    pub heading: Option<String>,
    pub blocks: Vec<Vec<String>>,
}

impl ReportPage {
    fn new(number: usize) -> Self {
        Self {
            number,
            heading: None,
            blocks: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.heading.iter().count() + self.blocks.iter().map(Vec::len).sum::<usize>()
    }
}

/// Lay records out as `label: value` blocks across pages
///
/// A block that would end past `page_break_at` moves to a fresh page, so a
/// record is never split. A block taller than a whole page still gets a page
/// of its own. Empty input produces a single page with only the heading.
pub fn to_report_pages<R: ReportRecord>(records: &[R], layout: &ReportLayout) -> Vec<ReportPage> {
    let mut pages = Vec::new();
    let mut page = ReportPage::new(1);
    let mut offset = layout.top_margin;

    if !layout.title.is_empty() {
        page.heading = Some(layout.title.clone());
        offset = offset
            .saturating_add(layout.line_height)
            .saturating_add(layout.record_gap);
    }

    for record in records {
        let lines: Vec<String> = R::columns()
            .iter()
            .zip(record.values())
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();

        let line_count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        let height = layout.line_height.saturating_mul(line_count);

        if !page.blocks.is_empty() && offset.saturating_add(height) > layout.page_break_at {
            let number = page.number + 1;
            pages.push(std::mem::replace(&mut page, ReportPage::new(number)));
            offset = layout.top_margin;
        }

        page.blocks.push(lines);
        offset = offset.saturating_add(height).saturating_add(layout.record_gap);
    }

    pages.push(page);
    pages
}

/// Flatten pages into plain text, separated by form feeds
pub fn render_pages(pages: &[ReportPage]) -> String {
    let total = pages.len();

    pages
        .iter()
        .map(|page| {
            let mut out = String::new();
            if let Some(heading) = &page.heading {
                out.push_str(heading);
                out.push_str("\n\n");
            }
            for block in &page.blocks {
                for line in block {
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
            out.push_str(&format!("Page {} of {}\n", page.number, total));
            out
        })
        .collect::<Vec<_>>()
        .join("\u{000C}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_record(event_name: &str, description: &str) -> HistoryRecord {
        HistoryRecord {
            volunteer_id: "v2".to_string(),
            volunteer_name: "Jane Smith".to_string(),
            participation_status: "Completed".to_string(),
            event_name: event_name.to_string(),
            event_description: description.to_string(),
            location: "San Juan, Puerto Rico".to_string(),
            required_skills: vec!["logistics".to_string(), "medical".to_string()],
            urgency: "high".to_string(),
            event_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
        }
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let records = vec![create_record("Hurricane Relief", r#"Cleanup, "supplies""#)];

        let csv = to_csv(&records).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            r#""Volunteer Name","Participation Status","Event Name","Event Description","Location","Required Skills","Urgency","Event Date""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""Jane Smith","Completed","Hurricane Relief","Cleanup, ""supplies""","San Juan, Puerto Rico","logistics, medical","high","2023-05-15""#
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_empty_has_header_only() {
        let csv = to_csv::<HistoryRecord>(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_pages_break_before_overflow() {
        let records: Vec<HistoryRecord> = (0..5)
            .map(|i| create_record(&format!("Event {}", i), "desc"))
            .collect();

        let pages = to_report_pages(&records, &ReportLayout::default());

        // 8 lines per record: 80 units + 10 gap, page one starts after the title
        let per_page: Vec<usize> = pages.iter().map(|p| p.blocks.len()).collect();
        assert_eq!(per_page, vec![2, 2, 1]);
        assert_eq!(pages[0].heading.as_deref(), Some("Volunteer History Report"));
        assert!(pages[1].heading.is_none());
        assert!(pages.iter().flat_map(|p| &p.blocks).all(|b| b.len() == 8));
        assert_eq!(pages[0].blocks[0][2], "Event Name: Event 0");
    }

    #[test]
    fn test_empty_report_is_single_page() {
        let pages = to_report_pages::<HistoryRecord>(&[], &ReportLayout::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].blocks.is_empty());
        assert_eq!(pages[0].line_count(), 1);
    }

    #[test]
    fn test_oversized_record_is_not_split() {
        let layout = ReportLayout {
            page_break_at: 50,
            ..ReportLayout::default()
        };
        let records = vec![create_record("A", "a"), create_record("B", "b")];

        let pages = to_report_pages(&records, &layout);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].blocks.len(), 1);
        assert_eq!(pages[1].blocks.len(), 1);
    }

    #[test]
    fn test_huge_layout_values_do_not_overflow() {
        let layout = ReportLayout {
            line_height: u32::MAX / 4,
            record_gap: u32::MAX,
            ..ReportLayout::default()
        };
        let records = vec![create_record("A", "a"), create_record("B", "b"), create_record("C", "c")];

        let pages = to_report_pages(&records, &layout);

        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.blocks.len() == 1));
    }

    #[test]
    fn test_render_pages() {
        let records = vec![create_record("A", "a")];
        let text = render_pages(&to_report_pages(&records, &ReportLayout::default()));

        assert!(text.starts_with("Volunteer History Report\n\n"));
        assert!(text.contains("Volunteer Name: Jane Smith\n"));
        assert!(text.ends_with("Page 1 of 1\n"));
    }
}
