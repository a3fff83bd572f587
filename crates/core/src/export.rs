//! Student progress export as delimited text.
//!
//! Fields are quoted per RFC 4180 whenever they contain the delimiter, a
//! quote, or a line break, so customer names like `Doe, Jane` survive.

use std::borrow::Cow;

use crate::types::Timestamp;

/// Column header of the progress export, in output order.
pub const PROGRESS_EXPORT_HEADER: [&str; 9] = [
    "Customer Name",
    "Phone",
    "Access Code",
    "Completed Sessions",
    "Progress %",
    "Current Course",
    "Current Session",
    "Login Count",
    "Last Activity",
];

/// Placeholder for a progress row whose access code no longer resolves.
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Placeholder for a learner who has not opened any session yet.
pub const NOT_STARTED: &str = "Not started";

/// One learner's line in the progress export.
#[derive(Debug, Clone)]
pub struct ProgressExportRow {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub access_code: String,
    pub completed_sessions: usize,
    pub progress_percent: i32,
    pub current_course: Option<String>,
    pub current_session: Option<String>,
    pub login_count: i32,
    pub last_activity: Timestamp,
}

impl ProgressExportRow {
    fn fields(&self) -> [String; 9] {
        [
            self.customer_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            self.customer_phone
                .clone()
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            self.access_code.clone(),
            self.completed_sessions.to_string(),
            self.progress_percent.to_string(),
            self.current_course
                .clone()
                .unwrap_or_else(|| NOT_STARTED.to_string()),
            self.current_session
                .clone()
                .unwrap_or_else(|| NOT_STARTED.to_string()),
            self.login_count.to_string(),
            self.last_activity.to_rfc3339(),
        ]
    }
}

/// Quote a single field if it needs it.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Append one CRLF-terminated record to `out`.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push_str("\r\n");
}

/// Render the full progress export: header plus one record per row.
pub fn render_progress_csv(rows: &[ProgressExportRow]) -> String {
    let mut out = String::new();
    write_record(&mut out, &PROGRESS_EXPORT_HEADER);
    for row in rows {
        write_record(&mut out, &row.fields());
    }
    out
}

/// Download filename for an export generated at `now`.
pub fn progress_export_filename(now: Timestamp) -> String {
    format!("student-progress-{}.csv", now.format("%Y-%m-%d"))
}
