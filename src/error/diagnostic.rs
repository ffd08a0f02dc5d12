use tracing::debug;

use crate::{error::Message, types::TypeContext};

pub struct Report {
    pub message: String,
    info: Option<String>, // Additional info if any
}

impl Report {
    /// Create new plain string error.
    pub fn error(msg: &str) -> Self {
        Self {
            message: msg.to_owned(),
            info: None,
        }
    }

    /// Append info message to this Report. Returns self for chaining.
    pub fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    fn render(&self) -> String {
        match &self.info {
            Some(info) => format!("error: {}\n    | {}\n", self.message, info),
            None => format!("error: {}\n", self.message),
        }
    }
}

/// Receives diagnostics from the type engine. The engine only supplies the
/// message and the context it needs; the receiver decides how to format
/// and store it.
pub trait ReportingContext {
    fn report(&mut self, ctx: &TypeContext, message: Message);
}

pub struct Diagnostics {
    reports: Vec<Report>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn get(&self, index: usize) -> &Report {
        &self.reports[index]
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn num_errors(&self) -> usize {
        self.reports.len()
    }

    pub fn add(&mut self, report: Report) {
        self.reports.push(report);
    }

    pub fn render(&self) -> String {
        let mut s = String::new();
        for report in &self.reports {
            s += &report.render();
        }

        s
    }
}

impl ReportingContext for Diagnostics {
    fn report(&mut self, ctx: &TypeContext, message: Message) {
        debug!("reporting: {:?}", message);
        let report = Report::error(&message.render(ctx));
        self.add(match message.info(ctx) {
            Some(info) => report.with_info(&info),
            None => report,
        });
    }
}
