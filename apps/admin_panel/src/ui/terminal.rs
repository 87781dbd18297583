use std::io::{self, Write};

use crate::ui::vnode::{DomOp, Region, RenderSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// Prints render output to stdout; alerts go to stderr.
#[derive(Debug, Default)]
pub struct TerminalSink {
    format: OutputFormat,
}

impl TerminalSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_op(&self, op: &DomOp) -> String {
        match op {
            DomOp::Replace { region, node } => {
                let body = match self.format {
                    OutputFormat::Text => node.to_text(),
                    OutputFormat::Html => node.to_html(),
                };
                format!("== {} ==\n{body}", region.dom_id())
            }
            DomOp::SetText { region, text } => format!("{}: {text}", region.dom_id()),
            DomOp::DrawChart(chart) => {
                format!("== {} ==\n{}", Region::RolesChart.dom_id(), chart.to_text())
            }
            DomOp::ShowModal { title, body } => {
                let body = match self.format {
                    OutputFormat::Text => body.to_text(),
                    OutputFormat::Html => body.to_html(),
                };
                format!("== {title} ==\n{body}")
            }
            DomOp::Alert { message } => format!("[error] {message}"),
        }
    }
}

impl RenderSink for TerminalSink {
    fn apply(&self, ops: Vec<DomOp>) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for op in &ops {
            let rendered = self.format_op(op);
            if matches!(op, DomOp::Alert { .. }) {
                eprintln!("{rendered}");
            } else {
                let _ = writeln!(out, "{rendered}");
            }
        }
        let _ = out.flush();
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
