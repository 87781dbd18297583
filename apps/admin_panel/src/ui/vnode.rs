//! Virtual node tree and the DOM operations the controller emits.

use std::fmt::Write as _;

use shared::domain::EmployeeId;

use crate::ui::chart::ChartSpec;

/// Page areas the panel draws into. `dom_id` names the element a browser
/// sink would target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TableBody,
    Pagination,
    StatTotal,
    StatActive,
    StatInactive,
    StatOnVacation,
    RolesChart,
    Modal,
}

impl Region {
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::TableBody => "empleados-table-body",
            Self::Pagination => "pagination-container",
            Self::StatTotal => "total-empleados",
            Self::StatActive => "empleados-activos",
            Self::StatInactive => "empleados-inactivos",
            Self::StatOnVacation => "empleados-vacaciones",
            Self::RolesChart => "roles-chart",
            Self::Modal => "empleadoModal",
        }
    }
}

/// Click handlers carried as data instead of inline script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ChangePage(u32),
    ViewEmployee(EmployeeId),
    EditEmployee(EmployeeId),
}

impl Action {
    fn encode(self) -> String {
        match self {
            Self::ChangePage(page) => format!("change-page:{page}"),
            Self::ViewEmployee(id) => format!("view-employee:{id}"),
            Self::EditEmployee(id) => format!("edit-employee:{id}"),
        }
    }

    /// Reads back a `data-action` value.
    pub fn decode(raw: &str) -> Option<Self> {
        let (name, arg) = raw.trim().split_once(':')?;
        match name {
            "change-page" => arg.parse().ok().map(Self::ChangePage),
            "view-employee" => arg.parse().ok().map(|id| Self::ViewEmployee(EmployeeId(id))),
            "edit-employee" => arg.parse().ok().map(|id| Self::EditEmployee(EmployeeId(id))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub action: Option<Action>,
    pub children: Vec<VNode>,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        classes: Vec::new(),
        attrs: Vec::new(),
        action: None,
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> VNode {
    VNode::Text(value.into())
}

const VOID_TAGS: &[&str] = &["input", "br", "hr"];
const BLOCK_TAGS: &[&str] = &["div", "p", "nav", "form", "tr", "tbody", "table", "ul", "h5"];

impl Element {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        for name in class.into().split_whitespace() {
            self.classes.push(name.to_string());
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn child(mut self, node: impl Into<VNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<VNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_interactive(&self) -> bool {
        self.action.is_some()
    }
}

impl From<Element> for VNode {
    fn from(value: Element) -> Self {
        VNode::Element(value)
    }
}

impl VNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(element) => Some(element),
            VNode::Text(_) => None,
        }
    }

    /// Depth-first search over every element, including `self`.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let VNode::Element(element) = self {
            if predicate(element) {
                found.push(element);
            }
            for child in &element.children {
                child.collect(predicate, found);
            }
        }
    }

    /// Concatenated text content, like `Node.textContent`.
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(value) => value.clone(),
            VNode::Element(element) => element
                .children
                .iter()
                .map(VNode::text_content)
                .collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            VNode::Text(value) => out.push_str(&escape(value)),
            VNode::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                if !element.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
                }
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                if let Some(action) = element.action {
                    let _ = write!(out, " data-action=\"{}\"", action.encode());
                }
                if VOID_TAGS.contains(&element.tag) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Plain-text rendering for terminals. Interactive elements are bracketed,
    /// the active pagination item is starred.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out.lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_text(&self, out: &mut String) {
        let element = match self {
            VNode::Text(value) => {
                out.push_str(value.trim());
                return;
            }
            VNode::Element(element) => element,
        };

        match element.tag {
            "tr" => {
                let cells: Vec<String> = element
                    .children
                    .iter()
                    .map(|cell| {
                        let mut buf = String::new();
                        cell.write_text(&mut buf);
                        buf
                    })
                    .collect();
                out.push_str(&cells.join(" | "));
                out.push('\n');
            }
            "input" => {
                let _ = write!(out, "[{}]", element.attr_value("value").unwrap_or_default());
            }
            "i" => {}
            "li" if element.has_class("active") => {
                out.push('*');
                for child in &element.children {
                    child.write_text(out);
                }
                out.push_str("* ");
            }
            _ => {
                let bracket = element.is_interactive();
                if bracket {
                    out.push('[');
                }
                let content_start = out.len();
                for child in &element.children {
                    if out.len() > content_start && !out.ends_with(['\n', ' ']) {
                        out.push(' ');
                    }
                    child.write_text(out);
                }
                if bracket {
                    out.push(']');
                }
                if element.tag == "li" {
                    out.push(' ');
                } else if BLOCK_TAGS.contains(&element.tag) && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// One mutation of the page. Rendering functions return these; sinks apply them.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    Replace { region: Region, node: VNode },
    SetText { region: Region, text: String },
    DrawChart(ChartSpec),
    ShowModal { title: String, body: VNode },
    Alert { message: String },
}

pub trait RenderSink: Send + Sync {
    fn apply(&self, ops: Vec<DomOp>);
}

#[cfg(test)]
#[path = "tests/vnode_tests.rs"]
mod tests;
