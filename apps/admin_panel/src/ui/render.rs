//! Pure render functions: data in, DOM operations out.

use shared::{
    domain::{Employee, EmployeeStatus},
    protocol::{PageResult, Pagination, Stats},
};

use crate::ui::{
    chart::roles_chart,
    vnode::{el, text, Action, DomOp, Element, Region, VNode},
};

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    View,
    Edit,
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

pub fn status_badge(status: &EmployeeStatus) -> Element {
    el("span")
        .class(format!("badge badge-{}", status.badge_class()))
        .text(status.as_str())
}

fn icon_button(class: &str, icon: &str, label: &str, action: Action) -> Element {
    el("button")
        .class(format!("btn btn-sm {class}"))
        .attr("title", label)
        .on_click(action)
        .child(el("i").class(format!("fas {icon}")))
        .child(el("span").class("sr-only").text(label))
}

pub fn employee_row(employee: &Employee) -> VNode {
    let cell = |value: String| el("td").text(value);
    el("tr")
        .attr("data-employee-id", employee.id.to_string())
        .child(cell(employee.id.to_string()))
        .child(cell(employee.full_name()))
        .child(cell(employee.role.clone()))
        .child(cell(employee.work_schedule.clone()))
        .child(el("td").child(status_badge(&employee.status)))
        .child(cell(or_placeholder(employee.email.as_deref())))
        .child(cell(or_placeholder(employee.phone.as_deref())))
        .child(
            el("td")
                .child(icon_button(
                    "btn-info",
                    "fa-eye",
                    "View",
                    Action::ViewEmployee(employee.id),
                ))
                .child(icon_button(
                    "btn-warning",
                    "fa-edit",
                    "Edit",
                    Action::EditEmployee(employee.id),
                )),
        )
        .into()
}

pub fn render_table(employees: &[Employee]) -> VNode {
    el("tbody")
        .attr("id", Region::TableBody.dom_id())
        .children(employees.iter().map(employee_row))
        .into()
}

pub fn showing_caption(pagination: &Pagination) -> String {
    let (first, last) = pagination.showing_range();
    format!(
        "Showing {first} to {last} of {} employees",
        pagination.total
    )
}

fn page_link(label: String, page: u32) -> Element {
    el("li").class("page-item").child(
        el("a")
            .class("page-link")
            .attr("href", "#")
            .on_click(Action::ChangePage(page))
            .text(label),
    )
}

/// Previous/next controls plus one control per page, no windowing.
pub fn render_pagination(pagination: &Pagination) -> VNode {
    let mut items = Vec::new();

    if pagination.has_previous() {
        items.push(page_link("Previous".into(), pagination.page - 1));
    }

    for page in 1..=pagination.page_count() {
        if page == pagination.page || (pagination.pages == 0 && page == 1) {
            items.push(
                el("li")
                    .class("page-item active")
                    .child(el("span").class("page-link").text(page.to_string())),
            );
        } else {
            items.push(page_link(page.to_string(), page));
        }
    }

    if pagination.has_next() {
        items.push(page_link("Next".into(), pagination.page + 1));
    }

    el("div")
        .attr("id", Region::Pagination.dom_id())
        .child(
            el("nav").attr("aria-label", "Employee pagination").child(
                el("ul")
                    .class("pagination justify-content-center")
                    .children(items),
            ),
        )
        .child(
            el("div")
                .class("text-center mt-2")
                .child(el("small").class("text-muted").text(showing_caption(pagination))),
        )
        .into()
}

pub fn render_page(result: &PageResult) -> Vec<DomOp> {
    vec![
        DomOp::Replace {
            region: Region::TableBody,
            node: render_table(&result.employees),
        },
        DomOp::Replace {
            region: Region::Pagination,
            node: render_pagination(&result.pagination),
        },
    ]
}

pub fn render_stats(stats: &Stats) -> Vec<DomOp> {
    let counters = [
        (Region::StatTotal, stats.headcount.total),
        (Region::StatActive, stats.headcount.active),
        (Region::StatInactive, stats.headcount.inactive),
        (Region::StatOnVacation, stats.headcount.on_vacation),
    ];
    counters
        .into_iter()
        .map(|(region, count)| DomOp::SetText {
            region,
            text: count.to_string(),
        })
        .chain(std::iter::once(DomOp::DrawChart(roles_chart(&stats.roles))))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

pub fn detail_fields(employee: &Employee) -> Vec<DetailField> {
    let field = |name, label, value: String| DetailField { name, label, value };
    vec![
        field("id", "ID", employee.id.to_string()),
        field("nombre", "First name", employee.first_name.clone()),
        field("apellido", "Last name", employee.last_name.clone()),
        field("rol", "Role", employee.role.clone()),
        field("estado", "Status", employee.status.to_string()),
        field("email", "Email", or_placeholder(employee.email.as_deref())),
        field("telefono", "Phone", or_placeholder(employee.phone.as_deref())),
        field("horario_laboral", "Schedule", employee.work_schedule.clone()),
        field("nivel_estudio", "Education level", employee.education_level.clone()),
        field(
            "fecha_nacimiento",
            "Birth date",
            or_placeholder(
                employee
                    .birth_date
                    .as_ref()
                    .map(ToString::to_string)
                    .as_deref(),
            ),
        ),
        field("domicilio", "Address", or_placeholder(employee.address.as_deref())),
    ]
}

fn view_body(employee: &Employee) -> VNode {
    let rows = detail_fields(employee).into_iter().map(|field| {
        let value: VNode = if field.name == "estado" {
            status_badge(&employee.status).into()
        } else {
            text(field.value)
        };
        el("p")
            .child(el("strong").text(format!("{}:", field.label)))
            .child(value)
    });
    el("div").class("employee-detail").children(rows).into()
}

/// Same fields as the read-only view, as pre-filled named inputs. Nothing
/// submits the form yet.
fn edit_body(employee: &Employee) -> VNode {
    let rows = detail_fields(employee).into_iter().map(|field| {
        let mut input = el("input")
            .class("form-control")
            .attr("name", field.name)
            .attr("value", field.value);
        if field.name == "id" {
            input = input.attr("readonly", "readonly");
        }
        el("div")
            .class("form-group")
            .child(el("label").attr("for", field.name).text(field.label))
            .child(input)
    });
    el("form")
        .class("employee-edit")
        .attr("data-employee-id", employee.id.to_string())
        .children(rows)
        .into()
}

pub fn render_detail(employee: &Employee, mode: DetailMode) -> DomOp {
    match mode {
        DetailMode::View => DomOp::ShowModal {
            title: "View employee".to_string(),
            body: view_body(employee),
        },
        DetailMode::Edit => DomOp::ShowModal {
            title: "Edit employee".to_string(),
            body: edit_body(employee),
        },
    }
}

pub fn render_alert(message: impl Into<String>) -> DomOp {
    DomOp::Alert {
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
