use super::*;
use std::{
    collections::HashMap,
    sync::Mutex as StdMutex,
    time::Duration,
};

use async_trait::async_trait;
use directory_client::{ClientError, StatusCode};
use shared::{
    domain::EmployeeStatus,
    error::ApplicationError,
    protocol::{HeadcountSummary, PageResult, Pagination, RoleCount, Stats},
};
use tokio::sync::oneshot;

use crate::ui::{DomOp, Region, VNode};

type ErrorFactory = fn() -> ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListCall {
    page: u32,
    page_size: u32,
    search: Option<String>,
}

#[derive(Default)]
struct FakeDirectory {
    employees: Vec<Employee>,
    list_calls: StdMutex<Vec<ListCall>>,
    gates: StdMutex<HashMap<u32, oneshot::Receiver<()>>>,
    fail_list: StdMutex<Option<ErrorFactory>>,
    fail_stats: Option<ErrorFactory>,
    health: Option<&'static str>,
}

impl FakeDirectory {
    fn with_employees(count: i64) -> Self {
        Self {
            employees: (1..=count).map(employee).collect(),
            ..Self::default()
        }
    }

    fn gate_page(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }

    fn fail_listing_with(&self, factory: ErrorFactory) {
        *self.fail_list.lock().unwrap() = Some(factory);
    }

    fn list_calls(&self) -> Vec<ListCall> {
        self.list_calls.lock().unwrap().clone()
    }
}

fn employee(id: i64) -> Employee {
    let status = match id % 4 {
        0 => EmployeeStatus::Active,
        1 => EmployeeStatus::Inactive,
        2 => EmployeeStatus::OnVacation,
        _ => EmployeeStatus::Other("licencia".into()),
    };
    Employee {
        id: EmployeeId(id),
        first_name: format!("Name{id}"),
        last_name: if id % 2 == 0 { "Garcia".into() } else { "Lopez".into() },
        role: "Cajero".into(),
        work_schedule: "09-17".into(),
        status,
        email: Some(format!("e{id}@example.com")),
        phone: None,
        education_level: "Secundario".into(),
        birth_date: None,
        address: None,
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
    async fn list_employees(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<PageResult, ClientError> {
        self.list_calls.lock().unwrap().push(ListCall {
            page,
            page_size,
            search: search.map(str::to_string),
        });
        let gate = self.gates.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(factory) = *self.fail_list.lock().unwrap() {
            return Err(factory());
        }

        let needle = search.unwrap_or_default().to_lowercase();
        let matching: Vec<Employee> = self
            .employees
            .iter()
            .filter(|e| e.full_name().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let pagination = Pagination::new(page, page_size, matching.len() as u64);
        let start = ((page.max(1) - 1) * page_size) as usize;
        let employees = matching
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        Ok(PageResult {
            employees,
            pagination,
        })
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, ClientError> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::Application(ApplicationError::new("Employee not found")))
    }

    async fn get_stats(&self) -> Result<Stats, ClientError> {
        if let Some(factory) = self.fail_stats {
            return Err(factory());
        }
        Ok(Stats {
            headcount: HeadcountSummary {
                total: self.employees.len() as u64,
                active: 4,
                inactive: 3,
                on_vacation: 2,
            },
            roles: vec![RoleCount {
                role: "Cajero".into(),
                count: self.employees.len() as u64,
            }],
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, ClientError> {
        if let Some(status) = self.health {
            return Ok(HealthStatus {
                status: status.to_string(),
                timestamp: None,
                version: Some("1.0.0".into()),
                extra: Default::default(),
            });
        }
        Err(ClientError::Transport {
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    ops: StdMutex<Vec<DomOp>>,
}

impl RenderSink for RecordingSink {
    fn apply(&self, ops: Vec<DomOp>) {
        self.ops.lock().unwrap().extend(ops);
    }
}

impl RecordingSink {
    fn ops(&self) -> Vec<DomOp> {
        self.ops.lock().unwrap().clone()
    }

    fn replaced(&self, region: Region) -> Vec<VNode> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DomOp::Replace { region: r, node } if r == region => Some(node),
                _ => None,
            })
            .collect()
    }

    fn alerts(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DomOp::Alert { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

fn row_ids(table: &VNode) -> Vec<i64> {
    table
        .find_all(|e| e.tag == "tr")
        .into_iter()
        .filter_map(|row| row.attr_value("data-employee-id"))
        .map(|id| id.parse().expect("numeric id"))
        .collect()
}

fn controller_with(
    api: FakeDirectory,
    stale_loads: StaleLoadPolicy,
) -> (
    Arc<ViewController<FakeDirectory, RecordingSink>>,
    Arc<FakeDirectory>,
    Arc<RecordingSink>,
) {
    let api = Arc::new(api);
    let sink = Arc::new(RecordingSink::default());
    let controller = ViewController::new(
        Arc::clone(&api),
        Arc::clone(&sink),
        ControllerOptions {
            stale_loads,
            ..ControllerOptions::default()
        },
    );
    (controller, api, sink)
}

#[tokio::test]
async fn init_renders_first_page_and_statistics() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);

    controller.init().await;

    assert_eq!(
        api.list_calls(),
        vec![ListCall {
            page: 1,
            page_size: 10,
            search: None
        }]
    );
    let tables = sink.replaced(Region::TableBody);
    assert_eq!(row_ids(&tables[0]), (1..=10).collect::<Vec<_>>());

    let pagination = &sink.replaced(Region::Pagination)[0];
    assert!(pagination.text_content().contains("Showing 1 to 10 of 25 employees"));

    let ops = sink.ops();
    assert!(ops.contains(&DomOp::SetText {
        region: Region::StatTotal,
        text: "25".into()
    }));
    assert!(ops.contains(&DomOp::SetText {
        region: Region::StatOnVacation,
        text: "2".into()
    }));
    assert!(ops.iter().any(|op| matches!(op, DomOp::DrawChart(chart) if chart.labels == ["Cajero"])));
    assert!(sink.alerts().is_empty());
}

#[tokio::test]
async fn change_page_sends_out_of_range_pages_as_is() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);

    controller.change_page(7).await;

    assert_eq!(api.list_calls()[0].page, 7);
    assert_eq!(controller.state().await.page, 7);
    let tables = sink.replaced(Region::TableBody);
    assert!(row_ids(&tables[0]).is_empty());
}

#[tokio::test]
async fn failed_load_alerts_and_leaves_previous_render() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);
    controller.load().await;
    api.fail_listing_with(|| ClientError::Transport {
        status: StatusCode::INTERNAL_SERVER_ERROR,
    });

    controller.change_page(2).await;

    assert_eq!(sink.replaced(Region::TableBody).len(), 1);
    assert_eq!(sink.replaced(Region::Pagination).len(), 1);
    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("Connection error:"), "{}", alerts[0]);
    assert!(alerts[0].contains("500"));
    assert!(matches!(sink.ops().last(), Some(DomOp::Alert { .. })));
}

#[tokio::test]
async fn rejected_listing_shows_server_message() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(3), StaleLoadPolicy::LastResolved);
    api.fail_listing_with(|| ClientError::Application(ApplicationError::new("db down")));

    controller.load().await;

    assert_eq!(sink.alerts(), vec!["Failed to load employees: db down".to_string()]);
    assert!(sink.replaced(Region::TableBody).is_empty());
}

#[tokio::test]
async fn decode_failure_is_reported_like_any_other_failure() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(3), StaleLoadPolicy::LastResolved);
    api.fail_listing_with(|| {
        ClientError::Decode(serde_json::from_str::<u8>("not json").unwrap_err())
    });

    controller.load().await;

    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("Connection error: malformed response body"));
}

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_debounce_window_trigger_one_load_with_last_value() {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);

    for term in ["g", "ga", "gar", "garc"] {
        controller.search_input(term);
        tokio::time::sleep(Duration::from_millis(120)).await;
    }
    assert!(api.list_calls().is_empty());

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(
        api.list_calls(),
        vec![ListCall {
            page: 1,
            page_size: 10,
            search: Some("garc".into())
        }]
    );
    assert_eq!(controller.state().await.search_term, "garc");
    let table = &sink.replaced(Region::TableBody)[0];
    assert!(row_ids(table).iter().all(|id| id % 2 == 0));
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_the_window_trigger_separate_loads() {
    let (controller, api, _sink) =
        controller_with(FakeDirectory::with_employees(5), StaleLoadPolicy::LastResolved);

    controller.search_input("a");
    tokio::time::sleep(Duration::from_millis(700)).await;
    controller.search_input("ab");
    tokio::time::sleep(Duration::from_millis(700)).await;

    let searches: Vec<_> = api.list_calls().into_iter().map(|c| c.search).collect();
    assert_eq!(searches, vec![Some("a".to_string()), Some("ab".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn cancelled_search_never_loads() {
    let (controller, api, _sink) =
        controller_with(FakeDirectory::with_employees(5), StaleLoadPolicy::LastResolved);

    controller.search_input("zz");
    controller.cancel_pending_search();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(api.list_calls().is_empty());
}

#[tokio::test]
async fn committing_a_search_resets_to_first_page() {
    let (controller, api, _sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);
    controller.change_page(3).await;

    controller.commit_search("Name1".into()).await;

    let last = api.list_calls().pop().expect("call");
    assert_eq!(last.page, 1);
    assert_eq!(last.search.as_deref(), Some("Name1"));
}

#[tokio::test]
async fn empty_search_result_renders_single_inactive_page() {
    let (controller, _api, sink) =
        controller_with(FakeDirectory::with_employees(25), StaleLoadPolicy::LastResolved);

    controller.commit_search("nobody".into()).await;

    let table = &sink.replaced(Region::TableBody)[0];
    assert!(row_ids(table).is_empty());

    let pagination = &sink.replaced(Region::Pagination)[0];
    let items = pagination.find_all(|e| e.tag == "li");
    assert_eq!(items.len(), 1);
    assert!(items[0].has_class("active"));
    assert_eq!(VNode::Element(items[0].clone()).text_content(), "1");
    assert!(pagination.find_all(|e| e.is_interactive()).is_empty());
}

async fn race_pages_two_and_three(
    stale_loads: StaleLoadPolicy,
) -> (Arc<RecordingSink>, Arc<FakeDirectory>) {
    let (controller, api, sink) =
        controller_with(FakeDirectory::with_employees(30), stale_loads);
    let release_two = api.gate_page(2);
    let release_three = api.gate_page(3);

    let releaser = {
        let api = Arc::clone(&api);
        let sink = Arc::clone(&sink);
        async move {
            while api.list_calls().len() < 2 {
                tokio::task::yield_now().await;
            }
            // page 3 was issued last but resolves first
            let _ = release_three.send(());
            let mut spins = 0;
            while sink.replaced(Region::TableBody).is_empty() && spins < 1_000 {
                tokio::task::yield_now().await;
                spins += 1;
            }
            let _ = release_two.send(());
        }
    };

    tokio::join!(controller.change_page(2), controller.change_page(3), releaser);
    (sink, api)
}

#[tokio::test]
async fn last_resolved_response_wins_by_default() {
    let (sink, api) = race_pages_two_and_three(StaleLoadPolicy::LastResolved).await;

    let pages: Vec<u32> = api.list_calls().iter().map(|c| c.page).collect();
    assert_eq!(pages, vec![2, 3]);

    let tables = sink.replaced(Region::TableBody);
    assert_eq!(tables.len(), 2);
    assert_eq!(row_ids(&tables[0]), (21..=30).collect::<Vec<_>>());
    assert_eq!(row_ids(tables.last().expect("table")), (11..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn latest_issued_policy_discards_stale_responses() {
    let (sink, _api) = race_pages_two_and_three(StaleLoadPolicy::LatestIssued).await;

    let tables = sink.replaced(Region::TableBody);
    assert_eq!(tables.len(), 1);
    assert_eq!(row_ids(&tables[0]), (21..=30).collect::<Vec<_>>());
    assert!(sink.alerts().is_empty());
}

#[tokio::test]
async fn view_and_edit_render_distinct_modals() {
    let (controller, _api, sink) =
        controller_with(FakeDirectory::with_employees(5), StaleLoadPolicy::LastResolved);

    controller.view_employee(EmployeeId(2)).await;
    controller.edit_employee(EmployeeId(2)).await;

    let modals: Vec<(String, VNode)> = sink
        .ops()
        .into_iter()
        .filter_map(|op| match op {
            DomOp::ShowModal { title, body } => Some((title, body)),
            _ => None,
        })
        .collect();
    assert_eq!(modals.len(), 2);

    let (view_title, view_body) = &modals[0];
    assert_eq!(view_title, "View employee");
    assert!(view_body.find_all(|e| e.tag == "input").is_empty());
    assert!(view_body.text_content().contains("Name2"));

    let (edit_title, edit_body) = &modals[1];
    assert_eq!(edit_title, "Edit employee");
    let inputs = edit_body.find_all(|e| e.tag == "input");
    assert!(inputs
        .iter()
        .any(|input| input.attr_value("name") == Some("nombre")
            && input.attr_value("value") == Some("Name2")));
}

#[tokio::test]
async fn missing_employee_raises_notice_instead_of_modal() {
    let (controller, _api, sink) =
        controller_with(FakeDirectory::with_employees(1), StaleLoadPolicy::LastResolved);

    controller.view_employee(EmployeeId(99)).await;

    assert_eq!(sink.alerts(), vec!["Failed to load employee: Employee not found".to_string()]);
    assert!(!sink.ops().iter().any(|op| matches!(op, DomOp::ShowModal { .. })));
}

#[tokio::test]
async fn stats_failure_is_independent_of_the_listing() {
    let api = FakeDirectory {
        fail_stats: Some(|| ClientError::Application(ApplicationError::new("stats offline"))),
        ..FakeDirectory::with_employees(3)
    };
    let (controller, _api, sink) = controller_with(api, StaleLoadPolicy::LastResolved);

    controller.init().await;

    assert_eq!(sink.replaced(Region::TableBody).len(), 1);
    assert_eq!(
        sink.alerts(),
        vec!["Failed to load statistics: stats offline".to_string()]
    );
    assert!(!sink.ops().iter().any(|op| matches!(op, DomOp::DrawChart(_))));
}

#[tokio::test]
async fn health_failure_is_surfaced() {
    let (controller, _api, sink) =
        controller_with(FakeDirectory::with_employees(1), StaleLoadPolicy::LastResolved);

    assert!(controller.check_health().await.is_none());
    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("503"));
}

#[tokio::test]
async fn unhealthy_backend_is_surfaced() {
    let api = FakeDirectory {
        health: Some("unhealthy"),
        ..FakeDirectory::with_employees(1)
    };
    let (controller, _api, sink) = controller_with(api, StaleLoadPolicy::LastResolved);

    let health = controller.check_health().await.expect("health payload");

    assert!(!health.is_healthy());
    assert_eq!(
        sink.alerts(),
        vec!["Health check failed: backend reported status `unhealthy`".to_string()]
    );
}

#[tokio::test]
async fn healthy_backend_raises_no_notice() {
    let api = FakeDirectory {
        health: Some("healthy"),
        ..FakeDirectory::with_employees(1)
    };
    let (controller, _api, sink) = controller_with(api, StaleLoadPolicy::LastResolved);

    assert!(controller.check_health().await.is_some());
    assert!(sink.ops().is_empty());
}

#[tokio::test]
async fn page_change_keeps_its_page_when_a_search_commits_right_after() {
    let (controller, api, _sink) =
        controller_with(FakeDirectory::with_employees(30), StaleLoadPolicy::LastResolved);

    let held = controller.state.lock().await;
    let paging = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.change_page(3).await }
    });
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    let searching = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.commit_search("Name".into()).await }
    });
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    drop(held);
    paging.await.expect("page task");
    searching.await.expect("search task");

    let calls = api.list_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        ListCall {
            page: 3,
            page_size: 10,
            search: None
        }
    );
    assert_eq!(calls[1].page, 1);
    assert_eq!(calls[1].search.as_deref(), Some("Name"));
}
