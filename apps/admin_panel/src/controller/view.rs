//! The view controller: owns list state, drives the directory client, and
//! hands render output to the sink.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use directory_client::{ClientError, DirectoryApi};
use shared::{
    domain::{Employee, EmployeeId},
    protocol::HealthStatus,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    controller::{
        debounce::Debouncer,
        events::{Notice, NoticeContext},
        state::{ControllerOptions, StaleLoadPolicy, ViewState},
    },
    ui::{
        render::{render_alert, render_detail, render_page, render_stats, DetailMode},
        RenderSink,
    },
};

pub struct ViewController<A, S> {
    api: Arc<A>,
    sink: Arc<S>,
    state: Mutex<ViewState>,
    search: Debouncer,
    load_seq: AtomicU64,
    stale_loads: StaleLoadPolicy,
}

impl<A, S> ViewController<A, S>
where
    A: DirectoryApi + 'static,
    S: RenderSink + 'static,
{
    pub fn new(api: Arc<A>, sink: Arc<S>, options: ControllerOptions) -> Arc<Self> {
        Arc::new(Self {
            api,
            sink,
            state: Mutex::new(ViewState::new(options.page_size)),
            search: Debouncer::new(options.search_debounce),
            load_seq: AtomicU64::new(0),
            stale_loads: options.stale_loads,
        })
    }

    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// First render of the page: the employee list, then the statistics.
    pub async fn init(&self) {
        self.load().await;
        self.load_stats().await;
    }

    /// Fetch the window described by the current state and render it.
    pub async fn load(&self) {
        let (request, seq) = self.snapshot(&*self.state.lock().await);
        self.fetch_page(request, seq).await;
    }

    /// Callers hold the state lock across the mutation and this call.
    fn snapshot(&self, state: &ViewState) -> (ViewState, u64) {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        (state.clone(), seq)
    }

    async fn fetch_page(&self, request: ViewState, seq: u64) {
        debug!(
            seq,
            page = request.page,
            page_size = request.page_size,
            search = %request.search_term,
            "loading employees"
        );

        let outcome = self
            .api
            .list_employees(request.page, request.page_size, request.search())
            .await;

        if self.is_stale(seq) {
            warn!(
                seq,
                latest = self.load_seq.load(Ordering::SeqCst),
                page = request.page,
                "discarding stale employee listing"
            );
            return;
        }

        match outcome {
            Ok(result) => self.sink.apply(render_page(&result)),
            Err(err) => self.notify(NoticeContext::LoadEmployees, &err),
        }
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.stale_loads == StaleLoadPolicy::LatestIssued
            && seq < self.load_seq.load(Ordering::SeqCst)
    }

    /// No bounds check: an out-of-range page goes to the backend as-is.
    pub async fn change_page(&self, page: u32) {
        let (request, seq) = {
            let mut state = self.state.lock().await;
            state.page = page;
            self.snapshot(&state)
        };
        self.fetch_page(request, seq).await;
    }

    /// One keystroke in the search box. Only the last value within the
    /// debounce window is committed.
    pub fn search_input(self: &Arc<Self>, term: impl Into<String>) {
        let term = term.into();
        debug!(term = %term, delay_ms = self.search.delay().as_millis() as u64, "search debounce scheduled");
        let controller = Arc::clone(self);
        self.search.call(async move {
            controller.commit_search(term).await;
        });
    }

    pub async fn commit_search(&self, term: String) {
        let (request, seq) = {
            let mut state = self.state.lock().await;
            state.search_term = term;
            state.page = 1;
            self.snapshot(&state)
        };
        self.fetch_page(request, seq).await;
    }

    pub fn cancel_pending_search(&self) {
        self.search.cancel();
    }

    pub async fn view_employee(&self, id: EmployeeId) {
        if let Some(employee) = self.fetch_employee(id).await {
            self.sink.apply(vec![render_detail(&employee, DetailMode::View)]);
        }
    }

    /// Opens the editable form. Saving is not wired to the backend.
    pub async fn edit_employee(&self, id: EmployeeId) {
        if let Some(employee) = self.fetch_employee(id).await {
            self.sink.apply(vec![render_detail(&employee, DetailMode::Edit)]);
        }
    }

    async fn fetch_employee(&self, id: EmployeeId) -> Option<Employee> {
        debug!(%id, "loading employee detail");
        match self.api.get_employee(id).await {
            Ok(employee) => Some(employee),
            Err(err) => {
                self.notify(NoticeContext::LoadEmployee, &err);
                None
            }
        }
    }

    pub async fn load_stats(&self) {
        debug!("loading statistics");
        match self.api.get_stats().await {
            Ok(stats) => self.sink.apply(render_stats(&stats)),
            Err(err) => self.notify(NoticeContext::LoadStats, &err),
        }
    }

    pub async fn check_health(&self) -> Option<HealthStatus> {
        match self.api.health_check().await {
            Ok(health) if health.is_healthy() => {
                info!(
                    status = %health.status,
                    version = health.version.as_deref().unwrap_or("unknown"),
                    "backend health"
                );
                Some(health)
            }
            Ok(health) => {
                let notice = Notice::unhealthy(&health.status);
                warn!(status = %health.status, "backend reports unhealthy");
                self.sink.apply(vec![render_alert(notice.message())]);
                Some(health)
            }
            Err(err) => {
                self.notify(NoticeContext::HealthCheck, &err);
                None
            }
        }
    }

    fn notify(&self, context: NoticeContext, err: &ClientError) {
        let notice = Notice::from_client_error(context, err);
        warn!(context = ?notice.context(), kind = ?notice.kind(), error = %err, "request failed");
        self.sink.apply(vec![render_alert(notice.message())]);
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
