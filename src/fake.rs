//! In-memory web API for exercising reconcilers in tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use pingping_client::{ApiError, PingpingApi};
use pingping_types::{Check, CheckUpdate, Monitor, MonitorRequest};

/// A call received by the fake, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListMonitors,
    GetMonitor(u64),
    CreateMonitor(MonitorRequest),
    UpdateMonitor(u64, MonitorRequest),
    DeleteMonitor(u64),
    UpdateCheck(u64, CheckUpdate),
    SetCheckEnabled(u64, bool),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::ListMonitors | Call::GetMonitor(_))
    }
}

#[derive(Debug, Default)]
struct State {
    monitors: Vec<Monitor>,
    calls: Vec<Call>,
    next_id: u64,
    fail_reads_after: Option<usize>,
}

/// Holds monitors in memory and applies writes to them like the real API.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new(monitors: Vec<Monitor>) -> Self {
        let next_id = monitors.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                monitors,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Answer reads with a server error once `count` reads have succeeded.
    pub fn fail_reads_after(self, count: usize) -> Self {
        self.state.lock().fail_reads_after = Some(count);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn monitors(&self) -> Vec<Monitor> {
        self.state.lock().monitors.clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        if !call.is_mutation() {
            let reads = state.calls.iter().filter(|c| !c.is_mutation()).count();
            if state.fail_reads_after.is_some_and(|limit| reads >= limit) {
                return Err(ApiError::Status {
                    method: "GET".into(),
                    path: "monitors".into(),
                    status: 503,
                    body: "unavailable".into(),
                });
            }
        }
        state.calls.push(call);
        Ok(())
    }

    fn with_check<F>(&self, id: u64, f: F) -> Result<Option<Check>, ApiError>
    where
        F: FnOnce(&mut Check),
    {
        let mut state = self.state.lock();
        let check = state
            .monitors
            .iter_mut()
            .flat_map(|m| m.checks.values_mut())
            .find(|c| c.id == id);

        match check {
            Some(check) => {
                f(check);
                Ok(Some(check.clone()))
            }
            None => Err(not_found("checks", id)),
        }
    }
}

fn not_found(kind: &str, id: u64) -> ApiError {
    ApiError::Status {
        method: "PUT".into(),
        path: format!("{kind}/{id}"),
        status: 404,
        body: String::new(),
    }
}

#[async_trait]
impl PingpingApi for FakeApi {
    async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError> {
        self.record(Call::ListMonitors)?;
        Ok(self.monitors())
    }

    async fn get_monitor(&self, id: u64) -> Result<Option<Monitor>, ApiError> {
        self.record(Call::GetMonitor(id))?;
        Ok(self.monitors().into_iter().find(|m| m.id == id))
    }

    async fn create_monitor(&self, request: &MonitorRequest) -> Result<Option<Monitor>, ApiError> {
        self.record(Call::CreateMonitor(request.clone()))?;
        let mut state = self.state.lock();
        let monitor = Monitor::new(
            state.next_id,
            request.alias.clone().unwrap_or_default(),
            request.url.clone().unwrap_or_default(),
        );
        state.next_id += 1;
        state.monitors.push(monitor.clone());
        Ok(Some(monitor))
    }

    async fn update_monitor(
        &self,
        id: u64,
        request: &MonitorRequest,
    ) -> Result<Option<Monitor>, ApiError> {
        self.record(Call::UpdateMonitor(id, request.clone()))?;
        let mut state = self.state.lock();
        let monitor = state
            .monitors
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("monitors", id))?;

        if let Some(alias) = &request.alias {
            monitor.alias = alias.clone();
        }
        if let Some(url) = &request.url {
            monitor.url = url.clone();
        }
        Ok(Some(monitor.clone()))
    }

    async fn delete_monitor(&self, id: u64) -> Result<(), ApiError> {
        self.record(Call::DeleteMonitor(id))?;
        self.state.lock().monitors.retain(|m| m.id != id);
        Ok(())
    }

    async fn update_check(&self, id: u64, update: &CheckUpdate) -> Result<Option<Check>, ApiError> {
        self.record(Call::UpdateCheck(id, *update))?;
        self.with_check(id, |check| {
            if let Some(interval) = update.interval {
                check.interval = interval;
            }
            // Threshold only sticks when sent together with the interval.
            if update.interval.is_some() {
                check.notification_threshold = update.notification_threshold;
            }
        })
    }

    async fn set_check_enabled(&self, id: u64, enabled: bool) -> Result<Option<Check>, ApiError> {
        self.record(Call::SetCheckEnabled(id, enabled))?;
        self.with_check(id, |check| check.is_enabled = enabled)
    }
}
