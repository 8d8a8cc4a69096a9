use metrics_exporter_prometheus::PrometheusHandle;
use recruit_desk::backend::RestClient;
use recruit_desk::config::AppConfig;
use recruit_desk::error::AppError;
use recruit_desk::workflows::directory::{DirectoryService, EmployeeQuery};
use recruit_desk::workflows::hiring::RequestWorkflowStore;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Backend client plus the two in-memory views built on top of it.
pub(crate) struct Workspace {
    pub(crate) config: AppConfig,
    pub(crate) requests: Arc<RequestWorkflowStore<RestClient>>,
    pub(crate) directory: Arc<DirectoryService<RestClient>>,
}

impl Workspace {
    pub(crate) fn connect(config: AppConfig) -> Result<Self, AppError> {
        let client = Arc::new(RestClient::new(&config.backend)?);
        let default_query = EmployeeQuery::with_limit(config.backend.employee_limit);
        Ok(Self {
            requests: Arc::new(RequestWorkflowStore::new(Arc::clone(&client))),
            directory: Arc::new(DirectoryService::new(client, default_query)),
            config,
        })
    }

    pub(crate) fn from_env() -> Result<Self, AppError> {
        Self::connect(AppConfig::load()?)
    }
}
