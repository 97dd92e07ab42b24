use nc_inference::AnalysisService;
use nc_storage::StoreHandle;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: AnalysisService,
    pub store: StoreHandle,
}

impl AppState {
    pub fn new(service: AnalysisService, store: StoreHandle) -> Self {
        Self { service, store }
    }
}
