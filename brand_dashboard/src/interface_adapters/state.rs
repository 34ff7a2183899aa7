use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::session_store::FileSessionStore;
use crate::use_cases::load_dashboard::LoadDashboardUseCase;
use crate::use_cases::login::LoginUseCase;
use crate::use_cases::logout::LogoutUseCase;

// Wired adapters shared by every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub store: FileSessionStore,
}

impl AppState {
    pub fn login(&self) -> LoginUseCase<ApiClient, FileSessionStore> {
        LoginUseCase {
            api: self.api.clone(),
            store: self.store.clone(),
        }
    }

    pub fn logout(&self) -> LogoutUseCase<FileSessionStore> {
        LogoutUseCase {
            store: self.store.clone(),
        }
    }

    pub fn load_dashboard(&self) -> LoadDashboardUseCase<ApiClient, FileSessionStore> {
        LoadDashboardUseCase {
            api: self.api.clone(),
            store: self.store.clone(),
        }
    }
}
