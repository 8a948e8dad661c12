use std::{fmt, sync::Arc};

use rndm_core::{AppUnitOfWork, search::MediaSearchPort};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub search: Arc<dyn MediaSearchPort>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
