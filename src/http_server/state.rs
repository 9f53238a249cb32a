use std::sync::Arc;

use crate::database::Database;
use crate::ports::pages::PageRenderer;
use crate::ports::users::UserDirectory;
use crate::services::catalog::CatalogService;
use crate::services::main_screen::MainScreenService;

pub struct ContentState {
    pub catalog: CatalogService,
}

impl ContentState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            catalog: CatalogService::new(db),
        }
    }
}

pub struct GatewayState {
    pub users: Arc<dyn UserDirectory>,
    pub main_screen: MainScreenService,
    pub pages: Arc<dyn PageRenderer>,
}
