use serde_json::Value;

/// Pages the gateway can render, named after their templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    UserRegistration,
    MainScreen,
}

impl Page {
    pub fn template(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::UserRegistration => "registro_usuario.html",
            Page::MainScreen => "pantalla_principal.html",
        }
    }
}

/// Port for the template layer.
#[cfg_attr(test, mockall::automock)]
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: Page, context: &Value) -> color_eyre::Result<String>;
}
