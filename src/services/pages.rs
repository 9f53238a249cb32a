use serde_json::Value;

use crate::ports::pages::{Page, PageRenderer};

/// Renders a minimal HTML document carrying the page context as embedded JSON.
///
/// The template layer proper is deployed separately and hydrates from `#page-context`.
pub struct ShellPageRenderer {
    title: String,
}

impl ShellPageRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl PageRenderer for ShellPageRenderer {
    fn render(&self, page: Page, context: &Value) -> color_eyre::Result<String> {
        // `</` must not appear inside the script element
        let context = serde_json::to_string(context)?.replace("</", "<\\/");
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body data-template=\"{template}\">\n<script type=\"application/json\" id=\"page-context\">{context}</script>\n</body>\n</html>\n",
            title = escape_html(&self.title),
            template = page.template(),
        ))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_embeds_context() {
        let renderer = ShellPageRenderer::new("Streamflix");

        let html = renderer
            .render(Page::MainScreen, &json!({"user_id": "42"}))
            .unwrap();

        assert!(html.contains("data-template=\"pantalla_principal.html\""));
        assert!(html.contains(r#"{"user_id":"42"}"#));
        assert!(html.contains("<title>Streamflix</title>"));
    }

    #[test]
    fn test_render_neutralizes_script_close() {
        let renderer = ShellPageRenderer::new("<Streamflix>");

        let html = renderer
            .render(Page::Index, &json!({"title": "</script><b>"}))
            .unwrap();

        assert!(!html.contains("</script><b>"));
        assert!(html.contains("&lt;Streamflix&gt;"));
    }
}
