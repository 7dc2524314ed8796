//! Page shell and route table. There is one page.

use serde_json::{Value, json};

use crate::upload::UploadController;
use crate::views::render_form;

pub const PAGE_TITLE: &str = "Plant Water Planner";
pub const PAGE_SUBTITLE: &str =
    "Snap a photo of your plant, send it for identification, and get care tips in seconds.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Identify,
}

pub const ROUTES: &[(&str, Page)] = &[("/", Page::Identify)];

/// Exact-match route lookup.
#[must_use]
pub fn resolve(path: &str) -> Option<Page> {
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, page)| *page)
}

pub fn render_page(page: Page, controller: &UploadController) -> Value {
    match page {
        Page::Identify => json!({
            "type": "page",
            "header": { "title": PAGE_TITLE, "subtitle": PAGE_SUBTITLE },
            "body": render_form(controller)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_root_resolves() {
        assert_eq!(resolve("/"), Some(Page::Identify));
        assert_eq!(resolve("/identify"), None);
        assert_eq!(resolve(""), None);
    }
}
