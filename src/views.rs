use askama::Template;
use axum::response::Html;

use crate::{error::AppResult, models::TodoItem};

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListPage<'a> {
    pub list_title: &'a str,
    pub items: &'a [TodoItem],
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub title: &'static str,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self { title: "About" }
    }
}

pub fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_page_escapes_item_names() {
        let items = vec![TodoItem::new("<script>alert(1)</script>").expect("valid item")];
        let html = ListPage {
            list_title: "Today",
            items: &items,
        }
        .render()
        .expect("list page renders");

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains(&items[0].id_hex()));
    }

    #[test]
    fn list_page_posts_back_to_its_own_list() {
        let html = ListPage {
            list_title: "Work",
            items: &[],
        }
        .render()
        .expect("list page renders");

        assert!(html.contains(r#"name="list" value="Work""#));
    }

    #[test]
    fn about_page_renders() {
        let html = AboutPage::default().render().expect("about page renders");
        assert!(html.contains("About"));
    }
}
