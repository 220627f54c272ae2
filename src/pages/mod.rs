//! The contact manager page: add form, searchable list, and notifications.

mod delete;
mod index;
mod new;

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, macros::format_description};

use crate::{
    form::FormState,
    include_res,
    res::escape_html,
    view::{unknown_as_none, ListQuery},
    AppState, Contact, Field, SortKey, SortOrder,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/style.css", get(style))
        .route("/contacts", post(new::new_contact))
        .route("/contacts/{id}/delete", post(delete::delete_contact))
}

async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], include_res!(str, "/style.css"))
}

/// Banner shown after an action, carried across the redirect in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Notice {
    Created,
    Deleted,
    CreateFailed,
    DeleteFailed,
    MessageTooLong,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NoticeQuery {
    #[serde(deserialize_with = "unknown_as_none")]
    notice: Option<Notice>,
    name: Option<String>,
}

impl Notice {
    pub(crate) fn as_str(&self) -> &'static str {
        use Notice::*;
        match self {
            Created => "created",
            Deleted => "deleted",
            CreateFailed => "create_failed",
            DeleteFailed => "delete_failed",
            MessageTooLong => "message_too_long",
        }
    }

    /// Where to send the browser so the banner shows once. A non-default
    /// list view is kept.
    pub(crate) fn redirect_url(&self, name: Option<&str>, list: &ListQuery) -> String {
        let mut url = format!("/?notice={}", self.as_str());
        if let Some(name) = name {
            url.push_str(&format!("&name={}", urlencoding::encode(name)));
        }
        if *list != ListQuery::default() {
            url.push('&');
            url.push_str(&list_params(list));
        }
        url
    }

    pub(crate) fn render(&self, name: Option<&str>) -> String {
        use Notice::*;
        let (class, title, text) = match self {
            Created => (
                "notice",
                "Success!",
                name.map_or("Contact added.".to_owned(), |n| format!("{n} has been added to your contacts.")),
            ),
            Deleted => (
                "notice",
                "Contact deleted",
                name.map_or("Contact removed.".to_owned(), |n| format!("{n} has been removed.")),
            ),
            CreateFailed => ("notice error", "Error", "Failed to add contact. Please try again.".to_owned()),
            DeleteFailed => ("notice error", "Error", "Failed to delete contact. Please try again.".to_owned()),
            MessageTooLong => ("notice error", "Error", "Message must be less than 1000 characters.".to_owned()),
        };
        format!(
            r#"<div class="{class}" role="status"><strong>{title}</strong> {}</div>"#,
            escape_html(&text)
        )
    }
}

fn list_params(list: &ListQuery) -> String {
    format!(
        "q={}&sort={}&order={}",
        urlencoding::encode(&list.q),
        list.sort.as_str(),
        list.order.as_str()
    )
}

fn list_href(list: &ListQuery) -> String {
    format!("/?{}", list_params(list))
}

// Hidden inputs that carry the list view through a POST.
fn list_fields(list: &ListQuery) -> String {
    format!(
        r#"<input type="hidden" name="q" value="{}"><input type="hidden" name="sort" value="{}"><input type="hidden" name="order" value="{}">"#,
        escape_html(&list.q),
        list.sort.as_str(),
        list.order.as_str()
    )
}

fn arrow(list: &ListQuery, key: SortKey) -> &'static str {
    match (list.sort == key, list.order) {
        (false, _) => "",
        (true, SortOrder::Asc) => "↑",
        (true, SortOrder::Desc) => "↓",
    }
}

fn render_controls(list: &ListQuery) -> String {
    let active = |key: SortKey| if list.sort == key { "active" } else { "" };
    include_res!(str, "/pages/controls.html")
        .replace("{sort}", list.sort.as_str())
        .replace("{order}", list.order.as_str())
        .replace("{name_active}", active(SortKey::Name))
        .replace("{date_active}", active(SortKey::CreatedAt))
        .replace("{name_href}", &escape_html(&list_href(&list.toggle_sort(SortKey::Name))))
        .replace("{date_href}", &escape_html(&list_href(&list.toggle_sort(SortKey::CreatedAt))))
        .replace("{name_arrow}", arrow(list, SortKey::Name))
        .replace("{date_arrow}", arrow(list, SortKey::CreatedAt))
        .replace("{q}", &escape_html(&list.q))
}

const AVATAR_COLORS: [&str; 6] = ["blue", "emerald", "purple", "orange", "rose", "cyan"];

/// First letter of each word, uppercased, at most two.
fn initials(name: &str) -> String {
    if name.is_empty() {
        return "NA".to_owned();
    }
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

fn avatar_color(name: &str) -> &'static str {
    let i = name.chars().next().map_or(0, |c| c as usize % AVATAR_COLORS.len());
    AVATAR_COLORS[i]
}

fn render_contact(contact: &Contact, list: &ListQuery) -> String {
    let created_at = contact.created_at.format(&Rfc3339).unwrap_or_default();
    let created_at_display = contact
        .created_at
        .format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| "Unknown date".to_owned());
    let message = contact
        .message
        .as_deref()
        .map(|m| format!(r#"<p class="message">{}</p>"#, escape_html(m)))
        .unwrap_or_default();

    include_res!(str, "/pages/contact_item.html")
        .replace("{avatar_color}", avatar_color(&contact.name))
        .replace("{initials}", &escape_html(&initials(&contact.name)))
        .replace("{list_fields}", &list_fields(list))
        .replace("{id}", &contact.id.to_string())
        .replace("{created_at}", &created_at)
        .replace("{created_at_display}", &created_at_display)
        .replace("{message}", &message)
        .replace("{email}", &escape_html(&contact.email))
        .replace("{phone}", &escape_html(&contact.phone))
        .replace("{name}", &escape_html(&contact.name))
}

fn render_empty(title: &str, hint: &str) -> String {
    include_res!(str, "/pages/empty.html")
        .replace("{title}", title)
        .replace("{hint}", hint)
}

fn render_list(contacts: &[Contact], list: &ListQuery) -> (String, String) {
    if contacts.is_empty() {
        return (
            String::new(),
            render_empty("No contacts yet", "Add your first contact using the form"),
        );
    }

    let view = list.derive(contacts);
    let items = if view.is_empty() {
        render_empty("No matches found", "Try adjusting your search query")
    } else {
        view.into_iter().map(|c| render_contact(c, list)).collect()
    };
    (render_controls(list), items)
}

fn render_field(page: String, form: &FormState, field: Field) -> String {
    let name = field.as_str();
    let error = form.visible_error(field);
    let error_html = error
        .map(|e| format!(r#"<p id="{name}-error" class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    page.replace(&format!("{{{name}_class}}"), if error.is_some() { "invalid" } else { "" })
        .replace(&format!("{{{name}_error}}"), &error_html)
        .replace(&format!("{{{name}_value}}"), &escape_html(form.values.get(field)))
}

/// Renders the whole page. `notice` is already-rendered banner markup.
pub(crate) fn render(
    contacts: &[Contact],
    list: &ListQuery,
    form: &FormState,
    notice: Option<String>,
) -> Html<String> {
    let (controls, items) = render_list(contacts, list);
    let submit_class = if form.can_submit() { "ready" } else { "incomplete" };

    let mut page = include_res!(str, "/pages/index.html")
        .replace("{count}", &contacts.len().to_string())
        .replace("{controls}", &controls)
        .replace("{list}", &items)
        .replace("{list_fields}", &list_fields(list))
        .replace("{submit_class}", submit_class)
        .replace("{message_value}", &escape_html(&form.values.message));
    for field in Field::REQUIRED {
        page = render_field(page, form, field);
    }

    Html(page.replace("{notice}", &notice.unwrap_or_default()))
}
