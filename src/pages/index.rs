use axum::{debug_handler, extract::{Query, State}, response::Html};

use crate::{form::FormState, view::ListQuery, AppResult, AppState, DynStore};

use super::{render, NoticeQuery};

#[debug_handler(state = AppState)]
pub(crate) async fn index(
    State(store): State<DynStore>,
    Query(list): Query<ListQuery>,
    Query(NoticeQuery { notice, name }): Query<NoticeQuery>,
) -> AppResult<Html<String>> {
    let contacts = store.list().await?;
    let banner = notice.map(|n| n.render(name.as_deref()));

    Ok(render(&contacts, &list, &FormState::new(), banner))
}
