use crate::api::AppState;
use crate::services::submission_service::FORM_PAGE_PATH;
use axum::{extract::State, response::Html};
use time::OffsetDateTime;

/// Serves the lead form, rendering it only when the cached copy was invalidated.
pub async fn lead_form(State(state): State<AppState>) -> Html<String> {
    Html(state.page_cache.get_or_render(FORM_PAGE_PATH, render_lead_form).body)
}

fn render_lead_form(rendered_at: OffsetDateTime) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>WhatsApp Lead Registration</title>
</head>
<body>
<main>
<h1>WhatsApp Lead Registration</h1>
<form method="post" action="/leads">
<label>Full name <input name="fullName" required minlength="2" maxlength="80"></label>
<label>Email <input name="email" type="email"></label>
<label>Phone number <input name="phoneNumber" required minlength="6" maxlength="20"></label>
<label>Message <textarea name="message" required minlength="5" maxlength="1024"></textarea></label>
<button type="submit">Send WhatsApp message</button>
</form>
</main>
<footer data-rendered-at="{}"></footer>
</body>
</html>
"#,
        rendered_at.unix_timestamp()
    )
}
