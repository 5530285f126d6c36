//! Page templates and HTML error pages.

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use cinepoll_common::{AppError, AppResult};
use tera::{Context, Tera};

/// Templates compiled into the binary, keyed by file name.
const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("detail.html", include_str!("../templates/detail.html")),
    ("results.html", include_str!("../templates/results.html")),
];

/// Tera engine holding every page template.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Parse all embedded templates.
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        // `.html` names keep tera's autoescaping on
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Render a template to an HTML response body.
    pub fn render(&self, name: &str, context: &Context) -> AppResult<Html<String>> {
        Ok(Html(self.tera.render(name, context)?))
    }
}

/// An [`AppError`] rendered as an HTML page.
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();

        let status = err.status_code();
        let message = if err.is_server_error() {
            "Something went wrong on our side.".to_string()
        } else {
            err.to_string()
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            error_page(status, &message),
        )
            .into_response()
    }
}

fn error_page(status: StatusCode, message: &str) -> String {
    let title = tera::escape_html(&status.to_string());
    let message = tera::escape_html(message);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n<p>{message}</p>\n<p><a href=\"/movies\">Back to movies</a></p>\n</body>\n</html>\n"
    )
}
