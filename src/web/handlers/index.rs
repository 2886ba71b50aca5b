//! Submission form page.

use askama::Template;
use askama_web::WebTemplate;

/// Template for the submission form.
///
/// Renders `templates/index.html`, with the deployment region in the footer
/// when one is configured.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub region: Option<String>,
}

impl IndexTemplate {
    pub fn new(region: Option<String>) -> Self {
        Self { region }
    }
}
