//! HTML views
//!
//! Server-rendered pages. Every dynamic value goes through `escape_html`.

use std::fmt::Write;

use pet_diagnosis_core::constants::APP_NAME;
use pet_diagnosis_core::ContactGuidance;

use crate::models::{FormOptions, FormOutcome, Page, PageState, PredictionForm};

const STYLE: &str = r#"
body { font-family: sans-serif; background: #2c3e50; color: #fff; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 16px; }
nav { display: flex; justify-content: center; gap: 30px; background: rgba(0,0,0,0.6);
      padding: 14px; border-radius: 15px; margin: 25px auto; width: 85%; }
nav a, nav span { color: #fff; text-decoration: none; padding: 8px 16px; border-radius: 8px; }
nav a:hover { background: #ff7f50; }
nav .active { background: #1e90ff; }
h1.title { text-align: center; color: #ffd700; }
p.lead { text-align: center; font-size: 18px; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px; margin: 12px 0; }
.alert { padding: 12px; border-radius: 8px; margin: 12px 0; }
.alert.error { background: #7f1d1d; border: 1px solid #ef4444; }
.alert.warning { background: #78350f; border: 1px solid #f59e0b; }
.result { color: #ff4500; text-align: center; }
details { background: rgba(0,0,0,0.4); padding: 12px; border-radius: 8px; }
a { color: #93c5fd; }
"#;

/// Escape text for HTML body and attribute contexts
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Full document: navigation bar plus page body
pub fn layout(state: PageState, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - {app}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         {nav}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(strip_icon(state.page.title())),
        app = APP_NAME,
        style = STYLE,
        nav = nav_bar(state),
        body = body,
    )
}

/// Active page highlighted, the others as links
fn nav_bar(state: PageState) -> String {
    let mut html = String::from("<nav>");
    for page in Page::ALL {
        if state.is_active(page) {
            let _ = write!(html, "<span class=\"active\">{}</span>", page.title());
        } else {
            let _ = write!(html, "<a href=\"{}\">{}</a>", page.href(), page.title());
        }
    }
    html.push_str("</nav>");
    html
}

fn strip_icon(title: &str) -> &str {
    title.split_once(' ').map(|(_, rest)| rest).unwrap_or(title)
}

// ============================================================================
// PAGES
// ============================================================================

pub fn home() -> String {
    format!(
        "<h1 class=\"title\">🐾 {}</h1>\n\
         <p class=\"lead\">Use this app to get pet disease predictions and emergency guidance.</p>",
        APP_NAME
    )
}

pub fn prediction_form(options: &FormOptions, form: &PredictionForm, outcome: Option<&FormOutcome>) -> String {
    let mut html = String::from("<h1>🐾 Disease Checker (Model-Based Prediction)</h1>\n");
    html.push_str("<form method=\"post\" action=\"/predict\">\n");

    html.push_str("<label for=\"pet_type\">Select the pet type</label>\n<select id=\"pet_type\" name=\"pet_type\">\n");
    for option in &options.species {
        let selected = if option.value == form.pet_type { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&option.value),
            selected,
            escape_html(&option.label)
        );
    }
    html.push_str("</select>\n");

    html.push_str("<p>Select your pet's symptoms:</p>\n<div class=\"grid\">\n");
    for column in options.symptom_grid() {
        html.push_str("<div>\n");
        for symptom in column {
            let checked = if form.is_checked(symptom) { " checked" } else { "" };
            let escaped = escape_html(symptom);
            let _ = writeln!(
                html,
                "<label><input type=\"checkbox\" name=\"symptom\" value=\"{0}\"{1}> {0}</label><br>",
                escaped, checked
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n<button type=\"submit\">Predict disease</button>\n</form>\n");

    match outcome {
        Some(FormOutcome::Diagnosis(diagnosis)) => {
            let _ = write!(
                html,
                "<h2 class=\"result\">Predicted disease: {}</h2>\n<p class=\"lead\">{}</p>\n",
                escape_html(&diagnosis.disease),
                escape_html(&diagnosis.description)
            );
            html.push_str(&contact_panel(&diagnosis.guidance(), true));
        }
        Some(FormOutcome::Warning(message)) => {
            let _ = write!(html, "<div class=\"alert warning\">⚠️ {}</div>\n", escape_html(message));
        }
        Some(FormOutcome::Error(message)) => {
            let _ = write!(html, "<div class=\"alert error\">{}</div>\n", escape_html(message));
        }
        None => {}
    }

    html
}

pub fn emergency() -> String {
    let mut html = String::from("<h1>🚨 Emergency</h1>\n");
    html.push_str(&contact_panel(&ContactGuidance::emergency(), true));
    html
}

/// Alert plus a collapsible contact panel, open for emergencies
pub fn contact_panel(guidance: &ContactGuidance, show_alert: bool) -> String {
    let mut html = String::new();

    if show_alert {
        let class = if guidance.triage.is_emergency() { "error" } else { "warning" };
        let _ = writeln!(html, "<div class=\"alert {}\">{}</div>", class, guidance.alert);
    }

    let _ = write!(
        html,
        "<details class=\"contact {triage}\"{open}>\n<summary>{title}</summary>\n\
         <p>📞 <strong>Phone:</strong> {phone}</p>\n\
         <p>🌐 <a href=\"{map}\" target=\"_blank\" rel=\"noopener\">Find a clinic on Google Maps</a></p>\n\
         </details>\n",
        triage = guidance.triage.as_str(),
        open = if guidance.expanded { " open" } else { "" },
        title = guidance.title,
        phone = guidance.phone,
        map = guidance.map_url,
    );
    html
}
