//! Server-rendered HTML for the single-page form. Every button submits the
//! whole form back to `/s/{id}`, and the page is rebuilt from the new `View`.

use uuid::Uuid;

use crate::analysis::display::DeltaTone;
use crate::view::controller::NoticeLevel;
use crate::view::render::{ResultPanel, View};

const PAGE_TITLE: &str = "AuthentiText";
const TAGLINE: &str = "From Robotic to Realistic. Analyze and Humanize Your Content.";
const INPUT_PLACEHOLDER: &str = "The utilization of advanced artificial intelligence paradigms \
    facilitates the creation of highly efficient and automated content generation systems...";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:760px;margin:2rem auto;padding:0 1rem;color:#2c3e50}\
h1,.tagline{text-align:center}.tagline{color:#7f8c8d}\
textarea{width:100%;box-sizing:border-box}button{padding:.5rem 1rem;margin:.25rem 0}\
.primary{width:100%;font-weight:600}\
.notice{padding:.5rem .75rem;border-radius:4px;margin:.5rem 0}\
.success{background:#e8f8ef}.warning{background:#fff6e0}.error{background:#fdecea}\
.panel{display:flex;gap:1.5rem;border-top:1px solid #ddd;padding-top:1rem}\
.metric .value{font-size:2.2rem;font-weight:700}\
.positive{color:#1e8449}.neutral{color:#7f8c8d}.negative{color:#c0392b}\
pre.humanized{white-space:pre-wrap;background:#f4f6f7;padding:1rem;border-radius:4px}";

// Copies the clicked button into a hidden field before disabling every button,
// so the action still reaches the server while the busy indicator shows.
const BUSY_SCRIPT: &str = "\
document.getElementById('main').addEventListener('submit',function(e){\
var f=e.target;if(e.submitter){var h=document.createElement('input');\
h.type='hidden';h.name=e.submitter.name;h.value=e.submitter.value;f.appendChild(h);}\
f.querySelectorAll('button').forEach(function(b){b.disabled=true;});\
document.getElementById('busy').hidden=false;});";

/// Escapes text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

fn tone_class(tone: DeltaTone) -> &'static str {
    match tone {
        DeltaTone::Positive => "positive",
        DeltaTone::Neutral => "neutral",
        DeltaTone::Negative => "negative",
    }
}

fn button(action: &str, label: &str, primary: bool) -> String {
    let class = if primary { " class=\"primary\"" } else { "" };
    format!("<button type=\"submit\" name=\"action\" value=\"{action}\"{class}>{label}</button>\n")
}

fn result_panel_html(panel: &ResultPanel) -> String {
    let mut html = format!("<h2>{}</h2>\n<div class=\"panel\">\n", escape(panel.title));

    html.push_str("<div class=\"metric\">\n");
    html.push_str(&format!("<div>{}</div>\n", escape(panel.metric_label)));
    html.push_str(&format!(
        "<div class=\"value\">{}</div>\n",
        escape(&panel.score_label)
    ));
    html.push_str(&format!(
        "<div class=\"{}\">{}</div>\n",
        tone_class(panel.delta_tone),
        escape(panel.delta_label)
    ));
    if let Some(change) = &panel.score_change {
        html.push_str(&format!("<div class=\"change\">{}</div>\n", escape(change)));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"improvements\">\n");
    if !panel.reason.is_empty() {
        html.push_str(&format!("<p><em>{}</em></p>\n", escape(&panel.reason)));
    }
    html.push_str("<p><strong>Points for Improvement:</strong></p>\n");
    match panel.empty_message {
        Some(message) => html.push_str(&format!("<p>{}</p>\n", escape(message))),
        None => {
            html.push_str("<ul>\n");
            for item in &panel.improvements {
                html.push_str(&format!(
                    "<li><strong>{}:</strong> {}</li>\n",
                    escape(&item.point),
                    escape(&item.explanation)
                ));
            }
            html.push_str("</ul>\n");
        }
    }
    html.push_str("</div>\n</div>\n");
    html
}

/// Renders the full page for `session_id`.
pub fn render_page(session_id: Uuid, view: &View) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<h1>{PAGE_TITLE}</h1>\n<p class=\"tagline\">{TAGLINE}</p>\n<hr>\n"
    ));

    html.push_str(&format!(
        "<form id=\"main\" method=\"post\" action=\"/s/{session_id}\">\n"
    ));

    // A newline right after <textarea> is swallowed by the parser, so content
    // starting with a newline survives the round trip.
    html.push_str(&format!(
        "<label for=\"text\">Paste your text here to begin...</label>\n\
         <textarea id=\"text\" name=\"text\" rows=\"10\" placeholder=\"{}\">\n{}</textarea>\n",
        escape(INPUT_PLACEHOLDER),
        escape(&view.input_text)
    ));
    html.push_str(&button("analyze", "Analyze Text", true));
    html.push_str("<p id=\"busy\" hidden>Working... The AI is thinking.</p>\n");

    for notice in &view.notices {
        html.push_str(&format!(
            "<div class=\"notice {}\">{}</div>\n",
            notice_class(notice.level),
            escape(&notice.message)
        ));
    }

    if let Some(panel) = &view.analysis {
        html.push_str(&result_panel_html(panel));
    }

    if let Some(humanizer) = &view.humanizer {
        html.push_str("<hr>\n<h2>Make it Human</h2>\n");
        html.push_str("<label for=\"style\">Choose a Humanizing Style</label>\n");
        html.push_str("<select id=\"style\" name=\"style\">\n");
        for style in &humanizer.styles {
            let selected = if *style == humanizer.selected_style {
                " selected"
            } else {
                ""
            };
            html.push_str(&format!(
                "<option value=\"{0}\"{selected}>{0}</option>\n",
                escape(style)
            ));
        }
        html.push_str("</select>\n");

        html.push_str("<details>\n<summary>Or, Define a New Custom Style by Example</summary>\n");
        html.push_str(
            "<label for=\"style_name\">Give your style a name (e.g., 'My Blog Voice')</label>\n\
             <input id=\"style_name\" name=\"style_name\" type=\"text\">\n\
             <label for=\"style_example\">Paste an example of the writing style you want...</label>\n\
             <textarea id=\"style_example\" name=\"style_example\" rows=\"6\"></textarea>\n",
        );
        html.push_str(&button("save_style", "Save Custom Style", false));
        html.push_str("</details>\n");
        html.push_str(&button("humanize", "&#10024; Humanize Text", true));
    }

    if let Some(humanized) = &view.humanized {
        html.push_str("<h2>Your Humanized Text</h2>\n");
        html.push_str(&format!(
            "<pre class=\"humanized\">{}</pre>\n",
            escape(&humanized.text)
        ));
        html.push_str(&button("analyze_humanized", "Analyze Humanized Text", true));
    }

    if let Some(panel) = &view.reanalysis {
        html.push_str(&result_panel_html(panel));
    }

    html.push_str("</form>\n");
    html.push_str(&format!("<script>{BUSY_SCRIPT}</script>\n"));
    html.push_str("</body>\n</html>\n");
    html
}
