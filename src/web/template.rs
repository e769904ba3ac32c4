// ============================================================
// Layer 1 — Report Page Template
// ============================================================
// Renders a `Report` to HTML with minijinja. The template name
// ends in `.html`, so every interpolated value is HTML-escaped;
// cell values from the dataset never reach the page raw.
//
// If rendering itself fails the caller still gets a page: a
// minimal fallback naming the template error.

use minijinja::{Environment, HtmlEscape};

use crate::application::report_use_case::{Report, REPORT_TITLE};

const TEMPLATE_NAME: &str = "report.html";

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
  <style>
    body { font-family: sans-serif; margin: 2rem; }
    pre.logs { background: #f6f8fa; padding: 1rem; }
    table.table-bordered { border-collapse: collapse; }
    table.table-bordered th, table.table-bordered td { border: 1px solid #ccc; padding: 2px 6px; }
    .charts { display: flex; flex-wrap: wrap; gap: 1.5rem; }
    figure { margin: 0; }
    .status.loaded { color: #1a7f37; }
    .status.not-loaded { color: #cf222e; }
  </style>
</head>
<body>
  <h1>{{ title }}</h1>
  {% if loaded %}
  <p class="status loaded">Dataset loaded</p>
  {% else %}
  <p class="status not-loaded">Dataset not loaded</p>
  {% endif %}

  <h2>Log</h2>
  <pre class="logs">{% for line in logs %}{{ line }}
{% endfor %}</pre>

  {% if preview %}
  <h2>First rows</h2>
  <table class="table table-bordered">
    <thead><tr>{% for column in preview.columns %}<th>{{ column }}</th>{% endfor %}</tr></thead>
    <tbody>
    {% for row in preview.rows %}
      <tr>{% for value in row %}<td>{{ value }}</td>{% endfor %}</tr>
    {% endfor %}
    </tbody>
  </table>
  {% endif %}

  {% if charts %}
  <h2>Distributions</h2>
  <div class="charts">
  {% for chart in charts %}
    <figure>
      <figcaption>{{ chart.name }} Set - distribution of '{{ chart.column }}'</figcaption>
      <img src="data:image/png;base64,{{ chart.png_base64 }}" alt="{{ chart.name }} histogram">
      <table class="table table-bordered">
        <thead><tr><th>{{ chart.column }}</th><th>Frequency</th></tr></thead>
        <tbody>
        {% for bin in chart.bins %}<tr><td>{{ bin[0] }}</td><td>{{ bin[1] }}</td></tr>{% endfor %}
        </tbody>
      </table>
    </figure>
  {% endfor %}
  </div>
  {% elif not loaded %}
  <p class="empty">No results to show.</p>
  {% endif %}
</body>
</html>
"#;

/// Render the page, falling back to a minimal page on template errors.
pub fn render_page(report: &Report) -> String {
    match try_render(report) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            fallback_page(report.loaded, &e.to_string())
        }
    }
}

fn try_render(report: &Report) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, REPORT_TEMPLATE)?;
    env.get_template(TEMPLATE_NAME)?.render(report)
}

/// Bare page naming the template error, keeping the real load status.
fn fallback_page(loaded: bool, message: &str) -> String {
    let status = if loaded { "Dataset loaded" } else { "Dataset not loaded" };
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><h1>{title}</h1><p>{status}</p><pre>Template error: {message}</pre></body></html>\n",
        title = REPORT_TITLE,
        message = HtmlEscape(message),
    )
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::report_use_case::{ChartImage, TablePreview};

    #[test]
    fn test_not_loaded_page() {
        let html = render_page(&Report::failed("CRITICAL ERROR: file not found."));
        assert!(html.contains(r#"class="status not-loaded""#));
        assert!(html.contains("CRITICAL ERROR: file not found."));
        assert!(html.contains("No results to show."));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_loaded_page_has_preview_and_charts() {
        let mut report = Report::new();
        report.loaded = true;
        report.logs.push("Dataset loaded: 3 records.".into());
        report.preview = Some(TablePreview {
            columns: vec!["protocol_type".into()],
            rows:    vec![vec!["<tcp>".into()]],
        });
        report.charts.push(ChartImage {
            name:       "Original".into(),
            column:     "protocol_type".into(),
            png_base64: "iVBORw0KGgo".into(),
            bins:       vec![("tcp".into(), 3)],
        });

        let html = render_page(&report);
        assert!(html.contains(r#"class="status loaded""#));
        assert!(!html.contains(r#"class="status not-loaded""#));
        assert!(html.contains("<th>protocol_type</th>"));
        // cell values are escaped
        assert!(html.contains("&lt;tcp&gt;"));
        assert!(html.contains("data:image/png;base64,iVBORw0KGgo"));
        assert!(html.contains("<td>tcp</td><td>3</td>"));
    }

    #[test]
    fn test_fallback_page_keeps_status_and_escapes() {
        let html = fallback_page(true, "unknown filter <b>");
        assert!(html.contains("<p>Dataset loaded</p>"));
        assert!(html.contains("unknown filter &lt;b&gt;"));

        let html = fallback_page(false, "boom");
        assert!(html.contains("<p>Dataset not loaded</p>"));
    }
}
