//! Text, HTML and JSON renderings of the two tools' results.

use crate::config::toml_config::PageConfig;
use crate::core::nickname::EXTRA_TEMPLATES;
use crate::core::{CountryMetric, CountrySeries, GdpView, NicknameList};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write;

const NO_NICKNAME_YET: &str = "아직 아무것도...";
const NO_LIKES: &str = "취향 미입력";

#[derive(Debug, Serialize)]
pub struct GdpReport<'a> {
    pub page: &'a PageConfig,
    pub view: &'a GdpView,
    pub series: Vec<CountrySeries>,
}

#[derive(Debug, Serialize)]
pub struct NicknameReport<'a> {
    pub page: &'a PageConfig,
    #[serde(flatten)]
    pub list: &'a NicknameList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_templates: Option<Vec<&'static str>>,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn page_header(page: &PageConfig) -> String {
    format!("{} {}", page.icon, page.title)
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

/// GDP in billions, e.g. `3,846B`.
pub fn format_billions(gdp: Option<f64>) -> String {
    match gdp {
        Some(v) => format!("{}B", group_thousands(v / 1_000_000_000.0)),
        None => "n/a".to_string(),
    }
}

fn metric_line(metric: &CountryMetric) -> String {
    format!(
        "{:<24} {:>4} GDP  {:>10}  ({} since {})",
        format!("{} ({})", metric.country_name, metric.country_code),
        metric.last_year,
        format_billions(metric.last_gdp),
        metric.growth,
        metric.first_year
    )
}

pub fn gdp_text(page: &PageConfig, view: &GdpView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page_header(page));
    let _ = writeln!(
        out,
        "GDP from {} to {} for {} selected countries",
        view.range.from(),
        view.range.to(),
        view.countries.len()
    );

    if view.metrics.is_empty() {
        let _ = writeln!(out, "No data for this selection.");
        return out;
    }

    let _ = writeln!(out);
    for metric in &view.metrics {
        let _ = writeln!(out, "{}", metric_line(metric));
    }
    out
}

/// One card per country metric, every text field escaped.
pub fn gdp_html(page: &PageConfig, view: &GdpView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<div class="card"><div class="title">{}</div>"#,
        escape_html(&page_header(page))
    );
    let _ = writeln!(
        out,
        r#"<div class="subtitle">GDP from {} to {}</div>"#,
        view.range.from(),
        view.range.to()
    );

    if view.metrics.is_empty() {
        let _ = writeln!(out, r#"<div class="muted">No data for this selection.</div>"#);
    }
    for metric in &view.metrics {
        let _ = writeln!(
            out,
            r#"<div class="metric"><div class="label">{} GDP</div><div class="value">{}</div><div class="delta">{}</div></div>"#,
            escape_html(&format!("{} ({})", metric.country_name, metric.country_code)),
            escape_html(&format_billions(metric.last_gdp)),
            escape_html(&metric.growth.to_string())
        );
    }
    out.push_str("</div>\n");
    out
}

pub fn likes_summary(likes: &[String]) -> String {
    if likes.is_empty() {
        NO_LIKES.to_string()
    } else {
        likes.join(" • ")
    }
}

pub fn nickname_text(page: &PageConfig, list: &NicknameList, show_extra: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page_header(page));
    let _ = writeln!(
        out,
        "추천 별명: {}",
        list.top_pick.as_deref().unwrap_or(NO_NICKNAME_YET)
    );
    let _ = writeln!(out, "[{}]", likes_summary(&list.likes));
    for (i, nick) in list.candidates.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, nick);
    }
    if show_extra {
        let _ = writeln!(out, "\n템플릿 더 보기 (유머/센스)");
        for t in EXTRA_TEMPLATES {
            let _ = writeln!(out, "  • {}", t);
        }
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
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

/// Result card: top pick, likes pill and the variations.
pub fn nickname_html(page: &PageConfig, list: &NicknameList, show_extra: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<div class="card"><div class="title">{}</div>"#,
        escape_html(&page_header(page))
    );
    let _ = writeln!(
        out,
        r#"<div class="muted">추천 별명</div><div class="result">{}</div>"#,
        escape_html(list.top_pick.as_deref().unwrap_or(NO_NICKNAME_YET))
    );
    let _ = writeln!(
        out,
        r#"<span class="small-pill">{}</span>"#,
        escape_html(&likes_summary(&list.likes))
    );
    let _ = writeln!(out, "<hr/>");
    for nick in &list.candidates {
        let _ = writeln!(out, r#"<div class="nickname">{}</div>"#, escape_html(nick));
    }
    if show_extra {
        let _ = writeln!(out, "<ul class=\"extra\">");
        for t in EXTRA_TEMPLATES {
            let _ = writeln!(out, "<li>{}</li>", escape_html(t));
        }
        let _ = writeln!(out, "</ul>");
    }
    out.push_str("</div>\n");
    out
}
