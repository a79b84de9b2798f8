//! Glue between the command line and the two tools.

use crate::adapters::{HttpSource, LocalFileSource};
use crate::config::toml_config::{DashConfig, GdpSettings};
use crate::config::{GdpArgs, NicknameArgs, OutputFormat};
use crate::core::gdp::GdpTable;
use crate::core::nickname::{parse_likes, NicknameGenerator};
use crate::core::render::{self, GdpReport, NicknameReport};
use crate::core::{DataSource, NicknameRequest, YearRange};
use crate::utils::error::{DashError, Result};
use crate::utils::validation::Validate;
use std::time::Duration;

/// Applies command line overrides on top of the file configuration.
pub fn effective_gdp_settings(config: &DashConfig, args: &GdpArgs) -> GdpSettings {
    let mut settings = config.gdp.clone();
    if let Some(path) = &args.data {
        settings.data_path = path.clone();
        settings.data_url = None;
    }
    if let Some(url) = &args.url {
        settings.data_url = Some(url.clone());
    }
    settings
}

pub fn data_source(settings: &GdpSettings) -> Result<Box<dyn DataSource>> {
    match &settings.data_url {
        Some(url) => Ok(Box::new(HttpSource::new(
            url.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )?)),
        None => Ok(Box::new(LocalFileSource::new(&settings.data_path))),
    }
}

pub async fn load_table(settings: &GdpSettings) -> Result<GdpTable> {
    settings.validate()?;
    let source = data_source(settings)?;
    GdpTable::load(source.as_ref(), settings).await
}

/// Year range from the arguments, falling back to the data's own bounds.
pub fn select_range(table: &GdpTable, from: Option<i32>, to: Option<i32>) -> Result<YearRange> {
    let bounds = table.year_bounds();
    let from = from
        .or_else(|| bounds.map(|b| b.from()))
        .ok_or_else(|| DashError::data_format("the GDP table has no values"))?;
    let to = to
        .or_else(|| bounds.map(|b| b.to()))
        .ok_or_else(|| DashError::data_format("the GDP table has no values"))?;
    YearRange::new(from, to)
}

pub fn gdp_output(
    config: &DashConfig,
    table: &GdpTable,
    args: &GdpArgs,
) -> Result<String> {
    let page = &config.gdp.page;

    if args.list_countries {
        let lines: Vec<String> = table
            .countries()
            .iter()
            .map(|(code, name)| format!("{}\t{}", code, name))
            .collect();
        return Ok(lines.join("\n") + "\n");
    }

    let range = select_range(table, args.from, args.to)?;
    let requested = if args.countries.is_empty() {
        &config.gdp.default_countries
    } else {
        &args.countries
    };
    let codes = table.resolve_countries(requested);
    tracing::info!("Showing {} countries for {}", codes.len(), range);

    let view = table.view(&range, &codes);
    match args.format {
        OutputFormat::Json => render::to_json(&GdpReport {
            page,
            series: table.series(&range, &codes),
            view: &view,
        }),
        OutputFormat::Text => Ok(render::gdp_text(page, &view)),
        OutputFormat::Html => Ok(render::gdp_html(page, &view)),
    }
}

pub async fn run_gdp(config: &DashConfig, args: &GdpArgs) -> Result<String> {
    let settings = effective_gdp_settings(config, args);
    let table = load_table(&settings).await?;
    gdp_output(config, &table, args)
}

pub fn run_nickname(config: &DashConfig, args: &NicknameArgs) -> Result<String> {
    let page = &config.nickname.page;
    let request = NicknameRequest::new(&args.key_word, &parse_likes(&args.likes));
    let count = args.count.unwrap_or(config.nickname.count);

    let mut generator = match args.seed {
        Some(seed) => NicknameGenerator::with_seed(seed),
        None => NicknameGenerator::from_entropy(),
    };
    let list = generator.generate(&request, count);

    match args.format {
        OutputFormat::Text => Ok(render::nickname_text(page, &list, args.more)),
        OutputFormat::Html => Ok(render::nickname_html(page, &list, args.more)),
        OutputFormat::Json => render::to_json(&NicknameReport {
            page,
            list: &list,
            extra_templates: args
                .more
                .then(|| crate::core::nickname::EXTRA_TEMPLATES.to_vec()),
        }),
    }
}
