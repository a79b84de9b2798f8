use crate::config::toml_config::GdpSettings;
use crate::core::{CountryMetric, CountrySeries, DataSource, GdpRecord, GdpView, Growth, YearRange};
use crate::utils::error::{DashError, Result};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::io::Read;

const COUNTRY_NAME_COLUMN: &str = "Country Name";
const COUNTRY_CODE_COLUMN: &str = "Country Code";

/// World Bank exports use `..` for "no data".
const MISSING_MARKERS: [&str; 2] = ["", ".."];

/// Immutable GDP table. Built once by [`GdpTable::load`] and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct GdpTable {
    /// Sorted by (country_code, year).
    records: Vec<GdpRecord>,
    /// Country codes in file order, with their names.
    countries: Vec<(String, String)>,
    names: HashMap<String, String>,
    loaded_at: DateTime<Utc>,
}

impl GdpTable {
    /// Reads the source exactly once and parses it.
    pub async fn load(source: &dyn DataSource, settings: &GdpSettings) -> Result<Self> {
        tracing::debug!("Reading GDP data from {}", source.describe());
        let bytes = source.read_all().await?;
        let table = Self::from_reader(bytes.as_slice(), settings)?;
        tracing::info!(
            "Loaded {} GDP records for {} countries from {} at {}",
            table.len(),
            table.countries.len(),
            source.describe(),
            table.loaded_at.to_rfc3339()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, settings: &GdpSettings) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let column = |wanted: &str| {
            headers
                .iter()
                .position(|h| h == wanted)
                .ok_or_else(|| DashError::data_format(format!("missing column '{}'", wanted)))
        };
        let name_idx = column(COUNTRY_NAME_COLUMN)?;
        let code_idx = column(COUNTRY_CODE_COLUMN)?;

        let year_columns: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| {
                parse_year_header(header, &settings.year_column_prefix).map(|year| (idx, year))
            })
            .filter(|(_, year)| (settings.min_year..=settings.max_year).contains(year))
            .collect();

        if year_columns.is_empty() {
            return Err(DashError::data_format(format!(
                "no year columns named '{}YYYY' between {} and {}",
                settings.year_column_prefix, settings.min_year, settings.max_year
            )));
        }
        tracing::debug!("Found {} year columns", year_columns.len());

        let mut records = Vec::new();
        let mut countries = Vec::new();
        let mut names = HashMap::new();

        for (line, row) in rdr.records().enumerate() {
            let row = row?;
            let code = row.get(code_idx).unwrap_or_default();
            if code.is_empty() {
                tracing::warn!("Skipping row {} without a country code", line + 2);
                continue;
            }
            let name = row.get(name_idx).unwrap_or_default();
            if names.contains_key(code) {
                return Err(DashError::data_format(format!(
                    "country code '{}' appears more than once",
                    code
                )));
            }
            names.insert(code.to_string(), name.to_string());
            countries.push((code.to_string(), name.to_string()));

            for &(idx, year) in &year_columns {
                let cell = row.get(idx).unwrap_or_default();
                if MISSING_MARKERS.contains(&cell) {
                    continue;
                }
                let gdp: f64 = cell.parse().map_err(|_| {
                    DashError::data_format(format!(
                        "GDP value '{}' for {} in {} is not a number",
                        cell, code, year
                    ))
                })?;
                if !gdp.is_finite() {
                    continue;
                }
                records.push(GdpRecord {
                    country_name: name.to_string(),
                    country_code: code.to_string(),
                    year,
                    gdp,
                });
            }
        }

        records.sort_by(|a, b| {
            a.country_code
                .cmp(&b.country_code)
                .then_with(|| a.year.cmp(&b.year))
        });

        Ok(Self {
            records,
            countries,
            names,
            loaded_at: Utc::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[GdpRecord] {
        &self.records
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// (code, name) pairs in file order.
    pub fn countries(&self) -> &[(String, String)] {
        &self.countries
    }

    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Smallest and largest year with at least one value.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        YearRange::new(min, max).ok()
    }

    pub fn gdp(&self, code: &str, year: i32) -> Option<f64> {
        self.records
            .binary_search_by(|r| (r.country_code.as_str(), r.year).cmp(&(code, year)))
            .ok()
            .map(|idx| self.records[idx].gdp)
    }

    /// Maps user input (codes or names, any case) to known country codes.
    /// Unknown entries are skipped, duplicates collapse.
    pub fn resolve_countries<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<String> {
        let mut resolved: Vec<String> = Vec::new();
        for input in inputs {
            let wanted = input.as_ref().trim();
            if wanted.is_empty() {
                continue;
            }
            let found = self.countries.iter().find(|(code, name)| {
                code.eq_ignore_ascii_case(wanted) || name.to_lowercase() == wanted.to_lowercase()
            });
            match found {
                Some((code, _)) if !resolved.contains(code) => resolved.push(code.clone()),
                Some(_) => {}
                None => tracing::warn!("Unknown country '{}', ignoring it", wanted),
            }
        }
        resolved
    }

    /// Records inside `range` whose code is selected.
    pub fn filter<S: AsRef<str>>(&self, range: &YearRange, codes: &[S]) -> Vec<GdpRecord> {
        let selected: HashSet<&str> = codes.iter().map(|c| c.as_ref()).collect();
        self.records
            .iter()
            .filter(|r| range.contains(r.year) && selected.contains(r.country_code.as_str()))
            .cloned()
            .collect()
    }

    /// One metric per selected country with data in `range`, in selection order.
    pub fn metrics<S: AsRef<str>>(&self, range: &YearRange, codes: &[S]) -> Vec<CountryMetric> {
        let mut seen = HashSet::new();
        let mut metrics = Vec::new();

        for code in codes.iter().map(|c| c.as_ref()) {
            if !seen.insert(code) {
                continue;
            }
            let has_data = self
                .records
                .iter()
                .any(|r| r.country_code == code && range.contains(r.year));
            if !has_data {
                tracing::debug!("No GDP data for {} in {}", code, range);
                continue;
            }

            let first_gdp = self.gdp(code, range.from());
            let last_gdp = self.gdp(code, range.to());
            metrics.push(CountryMetric {
                country_code: code.to_string(),
                country_name: self.country_name(code).unwrap_or(code).to_string(),
                first_year: range.from(),
                last_year: range.to(),
                first_gdp,
                last_gdp,
                growth: Growth::between(first_gdp, last_gdp),
            });
        }

        metrics
    }

    /// Per-country chart lines for the filtered records.
    pub fn series<S: AsRef<str>>(&self, range: &YearRange, codes: &[S]) -> Vec<CountrySeries> {
        let mut series: Vec<CountrySeries> = Vec::new();
        for record in self.filter(range, codes) {
            match series.last_mut() {
                Some(line) if line.country_code == record.country_code => {
                    line.points.push((record.year, record.gdp));
                }
                _ => series.push(CountrySeries {
                    country_code: record.country_code,
                    country_name: record.country_name,
                    points: vec![(record.year, record.gdp)],
                }),
            }
        }
        series
    }

    pub fn view<S: AsRef<str>>(&self, range: &YearRange, codes: &[S]) -> GdpView {
        GdpView {
            range: *range,
            countries: codes.iter().map(|c| c.as_ref().to_string()).collect(),
            records: self.filter(range, codes),
            metrics: self.metrics(range, codes),
        }
    }
}

fn parse_year_header(header: &str, prefix: &str) -> Option<i32> {
    let digits = header.strip_prefix(prefix)?;
    if digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Country Name,Country Code,Indicator Name,1960,1961,1962,1963
Germany,DEU,GDP (current US$),100,110,,150
France,FRA,GDP (current US$),0,50,60,70
Japan,JPN,GDP (current US$),..,20,30,
";

    fn table() -> GdpTable {
        GdpTable::from_reader(SAMPLE.as_bytes(), &GdpSettings::default()).unwrap()
    }

    #[test]
    fn test_parse_skips_missing_cells() {
        let table = table();
        assert_eq!(table.len(), 9);
        assert_eq!(table.gdp("DEU", 1961), Some(110.0));
        assert_eq!(table.gdp("DEU", 1962), None);
        assert_eq!(table.gdp("JPN", 1960), None);
        assert_eq!(table.country_name("FRA"), Some("France"));
        assert_eq!(table.year_bounds(), Some(YearRange::new(1960, 1963).unwrap()));
    }

    #[test]
    fn test_year_prefix_and_bounds() {
        let csv = "Country Name,Country Code,YR1959,YR1960,YR2023\nKorea,KOR,1,2,3\n";
        let settings = GdpSettings {
            year_column_prefix: "YR".to_string(),
            ..GdpSettings::default()
        };
        let table = GdpTable::from_reader(csv.as_bytes(), &settings).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.gdp("KOR", 1960), Some(2.0));
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let csv = "Name,Country Code,1960\nKorea,KOR,1\n";
        let err = GdpTable::from_reader(csv.as_bytes(), &GdpSettings::default()).unwrap_err();
        assert!(matches!(err, DashError::DataFormatError { .. }));
    }

    #[test]
    fn test_duplicate_country_is_error() {
        let csv = "Country Name,Country Code,1960\nKorea,KOR,1\nKorea,KOR,2\n";
        assert!(GdpTable::from_reader(csv.as_bytes(), &GdpSettings::default()).is_err());
    }

    #[test]
    fn test_non_numeric_value_is_error() {
        let csv = "Country Name,Country Code,1960\nKorea,KOR,lots\n";
        assert!(GdpTable::from_reader(csv.as_bytes(), &GdpSettings::default()).is_err());
    }

    #[test]
    fn test_filter_respects_range_and_selection() {
        let table = table();
        let range = YearRange::new(1961, 1962).unwrap();
        let rows = table.filter(&range, &["DEU", "JPN"]);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| range.contains(r.year)));
        assert!(rows
            .iter()
            .all(|r| r.country_code == "DEU" || r.country_code == "JPN"));
        assert!(table.filter(&range, &[] as &[&str]).is_empty());
    }

    #[test]
    fn test_metrics_growth_and_na() {
        let table = table();
        let range = YearRange::new(1960, 1963).unwrap();
        let metrics = table.metrics(&range, &["DEU", "FRA", "JPN"]);
        assert_eq!(metrics.len(), 3);

        assert_eq!(metrics[0].country_code, "DEU");
        assert_eq!(metrics[0].growth, Growth::Percent(50.0));

        // first year is zero
        assert_eq!(metrics[1].growth, Growth::NotAvailable);
        // first and last year absent
        assert_eq!(metrics[2].first_gdp, None);
        assert_eq!(metrics[2].growth.to_string(), "n/a");
    }

    #[test]
    fn test_metrics_skip_countries_without_data() {
        let table = table();
        let range = YearRange::new(1963, 1963).unwrap();
        let metrics = table.metrics(&range, &["JPN", "XXX"]);
        assert!(metrics.is_empty());
    }

    #[test]
    fn test_resolve_countries_by_code_or_name() {
        let table = table();
        let resolved = table.resolve_countries(&["deu", "France", "Atlantis", "DEU", " "]);
        assert_eq!(resolved, vec!["DEU", "FRA"]);
    }

    #[test]
    fn test_series_groups_by_country() {
        let table = table();
        let range = YearRange::new(1960, 1963).unwrap();
        let series = table.series(&range, &["FRA", "DEU"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].country_code, "DEU");
        assert_eq!(series[0].points, vec![(1960, 100.0), (1961, 110.0), (1963, 150.0)]);
        assert_eq!(series[1].points.len(), 4);
    }
}
