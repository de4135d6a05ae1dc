//! Info panel rendering for statistics replies

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{NdviStats, Period, DATE_FORMAT};

/// Format one statistic to four decimal places, "N/A" when absent
pub fn format_stat(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Render the statistics panel: one block per currently-defined period that
/// has a `period_{i}` reply entry, in display order
pub fn render_statistics(periods: &[Period], entries: &HashMap<String, NdviStats>) -> String {
    let mut lines = vec!["Dados Ambientais:".to_string()];
    for (index, period) in periods.iter().enumerate() {
        let position = index + 1;
        if let Some(stats) = entries.get(&format!("period_{position}")) {
            lines.push(format!(
                "{} ({} - {}):",
                period.display_name(position),
                format_date(period.start_date),
                format_date(period.end_date),
            ));
            lines.push(format!("  NDVI médio: {}", format_stat(stats.ndvi_mean)));
            lines.push(format!("  NDVI mínimo: {}", format_stat(stats.ndvi_min)));
            lines.push(format!("  NDVI máximo: {}", format_stat(stats.ndvi_max)));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, DATE_FORMAT).unwrap()
    }

    fn period(name: &str, start: &str, end: &str) -> Period {
        Period {
            name: name.to_string(),
            start_date: Some(date(start)),
            end_date: Some(date(end)),
        }
    }

    #[test]
    fn formats_to_four_decimal_places() {
        assert_eq!(format_stat(Some(0.5432123)), "0.5432");
        assert_eq!(format_stat(Some(0.1)), "0.1000");
        assert_eq!(format_stat(None), "N/A");
    }

    #[test]
    fn renders_stats_with_na_for_missing_values() {
        let periods = vec![period("Seca", "2023-06-01", "2023-09-30")];
        let mut entries = HashMap::new();
        entries.insert(
            "period_1".to_string(),
            NdviStats {
                ndvi_mean: Some(0.5432123),
                ndvi_min: None,
                ndvi_max: None,
            },
        );

        let report = render_statistics(&periods, &entries);
        assert!(report.contains("Seca (2023-06-01 - 2023-09-30):"));
        assert!(report.contains("NDVI médio: 0.5432"));
        assert!(report.contains("NDVI mínimo: N/A"));
        assert!(report.contains("NDVI máximo: N/A"));
    }

    #[test]
    fn skips_periods_without_a_reply_entry() {
        let periods = vec![
            period("um", "2023-01-01", "2023-02-01"),
            period("dois", "2023-03-01", "2023-04-01"),
        ];
        let mut entries = HashMap::new();
        entries.insert("period_2".to_string(), NdviStats::default());

        let report = render_statistics(&periods, &entries);
        assert!(!report.contains("um ("));
        assert!(report.contains("dois (2023-03-01 - 2023-04-01):"));
    }

    #[test]
    fn unnamed_period_uses_positional_default() {
        let periods = vec![Period {
            name: String::new(),
            start_date: Some(date("2023-01-01")),
            end_date: Some(date("2023-02-01")),
        }];
        let mut entries = HashMap::new();
        entries.insert("period_1".to_string(), NdviStats::default());

        let report = render_statistics(&periods, &entries);
        assert!(report.contains("Período 1 (2023-01-01 - 2023-02-01):"));
    }
}
