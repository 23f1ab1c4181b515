use super::ui;
use crate::core::format::normalize_code;
use crate::core::{RateProvider, RateSource, RateStatus, RateTable, get_rate};
use anyhow::{Result, bail};
use comfy_table::{Cell, CellAlignment};

/// One-line description of which rates are in effect.
pub fn status_line(status: &RateStatus) -> String {
    let text = match (status.source, status.last_updated) {
        (RateSource::Live, Some(updated)) => format!(
            "Using live rates, last updated {}",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        _ if status.is_loading => "Live rates still loading, using fallback rates".to_string(),
        _ => "Live rates unavailable, using fallback rates".to_string(),
    };
    let style_type = match status.source {
        RateSource::Live => ui::StyleType::Subtle,
        RateSource::Fallback => ui::StyleType::Warning,
    };
    ui::style_text(&text, style_type)
}

/// Renders every known currency quoted against `base`, sorted by code.
pub fn display_rates_table(rates: &RateTable, base: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {base}")),
        ui::header_cell(&format!("In {base}")),
    ]);

    for code in rates.codes() {
        let per_base = get_rate(rates, base, code);
        let in_base = get_rate(rates, code, base);
        table.add_row(vec![
            Cell::new(code),
            ui::format_optional_cell(per_base, |r| format!("{r:.4}")),
            ui::format_optional_cell(in_base, |r| format!("{r:.6}")),
        ]);
    }
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(&format!("Exchange rates ({base})"), ui::StyleType::Title),
        table
    )
}

pub async fn run(provider: &RateProvider, base: &str) -> Result<()> {
    let base = normalize_code(base);
    let rates = provider.rates();
    if !rates.contains(&base) {
        bail!("Unknown base currency: {}", base);
    }

    println!("{}", display_rates_table(&rates, &base));
    println!("\n{}", status_line(&provider.status()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_rates_table_lists_every_code() {
        let rates = RateTable::fallback();
        let text = console::strip_ansi_codes(&display_rates_table(&rates, "EUR")).to_string();
        assert!(text.contains("Exchange rates (EUR)"));
        for code in rates.codes() {
            assert!(text.contains(code), "missing {code}");
        }
        assert!(text.contains("1684.7826"));
    }

    #[test]
    fn test_status_line_variants() {
        let live = RateStatus {
            is_loading: false,
            last_updated: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).single(),
            source: RateSource::Live,
        };
        let text = console::strip_ansi_codes(&status_line(&live)).to_string();
        assert_eq!(text, "Using live rates, last updated 2026-10-18 09:30:00 UTC");

        let loading = RateStatus {
            is_loading: true,
            last_updated: None,
            source: RateSource::Fallback,
        };
        assert!(status_line(&loading).contains("still loading"));

        let failed = RateStatus {
            is_loading: false,
            ..loading
        };
        assert!(status_line(&failed).contains("unavailable"));
    }

    #[tokio::test]
    async fn test_unknown_base_is_rejected() {
        let provider = RateProvider::offline();
        let result = run(&provider, "zzz").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unknown base currency: ZZZ"
        );
    }
}
