use super::{rates::status_line, ui};
use crate::core::RateProvider;
use crate::core::format::{format_amount, normalize_code};
use anyhow::Result;

/// Outcome of a single `convert` invocation, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    pub rate: Option<f64>,
}

impl Conversion {
    pub fn compute(provider: &RateProvider, amount: f64, from: &str, to: &str) -> Self {
        let from = normalize_code(from);
        let to = normalize_code(to);
        Conversion {
            amount,
            converted: provider.convert(amount, &from, &to),
            rate: provider.get_rate(&from, &to),
            from,
            to,
        }
    }

    pub fn display(&self) -> String {
        let mut output = format!(
            "{} = {}",
            format_amount(self.amount, &self.from),
            ui::style_text(
                &format_amount(self.converted, &self.to),
                ui::StyleType::TotalValue
            )
        );

        match self.rate {
            Some(rate) => output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!("1 {} = {rate:.4} {}", self.from, self.to),
                    ui::StyleType::Subtle
                )
            )),
            None => output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!(
                        "No rate known for {} -> {}, amount left unchanged",
                        self.from, self.to
                    ),
                    ui::StyleType::Warning
                )
            )),
        }
        output
    }
}

pub async fn run(provider: &RateProvider, amount: f64, from: &str, to: &str) -> Result<()> {
    let conversion = Conversion::compute(provider, amount, from, to);
    println!("{}", conversion.display());
    println!("{}", status_line(&provider.status()));
    Ok(())
}

pub async fn run_rate(provider: &RateProvider, from: &str, to: &str) -> Result<()> {
    let from = normalize_code(from);
    let to = normalize_code(to);
    let rate = provider
        .get_rate(&from, &to)
        .map_or(ui::style_text("N/A", ui::StyleType::Error), |r| {
            ui::style_text(&format!("{r:.6}"), ui::StyleType::TotalValue)
        });

    println!(
        "{} {from} -> {to}: {rate}",
        ui::style_text("Rate", ui::StyleType::TotalLabel)
    );
    println!("{}", status_line(&provider.status()));
    Ok(())
}
