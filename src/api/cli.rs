use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::core::{
    CalculationResult, SCHEMES, SchemeInputs, calculate, calculate_lenient, format_compact,
    format_currency,
};

use super::config::{DEFAULT_CONFIG_PATH, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "nivesh",
    about = "Maturity and return calculator for Indian investment schemes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate maturity value and returns for one scheme
    Calc(CalcArgs),
    /// List the supported schemes and their limits
    Schemes,
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Scheme id: sip, fd, rd, mf, stock, ppf, scss, kvp, nsc, ssy or sb
    pub scheme: String,
    #[arg(long, help = "Monthly SIP contribution")]
    pub monthly_investment: Option<f64>,
    #[arg(long, help = "One-time investment for FD, MF, stock, SCSS, KVP, NSC and SB")]
    pub principal: Option<f64>,
    #[arg(long, help = "Monthly RD deposit")]
    pub monthly_deposit: Option<f64>,
    #[arg(long, help = "Yearly PPF or SSY deposit")]
    pub yearly_deposit: Option<f64>,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub rate: Option<f64>,
    #[arg(long)]
    pub years: Option<f64>,
    #[arg(long, help = "FD compounding periods per year, defaults to 4")]
    pub compounding_frequency: Option<u32>,
    #[arg(
        long,
        help = "Skip validation and fall back to FD for unknown schemes"
    )]
    pub lenient: bool,
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}

impl CalcArgs {
    fn inputs(&self) -> SchemeInputs {
        SchemeInputs {
            monthly_investment: self.monthly_investment,
            principal: self.principal,
            monthly_deposit: self.monthly_deposit,
            yearly_deposit: self.yearly_deposit,
            rate: self.rate,
            years: self.years,
            compounding_frequency: self.compounding_frequency,
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on, overrides the config file
    pub port: Option<u16>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Calc(args) => {
            let output = run_calc(&args)?;
            println!("{output}");
        }
        Command::Schemes => println!("{}", render_schemes()),
        Command::Serve(args) => {
            let mut config = ServerConfig::load_or_default(&args.config)
                .with_context(|| format!("loading {}", args.config.display()))?;
            if let Some(port) = args.port {
                config.port = port;
            }
            super::run_http_server(config).await?;
        }
    }
    Ok(())
}

fn run_calc(args: &CalcArgs) -> anyhow::Result<String> {
    let inputs = args.inputs();
    let result = if args.lenient {
        calculate_lenient(&args.scheme, &inputs)
    } else {
        calculate(&args.scheme, &inputs)?
    };

    if args.json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(render_result(&args.scheme, &result))
    }
}

fn render_result(scheme: &str, result: &CalculationResult) -> String {
    let mut lines = vec![
        format!("Scheme:          {}", scheme.to_ascii_lowercase()),
        format!(
            "Total invested:  {}",
            format_currency(result.total_invested as f64)
        ),
        format!("Returns:         {}", format_currency(result.returns as f64)),
        format!(
            "Maturity amount: {} ({})",
            format_currency(result.maturity_amount as f64),
            format_compact(result.maturity_amount as f64)
        ),
    ];
    if let Some(absolute_return) = result.absolute_return {
        lines.push(format!("Absolute return: {absolute_return:.2}%"));
    }
    if let Some(cagr) = result.cagr {
        lines.push(format!("CAGR:            {cagr:.2}%"));
    }
    if let Some(quarterly) = result.quarterly_interest {
        lines.push(format!(
            "Quarterly payout: {}",
            format_currency(quarterly as f64)
        ));
    }
    if let Some(tenure) = &result.tenure {
        lines.push(format!("Tenure:          {tenure}"));
    }
    lines.join("\n")
}

fn render_schemes() -> String {
    let mut lines = vec![format!(
        "{:<6} {:<32} {:>10} {:>12} {:>8}",
        "ID", "NAME", "MIN", "MAX", "RATE"
    )];
    for definition in &SCHEMES {
        let max = definition
            .max_amount
            .map(format_currency)
            .unwrap_or_else(|| "-".to_string());
        let rate = match definition.fixed_rate() {
            Some(rate) => format!("{rate:.2}%"),
            None => format!("~{:.2}%", definition.rate.value()),
        };
        lines.push(format!(
            "{:<6} {:<32} {:>10} {:>12} {:>8}",
            definition.id,
            definition.name,
            format_currency(definition.min_amount),
            max,
            rate
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nivesh").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn cli_parses_calc_arguments() {
        let cli = parse(&[
            "calc",
            "sip",
            "--monthly-investment",
            "5000",
            "--rate",
            "12",
            "--years",
            "10",
        ]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc command");
        };
        assert_eq!(args.scheme, "sip");
        assert_eq!(args.inputs().monthly_investment, Some(5_000.0));
        assert!(!args.lenient);
    }

    #[test]
    fn cli_parses_serve_port_and_config() {
        let cli = parse(&["serve", "9000", "--config", "custom.toml"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn run_calc_renders_human_readable_summary() {
        let cli = parse(&[
            "calc",
            "SIP",
            "--monthly-investment",
            "5000",
            "--rate",
            "12",
            "--years",
            "10",
        ]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc command");
        };
        let output = run_calc(&args).expect("valid calculation");
        assert!(output.contains("Scheme:          sip"));
        assert!(output.contains("₹11,61,695"));
        assert!(output.contains("Absolute return: 93.62%"));
    }

    #[test]
    fn run_calc_reports_validation_errors() {
        let cli = parse(&["calc", "kvp", "--principal", "10"]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc command");
        };
        let err = run_calc(&args).expect_err("below minimum");
        assert!(err.to_string().contains("below the minimum"));
    }

    #[test]
    fn run_calc_lenient_falls_back_for_unknown_scheme() {
        let cli = parse(&[
            "calc",
            "bonds",
            "--principal",
            "10000",
            "--years",
            "3",
            "--lenient",
            "--json",
        ]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc command");
        };
        let output = run_calc(&args).expect("lenient never fails");
        assert!(output.contains("\"maturityAmount\": 12314"));
    }

    #[test]
    fn render_schemes_lists_every_scheme() {
        let table = render_schemes();
        assert_eq!(table.lines().count(), SCHEMES.len() + 1);
        assert!(table.contains("Public Provident Fund"));
        assert!(table.contains("₹1,50,000"));
    }
}
