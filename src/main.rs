use anyhow::{bail, Context, Result};
use boleto_extractor::{Boleto, BoletoExtractor, DisplayStyle, ExtractionOutcome, ExtractorConfig};
use chrono::Utc;
use std::env;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: boleto-extractor [--format|--typed] [--json] [--details] [--verbose]
                        [--barcode PAYLOAD]... [TEXT]...

Finds Brazilian boleto numbers (44-digit barcodes / 47-digit linhas digitáveis)
in TEXT, or in stdin when no TEXT is given.

Options:
  --format           group digits in fours
  --typed            print the line as typed on the boleto
  --json             print the extraction outcome as JSON
  --details          decode bank, due date and amount for each number
  --verbose          debug logging
  --barcode PAYLOAD  decoded barcode payload, checked before the text
  -h, --help         show this message";

#[derive(Debug, Default)]
struct CliArgs {
    style: Option<DisplayStyle>,
    json: bool,
    details: bool,
    verbose: bool,
    payloads: Vec<String>,
    text: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Option<CliArgs>> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--format" => cli.style = Some(DisplayStyle::Grouped),
            "--typed" => cli.style = Some(DisplayStyle::Typed),
            "--json" => cli.json = true,
            "--details" => cli.details = true,
            "-v" | "--verbose" => cli.verbose = true,
            "--barcode" => {
                let payload = iter.next().context("--barcode needs a PAYLOAD")?;
                cli.payloads.push(payload.clone());
            }
            flag if flag.starts_with("--") => bail!("unknown option: {}\n\n{}", flag, USAGE),
            text => cli.text.push(text.to_string()),
        }
    }

    Ok(Some(cli))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(cli: &CliArgs) -> Result<String> {
    if !cli.text.is_empty() {
        return Ok(cli.text.join(" "));
    }
    if !cli.payloads.is_empty() {
        return Ok(String::new());
    }

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(cli) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    init_logging(cli.verbose);

    let mut config = ExtractorConfig::from_env();
    match cli.style {
        Some(style) => config.display_style = style,
        // without a flag the numbers print bare unless BOLETO_DISPLAY says otherwise
        None if env::var(boleto_extractor::config::ENV_DISPLAY).is_err() => {
            config.display_style = DisplayStyle::Plain
        }
        None => {}
    }

    let text = read_input(&cli)?;
    let extractor = BoletoExtractor::with_config(config);
    let outcome = extractor.extract(&text, &cli.payloads);

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{}", json);
    } else {
        print_outcome(&outcome, cli.details)?;
    }

    if outcome.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome(outcome: &ExtractionOutcome, details: bool) -> Result<()> {
    if outcome.is_empty() {
        println!("❌ No boleto numbers found");
        return Ok(());
    }

    println!("\nFound {} boleto number(s):", outcome.count);
    println!("{}", "-".repeat(50));

    let today = Utc::now().date_naive();
    for (i, (number, formatted)) in outcome
        .boleto_numbers
        .iter()
        .zip(&outcome.formatted_numbers)
        .enumerate()
    {
        println!("{}. {}", i + 1, formatted);

        if details {
            let boleto = Boleto::parse(number)
                .with_context(|| format!("Failed to decode boleto number {}", number))?;
            let info = boleto.details(today);
            println!(
                "   Bank:     {} {}",
                info.bank_code,
                info.bank_name.unwrap_or("(unknown bank)")
            );
            match info.due_date {
                Some(date) => println!("   Due date: {}", date.format("%d/%m/%Y")),
                None => println!("   Due date: (none)"),
            }
            println!("   Amount:   {}", info.amount);
            println!("   Barcode:  {}", info.barcode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["--typed", "--json", "--barcode", "123", "some", "text"]))
            .unwrap()
            .unwrap();
        assert_eq!(cli.style, Some(DisplayStyle::Typed));
        assert!(cli.json);
        assert_eq!(cli.payloads, vec!["123"]);
        assert_eq!(cli.text, vec!["some", "text"]);
    }

    #[test]
    fn test_parse_args_errors_and_help() {
        assert!(parse_args(&args(&["--barcode"])).is_err());
        assert!(parse_args(&args(&["--nope"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().is_none());
    }
}
