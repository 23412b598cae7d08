//! riskcalc: Clinical risk calculators
//!
//! Command-line entry point. Takes form fields as `key=value` arguments,
//! runs one calculator, and prints the result as JSON on stdout.
//!
//! ```bash
//! riskcalc egfr idade=50 sexo=masculino etnia=preto creatinina=1.2
//! riskcalc cardio age=62 sex=female hdl=48 total-cholesterol=230 systolic-bp=145 bp-treated=true
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskcalc::adapters::{FormFields, TracingObserver};
use riskcalc::application::{CardioService, RenalService};
use riskcalc::CalculatorConfig;

const USAGE: &str = "usage: riskcalc <egfr|cardio> key=value...";

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure JSON.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("RISKCALC_LOG_FORMAT").unwrap_or_default();

    let registry = tracing_subscriber::registry().with(filter);
    match log_format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(writer))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(writer))
            .init(),
    }

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        bail!(USAGE);
    };
    let form = FormFields::from_pairs(args)?;

    let output = match command.as_str() {
        "egfr" | "tfg" => {
            let assessment = RenalService::new().assess_form(&form)?;
            serde_json::to_string_pretty(&assessment)?
        }
        "cardio" | "crc" => {
            let config = CalculatorConfig::from_env().context("loading configuration")?;
            let service = CardioService::new(Arc::new(TracingObserver), config);
            let assessment = service.assess_form(&form)?;
            serde_json::to_string_pretty(&assessment)?
        }
        other => bail!("unknown calculator {other:?}\n{USAGE}"),
    };

    println!("{output}");
    Ok(())
}
