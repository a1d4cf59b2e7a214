//! # Concrete Calculator CLI
//!
//! Prompt-driven front end for `calc_core`. Walks through the same inputs as
//! the calculator form, prints the results, and can save them to the local
//! history.
//!
//! ## Usage
//!
//! ```text
//! calc_cli              interactive estimate
//! calc_cli history      list saved calculations
//! calc_cli show <id>    print one saved calculation as JSON
//! calc_cli delete <id>  delete one saved calculation
//! calc_cli clear        delete all saved calculations
//! ```
//!
//! Data lives in `$CONCRETE_CALC_HOME` (default `.concrete_calc`):
//! `settings.json` for defaults and `<history key>.json` for the history.
//! Set `RUST_LOG` to change log verbosity.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::calculations::Currency;
use calc_core::history::History;
use calc_core::input::DimensionField;
use calc_core::materials::PsiClass;
use calc_core::store::FileStore;
use calc_core::units::LengthUnit;
use calc_core::{CalcError, CalcResult, Session, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HOME_ENV: &str = "CONCRETE_CALC_HOME";
const DEFAULT_HOME: &str = ".concrete_calc";

fn prompt(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> CalcResult<()> {
    let home = home_dir();
    tracing::debug!(home = %home.display(), "using data directory");
    let settings = Settings::load(&home.join("settings.json"))?;
    let history = History::with_key(FileStore::open(&home)?, settings.history_key.clone());

    match args.first().map(String::as_str) {
        None | Some("calc") => interactive(&settings, &history),
        Some("history") => {
            list_history(&history);
            Ok(())
        }
        Some("show") => {
            let id = parse_id(args.get(1))?;
            match history.find(id) {
                Some(record) => {
                    let json = serde_json::to_string_pretty(&record).map_err(CalcError::serialization)?;
                    println!("{}", json);
                }
                None => println!("No saved calculation with id {}.", id),
            }
            Ok(())
        }
        Some("delete") => {
            let id = parse_id(args.get(1))?;
            if history.delete(id)? {
                println!("Deleted {}.", id);
            } else {
                println!("No saved calculation with id {}.", id);
            }
            Ok(())
        }
        Some("clear") => {
            let answer = prompt("Clear all saved calculations? [y/N]: ", "n");
            if answer.eq_ignore_ascii_case("y") {
                history.clear()?;
                println!("History cleared.");
            }
            Ok(())
        }
        Some(other) => Err(CalcError::invalid_input(
            "command",
            other,
            "expected one of: calc, history, show, delete, clear",
        )),
    }
}

fn parse_id(arg: Option<&String>) -> CalcResult<i64> {
    let raw = arg.map(String::as_str).unwrap_or("");
    raw.trim()
        .parse()
        .map_err(|_| CalcError::invalid_input("id", raw, "expected a numeric record id"))
}

fn interactive(settings: &Settings, history: &History<FileStore>) -> CalcResult<()> {
    println!("Concrete Calculator");
    println!("===================");
    println!();

    let mut session = Session::new(settings);
    let form = &mut session.form;

    let element_code = prompt("Element (slab/beam/column/footing) [slab]: ", "slab");
    form.set_active_code(&element_code);
    let element = form.active;

    let unit_codes: Vec<&str> = LengthUnit::ALL.iter().map(|u| u.code()).collect();
    let unit_hint = unit_codes.join("/");
    let names = element.dimension_names();
    let default_psi = form.element(element).psi.clone();
    let mut dimensions: [DimensionField; 3] = Default::default();
    for (field, name) in dimensions.iter_mut().zip(names) {
        let value = prompt(&format!("  {} value: ", name), "");
        let unit = prompt(&format!("  {} unit ({}) [m]: ", name, unit_hint), "m");
        *field = DimensionField::new(value, unit);
    }
    let psi_hint: Vec<String> = PsiClass::ALL.iter().map(|p| p.psi().to_string()).collect();
    let psi = prompt(
        &format!("  PSI ({}) [{}]: ", psi_hint.join("/"), default_psi),
        &default_psi,
    );
    let element_form = form.element_mut(element);
    element_form.dimensions = dimensions;
    element_form.psi = psi;

    println!();
    form.humidity = prompt(&format!("Humidity % [{}]: ", form.humidity), &form.humidity);
    form.temperature = prompt(
        &format!("Temperature °C [{}]: ", form.temperature),
        &form.temperature,
    );

    println!();
    let currency_codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
    form.prices.currency = prompt(
        &format!("Currency ({}) [{}]: ", currency_codes.join("/"), form.prices.currency),
        &form.prices.currency,
    );
    form.prices.cement = prompt("Cement price per bag [0]: ", "0");
    form.prices.sand = prompt("Sand price per bag [0]: ", "0");
    form.prices.gravel = prompt("Gravel price per bag [0]: ", "0");
    form.prices.water = prompt("Water price per liter [0]: ", "0");

    let summary = session.calculate()?.clone();
    let Some(outcome) = session.last() else {
        return Err(CalcError::Internal {
            message: "calculation produced no result".to_string(),
        });
    };
    let result = outcome.result;

    println!();
    println!("═══════════════════════════════════════");
    println!("  {} - {}", element, result.psi);
    println!("═══════════════════════════════════════");
    println!();
    println!("Volume:   {:.3} m³", result.volume_m3());
    println!("Mix:      {} (cement : sand : gravel)", result.estimate.mix_ratio);
    println!("Water adj: {:+.1}%", result.water_adjustment * 100.0);
    println!();
    println!("Materials ({:?}):", summary.family);
    println!("  Cement: {:<36} {}", summary.cement_qty, summary.cement_cost);
    println!("  Sand:   {:<36} {}", summary.sand_qty, summary.sand_cost);
    println!("  Gravel: {:<36} {}", summary.gravel_qty, summary.gravel_cost);
    println!("  Water:  {:<36} {}", summary.water_qty, summary.water_cost);
    println!();
    println!("═══════════════════════════════════════");
    println!("  TOTAL: {}", summary.total_cost);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(&result) {
        println!("{}", json);
    }

    println!();
    let name = prompt("Save as project name (blank to skip): ", "");
    if !name.is_empty() {
        session.form.project_name = name;
        let record = session.save(history)?;
        println!("Saved as {} ({}).", record.name, record.id);
    }

    Ok(())
}

fn list_history(history: &History<FileStore>) {
    let records = history.load();
    if records.is_empty() {
        println!("No saved calculations yet.");
        return;
    }
    for record in records {
        println!("{}  {}  [{}]  {}", record.id, record.date, record.kind, record.name);
        println!("    Total: {}", record.total);
        println!(
            "    Prices: cement {}, sand {}, gravel {}, water {} ({})",
            record.prices.cement_price,
            record.prices.sand_price,
            record.prices.gravel_price,
            record.prices.water_price,
            record.prices.currency
        );
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
