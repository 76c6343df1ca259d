use std::fs;
use std::path::Path;

use fillin_core::config::{ConfigLoader, default_config_path};
use fillin_core::{ProcessOutcome, process};
use tracing::debug;

use crate::FillArgs;
use crate::prompt::{CliAnswerSource, parse_var_args};

pub fn run(config: Option<&Path>, args: FillArgs) {
    let cfg = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL fillin fill");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    crate::logging::init(&cfg);

    let text = match super::load_template_text(&cfg, &args.template) {
        Ok(t) => t,
        Err(msg) => {
            println!("FAIL fillin fill");
            println!("{msg}");
            std::process::exit(1);
        }
    };

    let mut provided = parse_var_args(&args.vars);
    if let Some(ref path) = args.answers {
        match read_answers_file(path) {
            Ok(pairs) => {
                for (name, value) in pairs {
                    // --var wins over the answers file.
                    provided.entry(name).or_insert(value);
                }
            }
            Err(msg) => {
                println!("FAIL fillin fill");
                println!("{msg}");
                std::process::exit(1);
            }
        }
    }

    debug!(template = %args.template, provided = provided.len(), "filling template");

    let mut source = CliAnswerSource::new(provided, args.batch);
    match process(&text, &mut source) {
        Ok(ProcessOutcome::Rendered(rendered)) => write_result(&args, &rendered),
        Ok(ProcessOutcome::Canceled) => {
            eprintln!("canceled, nothing written");
            std::process::exit(130);
        }
        Err(e) => {
            println!("FAIL fillin fill");
            println!("{e}");
            std::process::exit(1);
        }
    }
}

fn write_result(args: &FillArgs, rendered: &str) {
    match args.output {
        Some(ref path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        println!("FAIL fillin fill");
                        println!(
                            "failed to create directory {}: {e}",
                            parent.display()
                        );
                        std::process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(path, rendered) {
                println!("FAIL fillin fill");
                println!("failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("OK   fillin fill");
            println!("output: {}", path.display());
        }
        None => print!("{rendered}"),
    }
}

/// Read a JSON object of name to value. Strings pass through; booleans and
/// numbers become the strings the prompt would have produced.
fn read_answers_file(path: &Path) -> Result<Vec<(String, String)>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| format!("{} is not valid JSON: {e}", path.display()))?;
    let serde_json::Value::Object(map) = parsed else {
        return Err(format!("{} must hold a JSON object", path.display()));
    };

    let mut pairs = Vec::new();
    for (name, value) in map {
        let value = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(format!("unsupported value for {name}: {other}")),
        };
        pairs.push((name, value));
    }
    Ok(pairs)
}
