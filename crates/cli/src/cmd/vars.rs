use std::path::Path;

use fillin_core::config::{ConfigLoader, default_config_path};
use fillin_core::vars::{VarType, short_date};
use fillin_core::{FieldKind, derive_field_specs, extract_variables};
use tabled::{settings::Style, Table, Tabled};

use crate::VarsArgs;

#[derive(Tabled)]
struct VarRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "List")]
    list: &'static str,
    #[tabled(rename = "Default")]
    default: String,
}

pub fn run(config: Option<&Path>, args: VarsArgs) {
    let cfg = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL fillin vars");
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
            println!("FAIL fillin vars");
            println!("{msg}");
            std::process::exit(1);
        }
    };

    let vars = match extract_variables(&text) {
        Ok(v) => v,
        Err(e) => {
            println!("FAIL fillin vars");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let fields = derive_field_specs(&vars);

    if args.json {
        match serde_json::to_string_pretty(&fields) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                println!("FAIL fillin vars");
                println!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if vars.is_empty() {
        println!("(no variables)");
        return;
    }

    let rows: Vec<VarRow> = vars
        .iter()
        .zip(&fields)
        .map(|(var, field)| VarRow {
            name: var.name.clone(),
            kind: kind_word(var.ty()),
            list: if var.wants_list() { "yes" } else { "" },
            default: default_text(&field.kind),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("-- {} variables --", rows.len());
}

fn kind_word(ty: VarType) -> &'static str {
    match ty {
        VarType::Date => "date",
        VarType::Bool => "bool",
        VarType::Text => "text",
    }
}

fn default_text(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Date { default } => short_date(*default),
        FieldKind::Bool { default } => default.to_string(),
        FieldKind::Text { .. } => String::new(),
    }
}
