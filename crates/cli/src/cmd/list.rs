use std::path::Path;

use fillin_core::config::{ConfigLoader, default_config_path};
use fillin_core::templates::discover_templates;

pub fn run(config: Option<&Path>) {
    let cfg = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL fillin list");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    crate::logging::init(&cfg);

    let Some(ref dir) = cfg.templates_dir else {
        println!("FAIL fillin list");
        println!("no templates_dir configured");
        if config.is_none() {
            println!("add it to {}", default_config_path().display());
        }
        std::process::exit(1);
    };

    match discover_templates(dir) {
        Ok(list) => {
            if list.is_empty() {
                println!("(no templates found)");
                return;
            }
            for t in &list {
                println!("{}", t.logical_name);
            }
            println!("-- {} templates --", list.len());
        }
        Err(e) => {
            println!("FAIL fillin list");
            println!("{e}");
            std::process::exit(1);
        }
    }
}
