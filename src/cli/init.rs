use std::io::Write;

use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn run(
    endpoint: Option<String>,
    sheet: Option<String>,
    folder: Option<String>,
    identifier: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();

    if let Some(url) = endpoint {
        settings.endpoint_url = url.trim().to_string();
    } else if settings.endpoint_url.is_empty() {
        let input = prompt("Ledger endpoint URL: ");
        if !input.is_empty() {
            settings.endpoint_url = input;
        }
    }

    if let Some(name) = sheet {
        settings.sheet_name = name.trim().to_string();
    }
    if let Some(id) = folder {
        settings.upload_folder = id.trim().to_string();
    }

    if let Some(id) = identifier {
        settings.identifier = id.trim().to_string();
    } else if settings.identifier.is_empty() {
        let input = prompt("Login identifier: ");
        if !input.is_empty() {
            settings.identifier = input;
        }
    }

    save_settings(&settings)?;

    println!("Initialized fmsdesk");
    println!("Endpoint:  {}", if settings.endpoint_url.is_empty() { "(not set)" } else { &settings.endpoint_url });
    println!("Sheet:     {}", settings.sheet_name);
    println!("Identity:  {}", if settings.identifier.is_empty() { "(not set)" } else { &settings.identifier });
    Ok(())
}

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = std::io::stdout().flush();
    let mut input = String::new();
    let _ = std::io::stdin().read_line(&mut input);
    input.trim().to_string()
}
