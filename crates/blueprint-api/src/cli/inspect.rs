//! `bprint inspect`: list modules in display order or show one module.

use std::path::Path;

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use blueprint_core::blueprint::{load_blueprint_file, overview};
use blueprint_types::blueprint::{Module, ModuleKind};

pub fn inspect_blueprint(file: &Path, module_id: Option<i64>, json: bool) -> Result<()> {
    let blueprint = load_blueprint_file(file)?;

    if let Some(id) = module_id {
        let Some(module) = blueprint.module(id) else {
            bail!("module {id} not found in '{}'", blueprint.name);
        };
        return show_module(module, json);
    }

    let report = overview(&blueprint);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} {}",
        style("Blueprint:").bold(),
        style(&report.name).cyan(),
        style(format!("({} modules)", report.module_count)).dim()
    );
    println!();

    if report.modules.is_empty() {
        println!("  {} Blueprint has no modules.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Label").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Handler").fg(Color::White),
        Cell::new("Position").fg(Color::White),
    ]);

    for module in &report.modules {
        table.add_row(vec![
            Cell::new(module.id),
            Cell::new(&module.label).fg(Color::Cyan),
            Cell::new(&module.module),
            kind_cell(module.kind),
            Cell::new(format!("({}, {})", module.position.x, module.position.y)).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

fn kind_cell(kind: ModuleKind) -> Cell {
    let cell = Cell::new(kind.to_string());
    match kind {
        ModuleKind::Http => cell.fg(Color::Green),
        ModuleKind::Json => cell.fg(Color::Blue),
        ModuleKind::Webhook => cell.fg(Color::Magenta),
        ModuleKind::Unsupported => cell.fg(Color::DarkGrey),
    }
}

fn show_module(module: &Module, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(module)?);
        return Ok(());
    }

    let position = module.position();
    println!();
    println!("  {} {}", style("Label:").bold(), style(&module.label).cyan());
    println!("  {} {}", style("ID:").bold(), module.id);
    println!("  {} {}", style("Type:").bold(), module.module_type);
    println!("  {} {}", style("Handler:").bold(), module.kind());
    println!("  {} {}", style("Version:").bold(), module.version);
    println!(
        "  {} {}",
        style("Position:").bold(),
        style(format!("({}, {})", position.x, position.y)).dim()
    );

    println!();
    println!("  {}", style("Parameters").bold().underlined());
    println!("{}", indent(&serde_json::to_string_pretty(&module.parameters)?));

    if let Some(mapper) = &module.mapper {
        println!();
        println!("  {}", style("Mapper").bold().underlined());
        println!("{}", indent(&serde_json::to_string_pretty(mapper)?));
    }
    println!();
    Ok(())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
