//! Lineage commands: tree, ancestors and descendants

use kinship_core::{Person, PersonId};

use crate::output::{lineage_tree, persons_table, to_json, OutputFormat};
use crate::{AppContext, Cli};

pub async fn run_tree(id: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let view = ctx.service.lineage(&PersonId::from(id)).await?;

    match cli.format {
        OutputFormat::Json => println!("{}", to_json(&view)?),
        OutputFormat::Table => print!("{}", lineage_tree(&view)),
    }
    Ok(())
}

pub async fn run_ancestors(id: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let ancestors = ctx.service.ancestors(&PersonId::from(id)).await?;
    print_relatives(&ancestors, "ancestors", id, cli.format)
}

pub async fn run_descendants(id: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let descendants = ctx.service.descendants(&PersonId::from(id)).await?;
    print_relatives(&descendants, "descendants", id, cli.format)
}

fn print_relatives(
    persons: &[Person],
    kind: &str,
    id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(&persons)?),
        OutputFormat::Table if persons.is_empty() => println!("No {} found for {}", kind, id),
        OutputFormat::Table => print!("{}", persons_table(persons)),
    }
    Ok(())
}
