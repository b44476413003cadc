//! Parent link commands

use clap::{Args, Subcommand};
use kinship_core::PersonId;

use crate::output::{person_line, persons_table, to_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ParentArgs {
    #[command(subcommand)]
    pub command: ParentCommands,
}

#[derive(Subcommand)]
pub enum ParentCommands {
    /// Record PARENT as a parent of CHILD
    Add {
        /// Child id
        child: String,
        /// Parent id
        parent: String,
    },
    /// Remove PARENT from the parents of CHILD
    Remove {
        /// Child id
        child: String,
        /// Parent id
        parent: String,
    },
    /// List persons that could be added as a parent of CHILD
    Candidates {
        /// Child id
        child: String,
    },
}

pub async fn run(args: &ParentArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        ParentCommands::Add { child, parent } => {
            let child = ctx
                .service
                .add_parent(&PersonId::from(child.as_str()), &PersonId::from(parent.as_str()))
                .await?;

            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&child)?),
                OutputFormat::Table => {
                    println!("Added parent {} to {}", parent, person_line(&child))
                }
            }
        }
        ParentCommands::Remove { child, parent } => {
            let child = ctx
                .service
                .remove_parent(&PersonId::from(child.as_str()), &PersonId::from(parent.as_str()))
                .await?;

            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&child)?),
                OutputFormat::Table => {
                    println!("Removed parent {} from {}", parent, person_line(&child))
                }
            }
        }
        ParentCommands::Candidates { child } => {
            let candidates = ctx
                .service
                .available_parents(&PersonId::from(child.as_str()))
                .await?;

            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&candidates)?),
                OutputFormat::Table if candidates.is_empty() => {
                    println!("No one can be added as a parent of {}", child)
                }
                OutputFormat::Table => print!("{}", persons_table(&candidates)),
            }
        }
    }

    Ok(())
}
