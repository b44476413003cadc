//! Person commands

use clap::{Args, Subcommand};
use kinship_core::{Family, PersonId, PersonInput};

use crate::output::{person_line, persons_table, to_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a new person
    Add {
        /// Full name
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long = "born", visible_alias = "dob")]
        date_of_birth: String,
        /// Place of birth (letters, digits and spaces)
        #[arg(short, long)]
        place: Option<String>,
    },
    /// List all persons
    List,
    /// Show a person with their parents and children
    Get {
        /// Person id
        id: String,
    },
    /// Delete a person and unlink them from their children
    Delete {
        /// Person id
        id: String,
        /// Delete without confirmation
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(args: &PersonArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        PersonCommands::Add {
            name,
            date_of_birth,
            place,
        } => {
            let mut input = PersonInput::new(name.as_str(), date_of_birth.as_str());
            input.place_of_birth = place.clone();

            let person = ctx.service.create_person(&input).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&person)?),
                OutputFormat::Table => println!("Created person: {}", person_line(&person)),
            }
        }
        PersonCommands::List => {
            let persons = ctx.service.list_persons().await?;
            tracing::info!("Found {} persons", persons.len());

            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&persons)?),
                OutputFormat::Table if persons.is_empty() => println!("No persons found"),
                OutputFormat::Table => print!("{}", persons_table(&persons)),
            }
        }
        PersonCommands::Get { id } => {
            let id = PersonId::from(id.as_str());
            let person = ctx.service.get_person(&id).await?;

            if cli.format == OutputFormat::Json {
                println!("{}", to_json(&person)?);
                return Ok(());
            }

            let persons = ctx.service.list_persons().await?;
            let family = Family::new(&persons);

            println!("{}", person_line(&person));
            let parents = family.parents_of(&id);
            if parents.is_empty() {
                println!("  Parents: none");
            } else {
                println!("  Parents:");
                for parent in parents {
                    println!("    - {}", person_line(parent));
                }
            }
            let children = family.children_of(&id);
            if children.is_empty() {
                println!("  Children: none");
            } else {
                println!("  Children:");
                for child in children {
                    println!("    - {}", person_line(child));
                }
            }
        }
        PersonCommands::Delete { id, force } => {
            let id = PersonId::from(id.as_str());
            let person = ctx.service.get_person(&id).await?;

            if !force {
                println!(
                    "Use --force to confirm deletion of {} [{}]",
                    person.name, person.id
                );
                return Ok(());
            }

            ctx.service.delete_person(&id).await?;
            println!("Deleted person: {} [{}]", person.name, person.id);
        }
    }

    Ok(())
}
