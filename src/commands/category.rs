use crate::{
    db::{
        categories::{Categories, Category},
        db::Db,
        tasks::Tasks,
    },
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Create {
        /// Category name
        name: Option<String>,
        /// Display color, e.g. #ff8800
        #[arg(short, long)]
        color: Option<String>,
        /// Parent category ID
        #[arg(long)]
        parent: Option<i64>,
    },
    /// List all categories
    List,
    /// Edit a category
    Edit {
        /// Category ID
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
        /// New parent category ID
        #[arg(long)]
        parent: Option<i64>,
        /// Detach from the parent, making this a root category
        #[arg(long)]
        root: bool,
    },
    /// Delete a category, clearing the link on its tasks
    Delete {
        /// Category ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show tasks belonging to a category
    Tasks {
        /// Category ID
        id: i64,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    match args.command {
        Some(CategoryCommand::Create { name, color, parent }) => handle_create(name, color, parent),
        Some(CategoryCommand::List) => handle_list(),
        Some(CategoryCommand::Edit {
            id,
            name,
            color,
            parent,
            root,
        }) => handle_edit(id, name, color, parent, root),
        Some(CategoryCommand::Delete { id, yes }) => handle_delete(id, yes),
        Some(CategoryCommand::Tasks { id }) => handle_tasks(id),
        None => handle_interactive(),
    }
}

fn handle_create(name: Option<String>, color: Option<String>, parent: Option<i64>) -> Result<()> {
    let db = Db::new()?;
    let mut categories = Categories::new(&db);

    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryName.to_string())
            .interact_text()?,
    };

    if let Some(parent_id) = parent {
        if categories.get(parent_id)?.is_none() {
            msg_error!(Message::CategoryNotFoundWithId(parent_id));
            return Ok(());
        }
    }

    let mut category = Category::new(&name, &color.unwrap_or_else(|| "#808080".to_string()));
    category.parent_id = parent;
    categories.create(&category)?;

    msg_success!(Message::CategoryCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let categories = Categories::new(&db).list()?;

    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(&categories)?;
    Ok(())
}

fn handle_edit(id: i64, name: Option<String>, color: Option<String>, parent: Option<i64>, root: bool) -> Result<()> {
    let db = Db::new()?;
    let mut categories = Categories::new(&db);

    let mut category = match categories.get(id)? {
        Some(category) => category,
        None => {
            msg_error!(Message::CategoryNotFoundWithId(id));
            return Ok(());
        }
    };

    if let Some(name) = name {
        category.name = name;
    }
    if let Some(color) = color {
        category.color = color;
    }
    if root {
        category.parent_id = None;
    } else if parent.is_some() {
        category.parent_id = parent;
    }

    // A parent cycle surfaces as an error here rather than corrupting the tree.
    match categories.update(&category) {
        Ok(()) => msg_success!(Message::CategoryUpdated(category.name)),
        Err(e) => msg_error!(e),
    }
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let mut categories = Categories::new(&db);

    let category = match categories.get(id)? {
        Some(category) => category,
        None => {
            msg_error!(Message::CategoryNotFoundWithId(id));
            return Ok(());
        }
    };

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(category.name.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let cleared = categories.delete(id)?;
    msg_success!(Message::CategoryDeleted(category.name, cleared));
    Ok(())
}

fn handle_tasks(id: i64) -> Result<()> {
    let db = Db::new()?;

    if Categories::new(&db).get(id)?.is_none() {
        msg_error!(Message::CategoryNotFoundWithId(id));
        return Ok(());
    }

    let tasks = Tasks::new(&db).get_by_category(id)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks)?;
    Ok(())
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Create category", "List categories", "Delete category"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectCategoryAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryName.to_string())
                .interact_text()?;
            let color: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryColor.to_string())
                .default("#808080".to_string())
                .interact_text()?;
            handle_create(Some(name), Some(color), None)
        }
        1 => handle_list(),
        2 => {
            let db = Db::new()?;
            let categories = Categories::new(&db).list()?;
            if categories.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }
            drop(db);

            let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::SelectCategoryAction.to_string())
                .items(&names)
                .interact()?;
            match categories[selection].id {
                Some(id) => handle_delete(id, false),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}
