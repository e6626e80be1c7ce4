use crate::{
    db::{
        db::Db,
        tasks::Tasks,
        templates::{TaskSeed, TaskTemplate, Templates},
    },
    libs::{formatter::parse_timestamp, messages::Message, task::Priority, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    command: Option<TemplateCommand>,
}

#[derive(Debug, Subcommand)]
enum TemplateCommand {
    /// Create a new template
    Create {
        /// Template name (unique identifier)
        name: Option<String>,
        /// Title for tasks created from this template
        #[arg(long)]
        title: Option<String>,
        /// Template description
        #[arg(short, long)]
        description: Option<String>,
        /// Default priority for seeded tasks
        #[arg(short, long)]
        priority: Option<String>,
        /// Default tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Default category ID
        #[arg(long)]
        category: Option<i64>,
    },
    /// List all templates
    List,
    /// Edit an existing template
    Edit {
        /// Template name to edit
        name: Option<String>,
    },
    /// Delete a template (tasks created from it are untouched)
    Delete {
        /// Template name to delete
        name: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a task from a template
    Apply {
        /// Template name to apply
        name: Option<String>,
        /// Due date for the new task
        #[arg(long)]
        due: Option<String>,
    },
}

pub fn cmd(args: TemplateArgs) -> Result<()> {
    match args.command {
        Some(TemplateCommand::Create {
            name,
            title,
            description,
            priority,
            tags,
            category,
        }) => handle_create(name, title, description, priority, tags, category),
        Some(TemplateCommand::List) => handle_list(),
        Some(TemplateCommand::Edit { name }) => handle_edit(name),
        Some(TemplateCommand::Delete { name, yes }) => handle_delete(name, yes),
        Some(TemplateCommand::Apply { name, due }) => handle_apply(name, due),
        None => handle_interactive(),
    }
}

fn handle_create(
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    tags: Vec<String>,
    category: Option<i64>,
) -> Result<()> {
    let db = Db::new()?;
    let mut templates = Templates::new(&db);

    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTemplateName.to_string())
            .interact_text()?,
    };

    if templates.exists(&name)? {
        msg_error!(Message::TemplateAlreadyExists(name));
        return Ok(());
    }

    let title = match title {
        Some(title) => title,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskTitle.to_string())
            .interact_text()?,
    };

    let priority = match priority {
        Some(raw) => match raw.parse::<Priority>() {
            Ok(priority) => priority,
            Err(_) => {
                msg_error!(Message::InvalidPriority(raw));
                return Ok(());
            }
        },
        None => Priority::default(),
    };

    let seed = TaskSeed {
        title,
        description: String::new(),
        priority,
        tags,
        category_id: category,
        recurrence: None,
    };
    let template = TaskTemplate::new(&name, description, seed);
    templates.create(&template)?;

    msg_success!(Message::TemplateCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let db = Db::new()?;
    let templates = Templates::new(&db).list()?;

    if templates.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(());
    }

    msg_print!(Message::TemplatesHeader, true);
    View::templates(&templates)?;
    Ok(())
}

fn handle_edit(name: Option<String>) -> Result<()> {
    let db = Db::new()?;
    let mut templates = Templates::new(&db);

    let name = match name {
        Some(name) => name,
        None => match select_template(&mut templates)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let mut template = match templates.get(&name)? {
        Some(template) => template,
        None => {
            msg_error!(Message::TemplateNotFound(name));
            return Ok(());
        }
    };

    let title = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(template.seed.title.clone())
        .interact_text()?;

    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTemplateDescription.to_string())
        .default(template.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let priority_raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskPriority.to_string())
        .default(template.seed.priority.to_string())
        .interact_text()?;
    let priority = match priority_raw.parse::<Priority>() {
        Ok(priority) => priority,
        Err(_) => {
            msg_error!(Message::InvalidPriority(priority_raw));
            return Ok(());
        }
    };

    template.seed.title = title;
    template.seed.priority = priority;
    template.description = if description.is_empty() { None } else { Some(description) };
    templates.update(&template)?;

    msg_success!(Message::TemplateUpdated(name));
    Ok(())
}

fn handle_delete(name: Option<String>, yes: bool) -> Result<()> {
    let db = Db::new()?;
    let mut templates = Templates::new(&db);

    let name = match name {
        Some(name) => name,
        None => match select_template(&mut templates)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    if !templates.exists(&name)? {
        msg_error!(Message::TemplateNotFound(name));
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTemplate(name.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    templates.delete(&name)?;
    msg_success!(Message::TemplateDeleted(name));
    Ok(())
}

fn handle_apply(name: Option<String>, due: Option<String>) -> Result<()> {
    let db = Db::new()?;
    let mut templates = Templates::new(&db);

    let name = match name {
        Some(name) => name,
        None => match select_template(&mut templates)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let template = match templates.get(&name)? {
        Some(template) => template,
        None => {
            msg_error!(Message::TemplateNotFound(name));
            return Ok(());
        }
    };

    let mut task = template.instantiate();
    if let Some(raw) = due {
        match parse_timestamp(&raw) {
            Some(due) => task.due_date = Some(due),
            None => {
                msg_error!(Message::InvalidDate(raw));
                return Ok(());
            }
        }
    }

    let id = Tasks::new(&db).insert(&task)?;
    msg_success!(Message::TemplateApplied(name, id));
    Ok(())
}

/// Interactive template picker; `None` when there is nothing to pick.
fn select_template(templates: &mut Templates) -> Result<Option<String>> {
    let all = templates.list()?;
    if all.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(None);
    }

    let names: Vec<String> = all.iter().map(|t| t.name.clone()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTemplate.to_string())
        .items(&names)
        .interact()?;

    Ok(Some(names[selection].clone()))
}

fn handle_interactive() -> Result<()> {
    let options = vec!["Create template", "List templates", "Apply template", "Delete template"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTemplateAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => handle_create(None, None, None, None, Vec::new(), None),
        1 => handle_list(),
        2 => handle_apply(None, None),
        3 => handle_delete(None, false),
        _ => Ok(()),
    }
}
