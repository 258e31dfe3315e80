//! Command dispatch: session guards, service calls and output.

use anyhow::bail;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use cleanheat_core::aggregation::{filter_by_query, AmountPolicy, ListView, YearFilter};
use cleanheat_core::applications::{ApplicationEditor, ApplicationRecord, Checklist};
use cleanheat_core::forms::ApplicationForm;
use cleanheat_core::utils::time_utils::current_year;

use crate::cli::{ApplicationsCommand, Cli, ClientsCommand, Commands};
use crate::main_lib::AppState;
use crate::{prompt, render};

pub async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    let out = Output { json: cli.json };
    match cli.command {
        Commands::Login { email, password } => login(&state, &out, &email, password).await,
        Commands::Logout => {
            state.auth.logout()?;
            out.message("Signed out.");
            Ok(())
        }
        Commands::Whoami => {
            if out.json {
                out.print_json(&json!({ "user": state.session.user() }))
            } else {
                println!("{}", render::session(&state.session));
                Ok(())
            }
        }
        Commands::Applications { command } => {
            state.session.require_user()?;
            applications(&state, &out, command).await
        }
        Commands::Clients { command } => {
            state.session.require_user()?;
            clients(&state, &out, command).await
        }
    }
}

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn message(&self, text: &str) {
        if self.json {
            println!("{}", json!({ "message": text }));
        } else {
            println!("{}", text);
        }
    }

    fn application(&self, record: &ApplicationRecord) -> anyhow::Result<()> {
        if self.json {
            self.print_json(record)
        } else {
            println!("{}", render::application_detail(record));
            Ok(())
        }
    }
}

async fn login(
    state: &AppState,
    out: &Output,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    // Guard before prompting so a signed-in user is not asked for a password.
    state.session.require_guest()?;
    let password = match password {
        Some(password) => password,
        None => prompt::read_password("Password: ")?,
    };
    let session = state.auth.login(&state.session, email, &password).await?;
    if out.json {
        out.print_json(&json!({ "user": session.user() }))
    } else {
        println!("{}", render::session(&session));
        Ok(())
    }
}

async fn applications(
    state: &AppState,
    out: &Output,
    command: ApplicationsCommand,
) -> anyhow::Result<()> {
    let service = &state.applications;
    match command {
        ApplicationsCommand::List {
            year,
            query,
            strict_amounts,
        } => {
            let this_year = current_year();
            let year = year.unwrap_or(YearFilter::Year(this_year));
            let policy = if strict_amounts {
                AmountPolicy::Strict
            } else {
                AmountPolicy::CoerceToZero
            };
            let records = service.get_applications().await?;
            let view = ListView::build(&records, &query, year, this_year, policy)?;
            if out.json {
                let years: Vec<String> = view.years.iter().map(ToString::to_string).collect();
                return out.print_json(&json!({
                    "year": view.year.to_string(),
                    "years": years,
                    "summary": view.summary,
                    "applications": view.visible,
                }));
            }
            println!("{}", render::summary(&view.summary, view.year));
            if !view.visible.is_empty() {
                println!();
                println!("{}", render::application_rows(&view.visible));
            }
            Ok(())
        }
        ApplicationsCommand::Show { id } => {
            let record = service.get_application(id).await?;
            out.application(&record)
        }
        ApplicationsCommand::Create { details, steps } => {
            let mut checklist = Checklist::default();
            for step in steps {
                checklist.set(step, true);
            }
            let form = ApplicationForm {
                details: details.into_form(),
                checklist,
            };
            let record = service.create_application(form).await?;
            out.application(&record)
        }
        ApplicationsCommand::Edit {
            id,
            assignments,
            toggles,
        } => {
            let mut editor = ApplicationEditor::new(service.get_application(id).await?);
            if !assignments.is_empty() {
                editor.begin_edit();
                for (field, value) in &assignments {
                    editor.set_field(*field, value)?;
                }
            }
            for item in toggles {
                editor.toggle(item);
            }
            if !editor.is_dirty() {
                out.message("Nothing to change.");
                return Ok(());
            }
            editor.validate()?;
            let saved = service.update_application(editor.save_body()).await?;
            editor.apply_saved(saved);
            out.application(editor.saved())
        }
        ApplicationsCommand::Note { id, text } => {
            let mut editor = ApplicationEditor::new(service.get_application(id).await?);
            if !editor.add_note(&text, Utc::now()) {
                bail!("Note text is empty");
            }
            let saved = service.update_application(editor.save_body()).await?;
            editor.apply_saved(saved);
            out.application(editor.saved())
        }
        ApplicationsCommand::Delete { id, yes } => {
            if !yes && !prompt::confirm(&format!("Delete application #{}?", id))? {
                out.message("Cancelled.");
                return Ok(());
            }
            service.delete_application(id).await?;
            out.message(&format!("Deleted application #{}.", id));
            Ok(())
        }
        ApplicationsCommand::Duplicate { id, yes } => {
            if !yes && !prompt::confirm(&format!("Duplicate application #{}?", id))? {
                out.message("Cancelled.");
                return Ok(());
            }
            let copy = service.duplicate_application(id).await?;
            out.application(&copy)
        }
        ApplicationsCommand::BulkDelete { ids, code } => {
            let code = match code {
                Some(code) => code,
                None => prompt::read_line(&format!(
                    "Code to delete {} application(s): ",
                    ids.len()
                ))?,
            };
            if code.trim().is_empty() {
                out.message("Cancelled.");
                return Ok(());
            }
            let deleted = service.bulk_delete_applications(ids, &code).await?;
            out.message(&format!("Deleted {} application(s).", deleted));
            Ok(())
        }
    }
}

async fn clients(state: &AppState, out: &Output, command: ClientsCommand) -> anyhow::Result<()> {
    let service = &state.clients;
    match command {
        ClientsCommand::List { query } => {
            let this_year = current_year();
            let records = service.get_clients().await?;
            let summary =
                service.year_to_date(&records, &query, this_year, AmountPolicy::default())?;
            let visible = filter_by_query(&records, &query);
            if out.json {
                return out.print_json(&json!({
                    "year": this_year,
                    "summary": summary,
                    "clients": visible,
                }));
            }
            println!("{}", render::summary(&summary, YearFilter::Year(this_year)));
            if !visible.is_empty() {
                println!();
                println!("{}", render::client_rows(&visible));
            }
            Ok(())
        }
        ClientsCommand::Create { details } => {
            let record = service.create_client(details.into_form()).await?;
            if out.json {
                out.print_json(&record)
            } else {
                println!("Created client #{} {}", record.id, record.details.full_name);
                Ok(())
            }
        }
    }
}
