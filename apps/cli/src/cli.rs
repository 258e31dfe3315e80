use clap::{ArgAction, Args, Parser, Subcommand};

use cleanheat_core::aggregation::YearFilter;
use cleanheat_core::applications::{ChecklistItem, EditableField};
use cleanheat_core::forms::ClientDetailsForm;

#[derive(Parser, Debug)]
#[command(name = "cleanheat")]
#[command(about = "Clean Heat rebate applications and clients")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Backend address. Overrides CLEANHEAT_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and remember the user.
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    /// Show the signed-in user.
    Whoami,
    #[command(alias = "apps")]
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    Clients {
        #[command(subcommand)]
        command: ClientsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationsCommand {
    /// List applications for a year with rebate totals.
    List {
        /// A year or `all`. Defaults to the current year.
        #[arg(long)]
        year: Option<YearFilter>,
        #[arg(long, short, default_value = "")]
        query: String,
        /// Fail instead of counting non-numeric amounts as zero.
        #[arg(long, default_value_t = false)]
        strict_amounts: bool,
    },
    Show {
        id: i64,
    },
    Create {
        #[command(flatten)]
        details: DetailsArgs,
        /// Checklist steps already done, e.g. `manual-j` or `name-plate-photos`.
        #[arg(long = "step")]
        steps: Vec<ChecklistItem>,
    },
    /// Change fields and checklist steps, then save the whole record.
    Edit {
        id: i64,
        /// `field=value`, repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(EditableField, String)>,
        #[arg(long = "toggle")]
        toggles: Vec<ChecklistItem>,
    },
    /// Add a note to the top of the list.
    Note {
        id: i64,
        text: String,
    },
    Delete {
        id: i64,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    Duplicate {
        id: i64,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Delete several applications with the shared delete code.
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Prompted for when omitted.
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// Search clients and total this year's rebates.
    List {
        #[arg(long, short, default_value = "")]
        query: String,
    },
    Create {
        #[command(flatten)]
        details: DetailsArgs,
    },
}

/// Client details as typed on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct DetailsArgs {
    #[arg(long, default_value = "")]
    pub full_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone_number: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value_t = false)]
    pub disadvantage: bool,
    #[arg(long, default_value = "")]
    pub electricity_acct: String,
    #[arg(long, default_value = "")]
    pub coned_eligibility_key: String,
    #[arg(long, default_value = "")]
    pub project_amount_total: String,
    #[arg(long, default_value = "")]
    pub offered_rebate_amount: String,
    #[arg(long, default_value = "")]
    pub approved_rebate_amount: String,
    #[arg(long, default_value = "")]
    pub total_client_pay_after_rebate: String,
    #[arg(long, default_value = "")]
    pub building_year_built: String,
    #[arg(long, default_value = "")]
    pub building_sqft: String,
    #[arg(long, default_value = "")]
    pub conditioned_sqft: String,
    #[arg(long = "condenser-model")]
    pub condenser_models: Vec<String>,
}

impl DetailsArgs {
    pub fn into_form(self) -> ClientDetailsForm {
        ClientDetailsForm {
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            disadvantage: self.disadvantage,
            electricity_acct: self.electricity_acct,
            coned_eligibility_key: self.coned_eligibility_key,
            project_amount_total: self.project_amount_total,
            offered_rebate_amount: self.offered_rebate_amount,
            approved_rebate_amount: self.approved_rebate_amount,
            total_client_pay_after_rebate: self.total_client_pay_after_rebate,
            building_year_built: self.building_year_built,
            building_sqft: self.building_sqft,
            conditioned_sqft: self.conditioned_sqft,
            condenser_models: self.condenser_models,
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(EditableField, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", raw))?;
    let field = field.parse::<EditableField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("offered_rebate_amount=5000").unwrap();
        assert_eq!(field, EditableField::OfferedRebateAmount);
        assert_eq!(value, "5000");

        let (_, value) = parse_assignment("address=1 Main St=Apt 2").unwrap();
        assert_eq!(value, "1 Main St=Apt 2");

        assert!(parse_assignment("offered_rebate_amount").is_err());
        assert!(parse_assignment("favourite_colour=blue").is_err());
    }

    #[test]
    fn test_list_parses_year_and_query() {
        let cli = Cli::parse_from([
            "cleanheat", "--json", "applications", "list", "--year", "all", "-q", "ada",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Applications {
                command: ApplicationsCommand::List { year, query, strict_amounts },
            } => {
                assert_eq!(year, Some(YearFilter::All));
                assert_eq!(query, "ada");
                assert!(!strict_amounts);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_create_collects_steps_and_models() {
        let cli = Cli::parse_from([
            "cleanheat",
            "applications",
            "create",
            "--full-name",
            "Ada Lovelace",
            "--offered-rebate-amount",
            "5000",
            "--condenser-model",
            "XR-1",
            "--step",
            "manual-j",
            "--step",
            "name_plate_photos",
        ]);
        match cli.command {
            Commands::Applications {
                command: ApplicationsCommand::Create { details, steps },
            } => {
                assert_eq!(steps, vec![ChecklistItem::ManualJ, ChecklistItem::NamePlatePhotos]);
                let form = details.into_form();
                assert_eq!(form.full_name, "Ada Lovelace");
                assert_eq!(form.offered_rebate_amount, "5000");
                assert_eq!(form.condenser_models, vec!["XR-1".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bulk_delete_requires_ids() {
        assert!(Cli::try_parse_from(["cleanheat", "applications", "bulk-delete"]).is_err());
    }
}
