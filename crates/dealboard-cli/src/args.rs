//! Command-line argument definitions using clap
//!
//! Argument structs carry the clap derives and convert into the core's
//! interface-agnostic parameter types through `From` impls:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Crm / Board
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use dealboard_core::{
    models::{ActivitySubject, Stage},
    params::*,
};
use jiff::civil::Date;

/// Sales pipeline for a small team: contacts, deals moving through
/// stages, a diary per contact and deal, and revenue goals.
#[derive(Parser)]
#[command(version, about, name = "dealboard")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/dealboard/dealboard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Hide names, amounts and notes, for showing the board to outsiders
    #[arg(long, global = true)]
    pub demo: bool,

    /// Email of the acting team member; required for commands that change
    /// data
    #[arg(long, global = true, env = "DEALBOARD_USER")]
    pub user: Option<String>,

    /// Team allow-list as comma-separated emails. Empty means anyone
    #[arg(long, global = true, env = "DEALBOARD_TEAM", value_delimiter = ',')]
    pub team: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the board is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage contacts
    #[command(alias = "c")]
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
    /// Manage deals
    #[command(alias = "d")]
    Deal {
        #[command(subcommand)]
        command: DealCommands,
    },
    /// Show the pipeline board or drop a deal onto it
    #[command(alias = "b")]
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Diary entries for contacts and deals
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Open deals by expected close date for one month
    Calendar(CalendarArgs),
    /// Pipeline value, deal counts and the top deals
    Dashboard,
    /// Revenue milestones and this week's contact goal
    Goals(GoalsArgs),
}

/// Command-line representation of a pipeline stage.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    /// Opportunity identified
    Potential,
    /// Offer placed or meeting planned
    Placed,
    /// Closed and won
    Won,
    /// Lost or declined
    Lost,
}

impl From<StageArg> for Stage {
    fn from(val: StageArg) -> Self {
        match val {
            StageArg::Potential => Stage::Potential,
            StageArg::Placed => Stage::Placed,
            StageArg::Won => Stage::Won,
            StageArg::Lost => Stage::Lost,
        }
    }
}

// ============================================================================
// Contacts
// ============================================================================

/// Add a contact
#[derive(ClapArgs)]
pub struct AddContactArgs {
    /// Name of the contact person
    pub name: String,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Where or how you met
    #[arg(long)]
    pub met_via: Option<String>,
    /// What should happen next
    #[arg(long)]
    pub next_step: Option<String>,
    /// When the next step is due (YYYY-MM-DD)
    #[arg(long)]
    pub next_action_date: Option<Date>,
    /// Profile link, e.g. LinkedIn
    #[arg(long)]
    pub social_url: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    /// Flag the contact for follow-up
    #[arg(long)]
    pub follow_up: bool,
}

impl From<AddContactArgs> for CreateContact {
    fn from(val: AddContactArgs) -> Self {
        CreateContact {
            name: val.name,
            company: val.company.unwrap_or_default(),
            email: val.email.unwrap_or_default(),
            phone: val.phone.unwrap_or_default(),
            notes: val.notes.unwrap_or_default(),
            follow_up: val.follow_up,
            met_via: val.met_via,
            next_step: val.next_step,
            next_action_date: val.next_action_date,
            social_url: val.social_url,
            website: val.website,
        }
    }
}

/// List or search contacts
#[derive(ClapArgs)]
pub struct ListContactsArgs {
    /// Text matched against name and company
    #[arg(short, long)]
    pub query: Option<String>,
    /// Only contacts flagged for follow-up
    #[arg(long)]
    pub follow_up: bool,
    /// Print JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListContactsArgs> for SearchContacts {
    fn from(val: &ListContactsArgs) -> Self {
        SearchContacts {
            query: val.query.clone(),
            follow_up: val.follow_up,
        }
    }
}

/// Show one record
#[derive(ClapArgs)]
pub struct ShowArgs {
    #[arg(help = "Unique identifier of the record to show")]
    pub id: u64,
}

impl From<ShowArgs> for Id {
    fn from(val: ShowArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a contact; omitted fields stay unchanged
#[derive(ClapArgs)]
pub struct UpdateContactArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub met_via: Option<String>,
    #[arg(long)]
    pub next_step: Option<String>,
    #[arg(long)]
    pub next_action_date: Option<Date>,
    #[arg(long)]
    pub social_url: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    /// Set or clear the follow-up flag
    #[arg(long)]
    pub follow_up: Option<bool>,
}

impl From<UpdateContactArgs> for UpdateContact {
    fn from(val: UpdateContactArgs) -> Self {
        UpdateContact {
            id: val.id,
            name: val.name,
            company: val.company,
            email: val.email,
            phone: val.phone,
            notes: val.notes,
            follow_up: val.follow_up,
            met_via: val.met_via,
            next_step: val.next_step,
            next_action_date: val.next_action_date,
            social_url: val.social_url,
            website: val.website,
        }
    }
}

/// Delete a contact or deal permanently
#[derive(ClapArgs)]
pub struct DeleteArgs {
    #[arg(help = "Unique identifier of the record to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteArgs> for Delete {
    fn from(val: DeleteArgs) -> Self {
        Delete {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Add a contact
    #[command(alias = "a")]
    Add(AddContactArgs),
    /// List or search contacts
    #[command(aliases = ["l", "ls"])]
    List(ListContactsArgs),
    /// Show a contact with its deals and diary
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Edit a contact
    #[command(alias = "u")]
    Update(UpdateContactArgs),
    /// Delete a contact together with its deals
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Deals
// ============================================================================

/// Create a deal
#[derive(ClapArgs)]
pub struct AddDealArgs {
    /// Title of the deal
    pub title: String,
    /// Contact the deal belongs to
    #[arg(short, long)]
    pub contact: u64,
    /// Amount, without currency
    #[arg(short, long, default_value_t = 0.0)]
    pub value: f64,
    /// Three-letter currency code
    #[arg(long)]
    pub currency: Option<String>,
    /// Starting stage
    #[arg(short, long)]
    pub stage: Option<StageArg>,
    /// Expected close date (YYYY-MM-DD)
    #[arg(long)]
    pub close_date: Option<Date>,
    #[arg(short, long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub follow_up: bool,
}

impl From<AddDealArgs> for CreateDeal {
    fn from(val: AddDealArgs) -> Self {
        CreateDeal {
            title: val.title,
            contact_id: val.contact,
            value: val.value,
            currency: val.currency,
            stage: val.stage.map(Into::into),
            expected_close_date: val.close_date,
            notes: val.notes,
            follow_up: val.follow_up,
        }
    }
}

/// List deals
#[derive(ClapArgs)]
pub struct ListDealsArgs {
    /// Only deals in this stage
    #[arg(short, long)]
    pub stage: Option<StageArg>,
    /// Only deals flagged for follow-up
    #[arg(long)]
    pub follow_up: bool,
    /// Only deals for this contact
    #[arg(short, long)]
    pub contact: Option<u64>,
    /// Print JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListDealsArgs> for ListDeals {
    fn from(val: &ListDealsArgs) -> Self {
        ListDeals {
            stage: val.stage.map(Into::into),
            follow_up: val.follow_up,
            contact_id: val.contact,
        }
    }
}

/// Edit a deal; omitted fields stay unchanged
#[derive(ClapArgs)]
pub struct UpdateDealArgs {
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub contact: Option<u64>,
    #[arg(short, long)]
    pub value: Option<f64>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(short, long)]
    pub stage: Option<StageArg>,
    #[arg(long, conflicts_with = "clear_close_date")]
    pub close_date: Option<Date>,
    /// Remove the expected close date
    #[arg(long)]
    pub clear_close_date: bool,
    #[arg(short, long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,
    /// Remove the notes
    #[arg(long)]
    pub clear_notes: bool,
    #[arg(long)]
    pub follow_up: Option<bool>,
}

impl From<UpdateDealArgs> for UpdateDeal {
    fn from(val: UpdateDealArgs) -> Self {
        UpdateDeal {
            id: val.id,
            title: val.title,
            contact_id: val.contact,
            value: val.value,
            currency: val.currency,
            stage: val.stage.map(Into::into),
            expected_close_date: val.close_date,
            clear_close_date: val.clear_close_date,
            notes: val.notes,
            clear_notes: val.clear_notes,
            follow_up: val.follow_up,
        }
    }
}

/// Move a deal to another stage
#[derive(ClapArgs)]
pub struct MoveDealArgs {
    pub id: u64,
    #[arg(value_enum)]
    pub stage: StageArg,
}

impl From<MoveDealArgs> for MoveDeal {
    fn from(val: MoveDealArgs) -> Self {
        MoveDeal {
            id: val.id,
            stage: val.stage.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum DealCommands {
    /// Create a deal
    #[command(alias = "a")]
    Add(AddDealArgs),
    /// List deals
    #[command(aliases = ["l", "ls"])]
    List(ListDealsArgs),
    /// Show a deal with its diary
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Edit a deal
    #[command(alias = "u")]
    Update(UpdateDealArgs),
    /// Move a deal to another stage
    #[command(alias = "m")]
    Move(MoveDealArgs),
    /// Delete a deal permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Board
// ============================================================================

/// Show the board
#[derive(ClapArgs)]
pub struct ShowBoardArgs {
    /// Render the single-column layout of narrow screens
    #[arg(long)]
    pub narrow: bool,
    /// Column shown in narrow mode
    #[arg(long, requires = "narrow")]
    pub column: Option<StageArg>,
}

/// Replay a drag-and-drop of one deal card onto a drop target
#[derive(ClapArgs)]
pub struct DropArgs {
    /// Deal being dragged
    #[arg(short, long)]
    pub deal: u64,
    /// Drop target id: a stage column (`won`), a narrow-mode stage chip
    /// (`mobile-won`) or another deal's card (`12`)
    #[arg(short, long)]
    pub to: String,
    /// Use the narrow layout, where the stage chips are the drop zones
    #[arg(long)]
    pub narrow: bool,
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Show the board
    #[command(alias = "s")]
    Show(ShowBoardArgs),
    /// Drop a deal onto a column, stage chip or card
    #[command(alias = "d")]
    Drop(DropArgs),
}

// ============================================================================
// Activity
// ============================================================================

/// The contact or deal a diary entry belongs to
#[derive(ClapArgs)]
#[group(required = true, multiple = false)]
pub struct SubjectArgs {
    #[arg(long)]
    pub contact: Option<u64>,
    #[arg(long)]
    pub deal: Option<u64>,
}

impl SubjectArgs {
    pub fn subject(&self) -> Option<ActivitySubject> {
        match (self.contact, self.deal) {
            (Some(id), None) => Some(ActivitySubject::Contact(id)),
            (None, Some(id)) => Some(ActivitySubject::Deal(id)),
            _ => None,
        }
    }
}

/// Log a diary entry
#[derive(ClapArgs)]
pub struct AddActivityArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,
    /// What happened
    pub note: String,
}

/// Remove a diary entry
#[derive(ClapArgs)]
pub struct DeleteActivityArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,
    pub id: u64,
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Log a diary entry
    #[command(alias = "a")]
    Add(AddActivityArgs),
    /// Show a diary, newest first
    #[command(aliases = ["l", "ls"])]
    List(SubjectArgs),
    /// Remove a diary entry
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteActivityArgs),
}

// ============================================================================
// Views
// ============================================================================

/// Month to show; defaults to the current one
#[derive(ClapArgs)]
pub struct CalendarArgs {
    #[arg(long, requires = "month")]
    pub year: Option<i16>,
    /// 1-12
    #[arg(long, value_parser = clap::value_parser!(i8).range(1..=12))]
    pub month: Option<i8>,
}

/// Goal settings
#[derive(ClapArgs)]
pub struct GoalsArgs {
    /// New contacts each member should add per week
    #[arg(long, default_value_t = dealboard_core::goals::WEEKLY_CONTACT_GOAL)]
    pub weekly_goal: u32,
}
