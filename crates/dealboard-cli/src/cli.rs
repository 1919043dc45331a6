//! Command handlers: turn parsed arguments into core calls and render the
//! results as Markdown.

use anyhow::{bail, Context, Result};
use dealboard_core::{
    board::{BoardLayout, DeviceMode, DropOutcome, DropPlan, PipelineBoard, TargetId},
    calendar::MonthView,
    dashboard::DashboardMetrics,
    display::{
        Activities, BoardColumns, Contacts, CreateResult, Deals, DeleteResult, Mask, Masked,
        MaskedDisplay, OperationStatus, UpdateResult,
    },
    goals::{default_goals, RevenueProgress, WeeklyProgress},
    models::{ActivitySubject, Stage},
    params::{AddActivity, CalendarMonth, Delete, Id, ListDeals, MoveDeal, SearchContacts},
    AccessPolicy, Crm,
};
use jiff::Zoned;
use log::debug;

use crate::{
    args::{
        ActivityCommands, BoardCommands, CalendarArgs, ContactCommands, DealCommands, DropArgs,
        GoalsArgs, ListContactsArgs, ListDealsArgs, ShowBoardArgs, SubjectArgs,
    },
    renderer::TerminalRenderer,
};

/// Executes one command against the store.
pub struct Cli {
    crm: Crm,
    renderer: TerminalRenderer,
    mask: Mask,
    team: AccessPolicy,
}

impl Cli {
    pub fn new(crm: Crm, renderer: TerminalRenderer, mask: Mask, team: AccessPolicy) -> Self {
        Self {
            crm,
            renderer,
            mask,
            team,
        }
    }

    fn show<T: MaskedDisplay + ?Sized>(&self, value: &T) -> Result<()> {
        self.renderer.render(&Masked(value, self.mask).to_string())
    }

    /// Commands that change data need to know who is acting.
    fn require_user(&self) -> Result<()> {
        if self.crm.user().is_none() {
            bail!("This command changes data; pass --user or set DEALBOARD_USER");
        }
        Ok(())
    }

    fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        if self.mask.is_demo() {
            bail!("--json is not available in demo mode");
        }
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize output")?
        );
        Ok(())
    }

    pub async fn handle_contact_command(&self, command: ContactCommands) -> Result<()> {
        match command {
            ContactCommands::Add(args) => {
                self.require_user()?;
                let contact = self
                    .crm
                    .create_contact(&args.into())
                    .await
                    .context("Failed to create contact")?;
                self.show(&CreateResult::new(contact))
            }
            ContactCommands::List(args) => self.list_contacts(&args).await,
            ContactCommands::Show(args) => {
                let id: Id = args.into();
                let contact = self
                    .crm
                    .get_contact(&id)
                    .await?
                    .with_context(|| format!("Contact {} not found", id.id))?;
                let deals = self
                    .crm
                    .list_deals_matching(&ListDeals {
                        contact_id: Some(contact.id),
                        ..Default::default()
                    })
                    .await?;
                let diary = self
                    .crm
                    .list_activities(ActivitySubject::Contact(contact.id))
                    .await?;

                self.show(&contact)?;
                self.renderer.render("### Deals\n\n")?;
                self.show(&Deals(deals))?;
                self.renderer.render("\n### Diary\n\n")?;
                self.show(&Activities(diary))
            }
            ContactCommands::Update(args) => {
                self.require_user()?;
                let contact = self
                    .crm
                    .update_contact(&args.into())
                    .await
                    .context("Failed to update contact")?;
                self.show(&UpdateResult::new(contact))
            }
            ContactCommands::Delete(args) => {
                self.require_user()?;
                let params: Delete = args.into();
                let contact = self
                    .crm
                    .get_contact(&Id { id: params.id })
                    .await?
                    .with_context(|| format!("Contact {} not found", params.id))?;
                self.crm
                    .delete_contact(&params)
                    .await
                    .context("Failed to delete contact")?;
                self.show(&DeleteResult::new(contact))
            }
        }
    }

    async fn list_contacts(&self, args: &ListContactsArgs) -> Result<()> {
        let params = SearchContacts::from(args);
        let contacts = self.crm.search_contacts(&params).await?;
        if args.json {
            self.print_json(&contacts)
        } else {
            self.show(&Contacts(contacts))
        }
    }

    pub async fn handle_deal_command(&self, command: DealCommands) -> Result<()> {
        match command {
            DealCommands::Add(args) => {
                self.require_user()?;
                let deal = self
                    .crm
                    .create_deal(&args.into())
                    .await
                    .context("Failed to create deal")?;
                self.show(&CreateResult::new(deal))
            }
            DealCommands::List(args) => self.list_deals(&args).await,
            DealCommands::Show(args) => {
                let id: Id = args.into();
                let deal = self
                    .crm
                    .get_deal(&id)
                    .await?
                    .with_context(|| format!("Deal {} not found", id.id))?;
                let diary = self
                    .crm
                    .list_activities(ActivitySubject::Deal(deal.id))
                    .await?;

                self.show(&deal)?;
                self.renderer.render("### Diary\n\n")?;
                self.show(&Activities(diary))
            }
            DealCommands::Update(args) => {
                self.require_user()?;
                let deal = self
                    .crm
                    .update_deal_fields(&args.into())
                    .await
                    .context("Failed to update deal")?;
                self.show(&UpdateResult::new(deal))
            }
            DealCommands::Move(args) => {
                self.require_user()?;
                let params: MoveDeal = args.into();
                let deal = self
                    .crm
                    .move_deal(&params)
                    .await
                    .context("Failed to move deal")?;
                self.show(&UpdateResult::with_changes(
                    deal,
                    vec![format!("Stage: {}", params.stage.label())],
                ))
            }
            DealCommands::Delete(args) => {
                self.require_user()?;
                let params: Delete = args.into();
                let deal = self
                    .crm
                    .get_deal(&Id { id: params.id })
                    .await?
                    .with_context(|| format!("Deal {} not found", params.id))?;
                self.crm
                    .delete_deal(&params)
                    .await
                    .context("Failed to delete deal")?;
                self.show(&DeleteResult::new(deal))
            }
        }
    }

    async fn list_deals(&self, args: &ListDealsArgs) -> Result<()> {
        let deals = self.crm.list_deals_matching(&args.into()).await?;
        if args.json {
            self.print_json(&deals)
        } else {
            self.show(&Deals(deals))
        }
    }

    pub async fn handle_board_command(&self, command: BoardCommands) -> Result<()> {
        match command {
            BoardCommands::Show(args) => self.show_board(&args).await,
            BoardCommands::Drop(args) => self.drop_deal(args).await,
        }
    }

    pub async fn show_board(&self, args: &ShowBoardArgs) -> Result<()> {
        let mode = if args.narrow {
            DeviceMode::Narrow
        } else {
            DeviceMode::Desktop
        };
        let mut board = PipelineBoard::new(mode);
        board
            .refresh(&self.crm)
            .await
            .context("Failed to load the board")?;
        if let Some(stage) = args.column {
            board.select_column(stage.into());
        }
        self.show(&BoardColumns::from_board(&board))
    }

    /// Replays one drag gesture: pick up the card, hover over the target
    /// the way a pointer would, release, and write the stage change.
    async fn drop_deal(&self, args: DropArgs) -> Result<()> {
        self.require_user()?;
        let mode = if args.narrow {
            DeviceMode::Narrow
        } else {
            DeviceMode::Desktop
        };
        let mut board = PipelineBoard::new(mode);
        board
            .refresh(&self.crm)
            .await
            .context("Failed to load the board")?;

        let stage = board
            .deal(args.deal)
            .map(|d| d.stage)
            .with_context(|| format!("Deal {} not found", args.deal))?;
        // The card being dragged is in the column on screen
        board.select_column(stage);

        let layout = BoardLayout::default();
        let target = TargetId::new(args.to);
        let frame = layout
            .drop_frame(&board, args.deal, &target)
            .with_context(|| format!("'{target}' is not a drop target on this board"))?;
        let candidates = layout.candidates(&board);

        board.drag_start(args.deal, layout.card_width())?;
        if let Some(over) = board.drag_move(&frame, &candidates) {
            debug!("Deal {} is over {over}", args.deal);
        }

        match board.release(&frame, &candidates) {
            DropPlan::Move(pending) => {
                let change = format!(
                    "Stage: {} → {}",
                    pending.from_stage().label(),
                    pending.to_stage().label()
                );
                let outcome = pending.commit(&self.crm).await;
                board.apply_outcome(&outcome);
                match outcome {
                    DropOutcome::Moved(deal) => {
                        self.show(&UpdateResult::with_changes(deal, vec![change]))?;
                        self.show(&BoardColumns::from_board(&board))
                    }
                    DropOutcome::Failed {
                        deal_id,
                        stage,
                        message,
                    } => bail!("Failed to move deal {deal_id} to {stage}: {message}"),
                }
            }
            plan => match OperationStatus::for_drop(&plan) {
                Some(status) => self.renderer.render(&status.to_string()),
                None => Ok(()),
            },
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Add(args) => {
                self.require_user()?;
                let params = AddActivity {
                    subject: subject_of(&args.subject)?,
                    note: args.note,
                };
                let activity = self
                    .crm
                    .add_activity(&params)
                    .await
                    .context("Failed to log activity")?;
                self.show(&CreateResult::new(activity))
            }
            ActivityCommands::List(args) => {
                let diary = self.crm.list_activities(subject_of(&args)?).await?;
                self.show(&Activities(diary))
            }
            ActivityCommands::Delete(args) => {
                self.require_user()?;
                let subject = subject_of(&args.subject)?;
                self.crm
                    .delete_activity(subject, args.id)
                    .await
                    .context("Failed to delete activity")?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Deleted activity {} from {subject}",
                        args.id
                    ))
                    .to_string(),
                )
            }
        }
    }

    pub async fn show_calendar(&self, args: &CalendarArgs) -> Result<()> {
        let month = match (args.year, args.month) {
            (Some(year), Some(month)) => CalendarMonth { year, month },
            (None, Some(month)) => CalendarMonth {
                year: Zoned::now().year(),
                month,
            },
            _ => CalendarMonth::containing(Zoned::now().date()),
        };
        let deals = self.crm.list_deals(None).await?;
        let view = MonthView::build(month, &deals)?;
        self.show(&view)
    }

    pub async fn show_dashboard(&self) -> Result<()> {
        let deals = self.crm.list_deals(None).await?;
        self.show(&DashboardMetrics::from_deals(&deals))
    }

    pub async fn show_goals(&self, args: &GoalsArgs) -> Result<()> {
        let deals = self.crm.list_deals(None).await?;
        let won_total = deals
            .iter()
            .filter(|d| d.stage == Stage::Won)
            .map(|d| d.value)
            .sum();
        let revenue = RevenueProgress::compute(won_total, &default_goals());

        let contacts = self.crm.list_contacts_filtered(None).await?;
        let weekly = WeeklyProgress::compute(&contacts, &self.team, args.weekly_goal, &Zoned::now())?;

        self.show(&revenue)?;
        self.renderer.render("\n")?;
        self.show(&weekly)
    }
}

fn subject_of(args: &SubjectArgs) -> Result<ActivitySubject> {
    args.subject().context("Pass exactly one of --contact or --deal")
}
