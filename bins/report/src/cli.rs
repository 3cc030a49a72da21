use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use haulbook_core::party::PartyRole;
use haulbook_shared::types::PartyId;

#[derive(Parser)]
#[command(
    name = "haulbook",
    about = "Party balances and account statements from a ledger dataset",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset file to read instead of the configured one.
    #[arg(long, global = true)]
    pub dataset: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered parties
    Parties(PartiesArgs),
    /// Show one party's balance
    Snapshot(PartyArgs),
    /// Build one party's itemized statement
    Statement(PartyArgs),
    /// Show the balance of every party of a role
    Role(RoleArgs),
}

#[derive(Args)]
pub struct WindowArgs {
    /// First included date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last included date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Args)]
pub struct PartiesArgs {
    /// Only parties of this role.
    #[arg(long)]
    pub role: Option<PartyRole>,
}

#[derive(Args)]
pub struct PartyArgs {
    /// Party id.
    #[arg(long)]
    pub party: PartyId,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Args)]
pub struct RoleArgs {
    /// Party role (client, contractor, crusher, supplier, administration).
    #[arg(long)]
    pub role: PartyRole,

    #[command(flatten)]
    pub window: WindowArgs,
}
