use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pva",
    about = "Command line tool for managing the policy audit repository",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Address of the audit service.
    #[arg(long, global = true, default_value = "localhost:8080")]
    pub server_addr: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Query the change history
    Get(GetArgs),
    /// Create or delete tags on recorded snapshots
    Tag(TagArgs),
    /// Roll back to the snapshot named by a tag or sha
    Rollback(RollbackArgs),
}

#[derive(Args)]
pub struct GetArgs {
    /// Filter by commit author.
    #[arg(long)]
    pub author: Option<String>,
    /// Lower time bound (e.g. 2026-01-02T15:04:05.000Z).
    #[arg(long)]
    pub since: Option<String>,
    /// Upper time bound.
    #[arg(long)]
    pub until: Option<String>,
    /// Resource directory (e.g. k8s-policies).
    #[arg(long)]
    pub resource: Option<String>,
    /// Namespace.
    #[arg(long)]
    pub namespace: Option<String>,
    /// File name (e.g. npA.yaml).
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct TagArgs {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Tag a snapshot: tag create <tag> <sha>
    Create {
        tag: String,
        sha: String,
        #[arg(short = 'a', long, default_value = "no-author")]
        author: String,
        #[arg(short = 'e', long, default_value = "default@audit.example")]
        email: String,
    },
    /// Delete a tag: tag delete <tag>
    Delete { tag: String },
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["tag", "sha"])))]
pub struct RollbackArgs {
    /// Name of the tag to roll back to.
    #[arg(short = 't', long)]
    pub tag: Option<String>,
    /// Snapshot sha to roll back to.
    #[arg(short = 's', long)]
    pub sha: Option<String>,
}
