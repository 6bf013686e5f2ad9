use colored::Colorize;

use pva_types::{RollbackRequest, TagRequest, TagRequestType};

use crate::cli::{Cli, Command, GetArgs, RollbackArgs, TagAction, TagArgs};
use crate::client::ApiClient;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let client = ApiClient::new(&cli.server_addr)?;
    match cli.command {
        Command::Get(args) => cmd_get(&client, args).await,
        Command::Tag(args) => cmd_tag(&client, args).await,
        Command::Rollback(args) => cmd_rollback(&client, args).await,
    }
}

async fn cmd_get(client: &ApiClient, args: GetArgs) -> anyhow::Result<()> {
    let entries = client
        .changes(&[
            ("author", args.author),
            ("since", args.since),
            ("until", args.until),
            ("resource", args.resource),
            ("namespace", args.namespace),
            ("name", args.name),
        ])
        .await?;
    if entries.is_empty() {
        println!("No matching commits.");
        return Ok(());
    }
    for entry in entries {
        let short_sha = entry.sha.get(..8).unwrap_or(&entry.sha);
        println!(
            "{} {} {}",
            short_sha.yellow(),
            entry.author.bold(),
            entry.message
        );
    }
    Ok(())
}

async fn cmd_tag(client: &ApiClient, args: TagArgs) -> anyhow::Result<()> {
    let request = match args.action {
        TagAction::Create { tag, sha, author, email } => TagRequest {
            request_type: TagRequestType::Create,
            tag,
            sha: Some(sha),
            author: Some(author),
            email: Some(email),
        },
        TagAction::Delete { tag } => TagRequest {
            request_type: TagRequestType::Delete,
            tag,
            sha: None,
            author: None,
            email: None,
        },
    };
    let response = client.tag(&request).await?;
    println!("{} {response}", "✓".green());
    Ok(())
}

async fn cmd_rollback(client: &ApiClient, args: RollbackArgs) -> anyhow::Result<()> {
    let request = RollbackRequest {
        tag: args.tag,
        sha: args.sha,
    };
    let response = client.rollback(&request).await?;
    println!("{} {response}", "✓".green());
    Ok(())
}
