// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io::Write;

use clap::{Parser, Subcommand};
use hub_access::traits::{OverrideLookup, OverrideStore};
use hub_access::{
    AccessLevel, OverrideRecord, OverrideScope, PlatformRole, PlatformSpace, RoleDefaults,
    ScopeError, ScopeType, UserId, explain_access, resolve_all_spaces,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hub-access", version, about)]
pub struct Args {
    /// SQLite database holding the access overrides, created and migrated when missing.
    #[arg(
        long,
        env = "HUB_ACCESS_DATABASE_URL",
        default_value = "sqlite:hub-access.db",
        global = true
    )]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "HUB_ACCESS_MAX_CONNECTIONS",
        default_value_t = 16,
        global = true
    )]
    pub max_connections: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the default access of every role on every space.
    Matrix,

    /// Resolve the effective access of a user on one space.
    Resolve {
        #[command(flatten)]
        subject: Subject,

        #[arg(long)]
        space: PlatformSpace,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Resolve the effective access of a user on every space.
    Spaces {
        #[command(flatten)]
        subject: Subject,
    },

    /// Set an override for a user, replacing any existing one with the same scope.
    Grant {
        #[arg(long)]
        user: String,

        #[arg(long)]
        space: PlatformSpace,

        #[arg(long)]
        level: AccessLevel,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Remove an override, falling back to the role default.
    Reset {
        #[arg(long)]
        user: String,

        #[arg(long)]
        space: PlatformSpace,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List every override of a user.
    Overrides {
        #[arg(long)]
        user: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct Subject {
    /// Identifier of the user.
    #[arg(long)]
    pub user: String,

    /// Role as stored on the user profile, legacy names are accepted.
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct ScopeArgs {
    /// Narrow to an initiative or congress. Omitting it means the whole space.
    #[arg(long)]
    pub scope_type: Option<ScopeType>,

    /// Id of the initiative or congress.
    #[arg(long, requires = "scope_type")]
    pub scope_id: Option<String>,
}

impl ScopeArgs {
    fn scope(&self) -> Result<Option<OverrideScope>, ScopeError> {
        match self.scope_type {
            Some(scope_type) => OverrideScope::new(scope_type, self.scope_id.clone()).map(Some),
            None => Ok(None),
        }
    }
}

pub async fn run<S>(command: &Command, store: &S, out: &mut impl Write) -> anyhow::Result<()>
where
    S: OverrideStore,
    <S as OverrideLookup>::Error: Send + Sync + 'static,
{
    match command {
        Command::Matrix => print_matrix(out)?,
        Command::Resolve {
            subject,
            space,
            scope,
        } => {
            let scope = scope.scope()?;
            let resolution = explain_access(
                &UserId::new(subject.user.as_str()),
                subject.role.as_deref(),
                *space,
                scope.as_ref(),
                store,
            )
            .await?;
            writeln!(out, "{} ({})", resolution.level, resolution.source)?;
        }
        Command::Spaces { subject } => {
            let spaces = resolve_all_spaces(
                &UserId::new(subject.user.as_str()),
                subject.role.as_deref(),
                store,
            )
            .await?;
            for (space, level) in spaces.iter() {
                writeln!(out, "{:<14}{}", space.as_str(), level)?;
            }
        }
        Command::Grant {
            user,
            space,
            level,
            scope,
        } => {
            let scope = scope.scope()?.unwrap_or(OverrideScope::Global);
            let record =
                OverrideRecord::scoped(UserId::new(user.as_str()), *space, *level, scope.clone());
            let previous = store.set_override(record).await?;
            info!(%user, %space, %scope, %level, "granted access override");
            match previous {
                Some(previous) => writeln!(
                    out,
                    "{user} {space} ({scope}): {level}, was {previous}"
                )?,
                None => writeln!(out, "{user} {space} ({scope}): {level}")?,
            }
        }
        Command::Reset { user, space, scope } => {
            let scope = scope.scope()?.unwrap_or(OverrideScope::Global);
            let removed = store
                .remove_override(&UserId::new(user.as_str()), *space, &scope)
                .await?;
            if removed {
                info!(%user, %space, %scope, "reset access override");
                writeln!(out, "{user} {space} ({scope}): reset to role default")?;
            } else {
                writeln!(out, "{user} {space} ({scope}): no override set")?;
            }
        }
        Command::Overrides { user } => {
            let records = store.user_overrides(&UserId::new(user.as_str())).await?;
            if records.is_empty() {
                writeln!(out, "{user} has no overrides")?;
            }
            for record in records {
                writeln!(
                    out,
                    "{:<14}{:<10}{}",
                    record.space.as_str(),
                    record.level.as_str(),
                    record.scope
                )?;
            }
        }
    }

    Ok(())
}

/// Writes the default policy table, one row per role and one column per space.
pub fn print_matrix(out: &mut impl Write) -> anyhow::Result<()> {
    let mut header = format!("{:<16}", "");
    for space in PlatformSpace::ALL {
        header.push_str(&format!("{:<14}", space.as_str()));
    }
    writeln!(out, "{}", header.trim_end())?;

    for role in PlatformRole::ALL {
        let mut line = format!("{:<16}", role.as_str());
        for level in RoleDefaults::row(role) {
            line.push_str(&format!("{:<14}", level.as_str()));
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(())
}
