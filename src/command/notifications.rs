// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use tabled::{settings::Style, Table};

use crate::{
    api,
    error::{self, Result},
    validator,
};

use super::Context;

/// List the signed-in user's notifications.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Only show notifications that have not been read yet.
    #[arg(long, short)]
    unread: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let Some(user_id) =
            validator::require_session(ctx.store.as_ref(), ctx.backend.as_ref(), ctx.shell.as_ref())
                .await
        else {
            error!("You need to sign in to see notifications");
            return Err(error::Error::Command);
        };

        let notifications = ctx
            .backend
            .notifications(user_id)
            .await?
            .into_data("notification fetch")?;
        let unread = api::unread_count(&notifications);
        let shown: Vec<_> = notifications
            .into_iter()
            .filter(|n| !self.unread || !n.is_read)
            .collect();

        if !shown.is_empty() {
            println!("{}", Table::new(shown).with(Style::rounded()));
        }
        println!("{unread} unread");
        Ok(())
    }
}
