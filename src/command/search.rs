// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use core::num;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use log::error;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table,
};

use crate::{
    error::{self, Result},
    search::SearchCoordinator,
};

use super::Context;

/// Free-text search across posts.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The number of results to show.
    #[arg(short, long)]
    count: Option<num::NonZeroUsize>,

    /// Open the result with this ID once the results are in.
    #[arg(long)]
    open: Option<i64>,

    /// The text to search for.
    #[clap()]
    query: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let mut search = SearchCoordinator::new(
            Arc::clone(&ctx.backend),
            Arc::clone(&ctx.shell),
            &ctx.settings,
        );
        let mut updates = search.subscribe();

        search.on_focus();
        search.on_query_change(&self.query);
        let state = updates
            .wait_for(|state| !state.pending)
            .await
            .map_err(|_| error::Error::Cancelled)?
            .clone();

        if state.results.is_empty() {
            println!("No results");
        } else {
            println!(
                "{}",
                Table::new(
                    state
                        .results
                        .iter()
                        .take(self.count.map_or(usize::MAX, num::NonZeroUsize::get))
                )
                .with(Style::rounded())
                .with(Modify::new(Segment::new(1.., 1..)).with(Alignment::left()))
            );
        }

        // Leaving the box starts the blur grace period; an immediate open
        // still lands within it.
        search.on_blur();
        if let Some(id) = self.open {
            if !search.select(id) {
                error!("No result with ID {} is shown", id);
                return Err(error::Error::Command);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        command::{tests::context, Command as _},
        shell::Route,
        testing::FakeBackend,
    };

    #[tokio::test(start_paused = true)]
    async fn test_search_and_open() {
        let (ctx, backend, shell, _) = context(FakeBackend::default(), None);

        Command {
            count: None,
            open: Some(1),
            query: "exam timetable".to_owned(),
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert_eq!(backend.queries(), vec!["exam timetable".to_owned()]);
        assert_eq!(shell.routes(), vec![Route::Post(1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_opening_a_missing_result_fails() {
        let (ctx, _, shell, _) = context(FakeBackend::default(), None);

        let result = Command {
            count: None,
            open: Some(99),
            query: "exam".to_owned(),
        }
        .execute(&ctx)
        .await;

        assert!(matches!(result, Err(error::Error::Command)));
        assert!(shell.routes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_sends_nothing() {
        let (ctx, backend, _, _) = context(FakeBackend::default(), None);

        Command {
            count: None,
            open: None,
            query: String::new(),
        }
        .execute(&ctx)
        .await
        .unwrap();

        assert!(backend.queries().is_empty());
    }
}
