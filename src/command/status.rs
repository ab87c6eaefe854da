// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{future, sync::Arc};

use async_trait::async_trait;
use clap::Parser;
use futures_util::StreamExt as _;
use log::warn;
use tabled::{settings::Style, Table, Tabled};
use tokio::io::{self, AsyncBufReadExt as _, BufReader};
use tokio_stream::wrappers::LinesStream;

use crate::{
    api::Backend,
    error::Result,
    presence::{Header, Presence},
    session::Slots,
    shell::{Route, Shell},
    storage::Storage,
};

use super::Context;

/// Show who is signed in and how many notifications are unread.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The page being opened; the session is re-checked as it would be on
    /// navigation.
    #[arg(long, default_value = "/")]
    route: Route,

    /// Keep reading page paths from standard input, one per line, and
    /// re-check the session on each.
    #[arg(long)]
    follow: bool,

    /// Open the profile menu after the check and list its entries.
    #[arg(long, conflicts_with = "follow")]
    menu: bool,
}

#[derive(Tabled)]
struct Identity {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "E-mail")]
    email: String,
    #[tabled(rename = "Points")]
    points: i64,
    #[tabled(rename = "Unread")]
    unread: usize,
}

fn print_presence<S, B, N>(header: &Header<S, B, N>)
where
    S: Storage<Slots>,
    B: Backend,
    N: Shell,
{
    match header.presence() {
        Presence::Authenticated { user } => println!(
            "{}",
            Table::new([Identity {
                name: user.name.clone(),
                email: user.email.clone(),
                points: user.points.unwrap_or_default(),
                unread: header.unread(),
            }])
            .with(Style::rounded())
        ),
        Presence::Unauthenticated | Presence::Authenticating | Presence::Invalidated { .. } => {
            println!("Not signed in");
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let mut header = Header::new(
            Arc::clone(&ctx.store),
            Arc::clone(&ctx.backend),
            Arc::clone(&ctx.shell),
        );

        if self.follow {
            let routes = LinesStream::new(BufReader::new(io::stdin()).lines()).filter_map(
                |line| {
                    future::ready(match line {
                        Ok(path) => Some(Route::from_path(path.trim())),
                        Err(e) => {
                            warn!("Could not read a page path: {}", e);
                            None
                        }
                    })
                },
            );
            header.follow(routes, print_presence).await;
        } else {
            header.on_navigate(&self.route).await;
            print_presence(&header);

            if self.menu {
                header.toggle_menu();
                if header.is_menu_open() {
                    println!("Profile ({})", Route::Profile);
                    println!("Log out");
                } else {
                    warn!("The profile menu is only available when signed in");
                }
            }
        }
        Ok(())
    }
}
