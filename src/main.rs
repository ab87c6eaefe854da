// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod command;
mod config;
mod error;
mod http;
mod metadata;
mod password;
mod presence;
mod search;
mod session;
mod shell;
mod storage;
#[cfg(test)]
mod testing;
mod timer;
mod validator;

use std::{process, sync::Arc, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::{debug, error, warn};
use url::Url;

use command::Context;
use error::Result;
use session::{SessionStore, Slots};

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Logout(command::logout::Command),
    Status(command::status::Command),
    Notifications(command::notifications::Command),
    Search(command::search::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Login(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Logout(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Status(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Notifications(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Search(cmd) => command::Command::execute(cmd, ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the forum's REST API.
    #[arg(long, env = "FORUM_URL", default_value = "http://127.0.0.1:8000/api/", value_parser = Url::parse)]
    url: Url,

    /// How long to wait after the last change to a search query before
    /// sending it, in milliseconds.
    #[arg(long, env = "FORUM_SEARCH_DEBOUNCE_MS", default_value_t = 300)]
    search_debounce_ms: u64,

    /// Keep the session in memory only, so it ends with this process.
    #[arg(long)]
    no_persist_session: bool,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage<Slots>> {
    if !args.no_persist_session {
        if let Some(file_storage) = storage::File::new("session.json") {
            debug!("Keeping the session in {}", file_storage.path().display());
            return Box::new(file_storage);
        }
        warn!("No data directory is available; the session will not be remembered");
    }

    Box::new(storage::Memory::<Slots>::new())
}

async fn run(args: Args) -> Result<()> {
    let settings = config::Settings::new(args.url.clone())
        .with_search_debounce(Duration::from_millis(args.search_debounce_ms));

    let prompts: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(password::EnvPrompt::new()),
        Box::new(password::RpasswordPrompt),
    ];
    let ctx = Context {
        store: Arc::new(SessionStore::new(get_session_storage(&args))),
        backend: Arc::new(http::HttpBackend::new(settings.base_url().clone())?),
        shell: Arc::new(shell::Terminal),
        prompt: Arc::new(prompts),
        settings,
    };

    command::Command::execute(args.command, &ctx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("FORUM_LOG", "warn")
        .write_style("FORUM_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
