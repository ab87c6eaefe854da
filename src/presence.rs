// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use log::{debug, error, info, warn};

use crate::{
    api::{self, Backend},
    session::{SessionStore, Slots, User},
    shell::{Route, Shell},
    storage::Storage,
    validator,
};

pub(crate) const BANNED_NOTICE: &str =
    "Your account has been banned. Please contact a moderator if you think this is a mistake.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Presence {
    Unauthenticated,
    Authenticating,
    Authenticated { user: User },
    Invalidated { banned: bool },
}

/// Identity and unread-notification state for the page shell. Every
/// navigation re-derives it from the stored credential.
pub(crate) struct Header<S, B, N> {
    store: Arc<SessionStore<S>>,
    backend: B,
    shell: N,
    presence: Presence,
    unread: usize,
    menu_open: bool,
}

impl<S, B, N> Header<S, B, N>
where
    S: Storage<Slots>,
    B: Backend,
    N: Shell,
{
    pub(crate) fn new(store: Arc<SessionStore<S>>, backend: B, shell: N) -> Self {
        Self {
            store,
            backend,
            shell,
            presence: Presence::Unauthenticated,
            unread: 0,
            menu_open: false,
        }
    }

    pub(crate) fn presence(&self) -> &Presence {
        &self.presence
    }

    pub(crate) fn user(&self) -> Option<&User> {
        match self.presence {
            Presence::Authenticated { ref user } => Some(user),
            Presence::Unauthenticated
            | Presence::Authenticating
            | Presence::Invalidated { .. } => None,
        }
    }

    pub(crate) fn unread(&self) -> usize {
        self.unread
    }

    pub(crate) fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub(crate) fn toggle_menu(&mut self) {
        self.menu_open = self.user().is_some() && !self.menu_open;
    }

    /// Refreshes identity once per route received, until the stream ends,
    /// handing the refreshed header to `observe` each time.
    pub(crate) async fn follow<R, F>(&mut self, routes: R, mut observe: F)
    where
        R: Stream<Item = Route>,
        F: FnMut(&Self),
    {
        futures_util::pin_mut!(routes);
        while let Some(route) = routes.next().await {
            self.on_navigate(&route).await;
            observe(self);
        }
    }

    pub(crate) async fn on_navigate(&mut self, route: &Route) {
        debug!("Refreshing identity after navigating to {}", route);

        let credential = match self.store.load().await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                self.reset();
                return;
            }
            Err(e) => {
                warn!("Could not read the stored session; treating it as absent: {}", e);
                self.reset();
                return;
            }
        };

        self.transition(Presence::Authenticating);
        let status = validator::validate_session(&*self.store, &self.backend).await;

        if status.valid {
            let user_id = status.user_id.unwrap_or(credential.user.id);
            self.transition(Presence::Authenticated {
                user: credential.user,
            });
            self.refresh_unread(user_id).await;
        } else if status.transient {
            info!("Keeping the stored session since it could not be checked right now");
            self.transition(Presence::Authenticated {
                user: credential.user,
            });
        } else {
            self.invalidate(status.banned).await;
        }
    }

    pub(crate) async fn logout(&mut self) {
        if let Err(e) = self.store.clear().await {
            error!("Could not remove the stored session: {}", e);
        }
        self.reset();
        self.shell.navigate(Route::Home);
    }

    async fn refresh_unread(&mut self, user_id: i64) {
        let outcome = match self.backend.notifications(user_id).await {
            Ok(envelope) => envelope.into_data("notification fetch"),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(notifications) => {
                self.unread = api::unread_count(&notifications);
                debug!("User {} has {} unread notifications", user_id, self.unread);
            }
            Err(e) => warn!("Notification fetch for user {} failed: {}", user_id, e),
        }
    }

    async fn invalidate(&mut self, banned: bool) {
        self.transition(Presence::Invalidated { banned });
        if banned {
            self.shell.notify(BANNED_NOTICE);
        }
        if let Err(e) = self.store.clear().await {
            error!("Could not remove the invalid session: {}", e);
        }
        self.reset();
        self.shell.navigate(Route::Login);
    }

    fn reset(&mut self) {
        self.transition(Presence::Unauthenticated);
        self.unread = 0;
        self.menu_open = false;
    }

    fn transition(&mut self, next: Presence) {
        if self.presence != next {
            debug!("Presence: {:?} -> {:?}", self.presence, next);
            self.presence = next;
        }
    }
}
