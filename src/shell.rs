// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{convert::Infallible, fmt, str::FromStr, sync::Arc};

use log::info;

/// The page shell's routes that the session layer can send the user to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Login,
    Profile,
    Post(i64),
    Other(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Login => f.write_str("/login"),
            Self::Profile => f.write_str("/profile"),
            Self::Post(id) => write!(f, "/posts/{id}"),
            Self::Other(path) => f.write_str(path),
        }
    }
}

impl Route {
    pub(crate) fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/profile" => Self::Profile,
            trimmed => trimmed
                .strip_prefix("/posts/")
                .and_then(|id| id.parse().ok())
                .map_or_else(|| Self::Other(path.to_owned()), Self::Post),
        }
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_path(s))
    }
}

/// What the session layer needs from whatever is showing pages.
pub(crate) trait Shell: Send + Sync {
    fn navigate(&self, route: Route);

    /// Shows a notice the user must acknowledge before anything else happens.
    fn notify(&self, message: &str);
}

impl<T: Shell + ?Sized> Shell for Arc<T> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }

    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// A shell that reports navigation and notices on the terminal.
pub(crate) struct Terminal;

impl Shell for Terminal {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
        eprintln!("→ {route}");
    }

    fn notify(&self, message: &str) {
        eprintln!("Notice: {message}");
    }
}
