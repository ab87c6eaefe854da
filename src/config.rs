// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use url::Url;

/// Quiet interval after the last keystroke before a search is sent.
pub(crate) const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long the result panel survives a blur, so a click on a result lands.
pub(crate) const BLUR_GRACE: Duration = Duration::from_millis(200);

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    base_url: Url,
    search_debounce: Duration,
    blur_grace: Duration,
}

impl Settings {
    /// Settings for the backend at `base_url`. A missing trailing slash is
    /// added so relative endpoints nest under the base path instead of
    /// replacing its last segment.
    #[must_use]
    pub(crate) fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            search_debounce: SEARCH_DEBOUNCE,
            blur_grace: BLUR_GRACE,
        }
    }

    #[must_use]
    pub(crate) fn with_search_debounce(mut self, interval: Duration) -> Self {
        self.search_debounce = interval;
        self
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    pub(crate) fn blur_grace(&self) -> Duration {
        self.blur_grace
    }
}
