// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription session state.

use tokio_util::sync::CancellationToken;

use crate::event::UpdatePublisher;

/// One "all controls" subscription: its publisher and the scope of the
/// status queries it started.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    publisher: UpdatePublisher,
    cancel: CancellationToken,
}

impl Session {
    pub(crate) fn new(publisher: UpdatePublisher) -> Self {
        Self {
            publisher,
            cancel: CancellationToken::new(),
        }
    }

    pub(crate) fn publisher(&self) -> &UpdatePublisher {
        &self.publisher
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stops pending status queries and ends the session's streams.
    pub(crate) fn end(&self) {
        self.cancel.cancel();
        self.publisher.close();
    }
}
